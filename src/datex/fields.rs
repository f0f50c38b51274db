use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::translation::translate;
use super::xml::{find_text, Node};

const DISPLAY_DATETIME_FORMAT: &str = "%d/%m/%Y - %H:%M:%S";

/// How the raw text of a matched element is turned into a display value.
/// A `None` result drops the entry.
#[derive(Clone, Copy)]
pub enum Transform {
    Identity,
    Translate,
    Custom(fn(&str) -> Option<String>),
}

impl Transform {
    pub fn apply(&self, raw: &str) -> Option<String> {
        match self {
            Transform::Identity => Some(raw.to_string()),
            Transform::Translate => Some(translate(raw)),
            Transform::Custom(format) => format(raw),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity => write!(f, "Identity"),
            Transform::Translate => write!(f, "Translate"),
            Transform::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Maps the first element with local name `locator` onto a labeled description entry.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub locator: &'static str,
    pub label: &'static str,
    pub transform: Transform,
}

impl FieldRule {
    pub const fn new(locator: &'static str, label: &'static str, transform: Transform) -> Self {
        Self {
            locator,
            label,
            transform,
        }
    }
}

/// Rules applied to every situation record. Labels may repeat; every match is kept.
pub const INCIDENT_FIELD_RULES: [FieldRule; 10] = [
    FieldRule::new(
        "situationRecordCreationTime",
        "Fecha de Creación",
        Transform::Custom(format_creation_time),
    ),
    FieldRule::new("obstructionType", "Tipo de Obstrucción", Transform::Translate),
    FieldRule::new(
        "environmentalObstructionType",
        "Tipo de Obstrucción",
        Transform::Translate,
    ),
    FieldRule::new("vehicleObstructionType", "Tipo de Incidente", Transform::Translate),
    FieldRule::new("constructionWorkType", "Tipo de Incidente", Transform::Translate),
    FieldRule::new("directionRelative", "Dirección", Transform::Translate),
    FieldRule::new("networkManagementType", "Aviso", Transform::Translate),
    FieldRule::new("impactOnTraffic", "Impacto", Transform::Translate),
    FieldRule::new("roadNumber", "Carretera", Transform::Identity),
    FieldRule::new(
        "referencePointDistance",
        "Punto Kilométrico",
        Transform::Custom(format_kilometers),
    ),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptionEntry {
    pub label: String,
    pub value: String,
}

impl DescriptionEntry {
    pub fn to_html(&self) -> String {
        format!("<b>{}:</b> {}", self.label, self.value)
    }
}

impl fmt::Display for DescriptionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Apply `rules` in order to `record`, skipping rules whose element is absent or empty.
pub fn extract(record: Node, rules: &[FieldRule]) -> Vec<DescriptionEntry> {
    rules
        .iter()
        .filter_map(|rule| {
            let raw = find_text(record, rule.locator)?;
            let value = rule.transform.apply(raw);
            if value.is_none() {
                log::debug!("Skipping {} with unusable value {:?}", rule.locator, raw);
            }
            Some(DescriptionEntry {
                label: rule.label.to_string(),
                value: value?,
            })
        })
        .collect()
}

pub fn description_html(entries: &[DescriptionEntry]) -> String {
    entries
        .iter()
        .map(DescriptionEntry::to_html)
        .collect::<Vec<String>>()
        .join("<br>")
}

/// Reformat an ISO-8601 timestamp as `DD/MM/YYYY - HH:MM:SS`, keeping the wall-clock time of
/// any offset. Unparseable input is returned unchanged.
pub fn format_datetime(raw: &str) -> String {
    match parse_iso8601(raw.trim()) {
        Some(datetime) => datetime.format(DISPLAY_DATETIME_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

fn parse_iso8601(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.naive_local());
    }
    if let Ok(datetime) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(datetime.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn format_creation_time(raw: &str) -> Option<String> {
    Some(format_datetime(raw))
}

/// Render a distance in meters as kilometers with one decimal, e.g. `12345` -> `12.3 km`.
pub fn format_kilometers(raw: &str) -> Option<String> {
    let meters: f64 = raw.trim().parse().ok()?;
    if !meters.is_finite() {
        return None;
    }
    Some(format!("{:.1} km", meters / 1000.0))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::datex::xml::{find_first, parse_document};

    use super::{
        description_html, extract, format_datetime, format_kilometers, DescriptionEntry,
        FieldRule, Transform, INCIDENT_FIELD_RULES,
    };

    fn record_xml(body: &str) -> String {
        format!(
            r#"<situationRecord xmlns="http://datex2.eu/schema/1_0/1_0">{}</situationRecord>"#,
            body
        )
    }

    fn extract_strings(body: &str) -> Vec<String> {
        let xml = record_xml(body);
        let document = parse_document(&xml).unwrap();
        extract(document.root_element(), &INCIDENT_FIELD_RULES)
            .iter()
            .map(|entry| entry.to_string())
            .collect()
    }

    #[rstest]
    #[case("2024-03-01T12:30:00Z", "01/03/2024 - 12:30:00")]
    #[case("2024-03-01T12:30:00", "01/03/2024 - 12:30:00")]
    #[case("2024-03-01T12:30:00.250+01:00", "01/03/2024 - 12:30:00")]
    #[case("2024-03-01T12:30:00+0100", "01/03/2024 - 12:30:00")]
    #[case("2024-03-01T12:30:00.5-0300", "01/03/2024 - 12:30:00")]
    #[case("2024-12-31 23:59:59", "31/12/2024 - 23:59:59")]
    #[case("2024-03-01", "01/03/2024 - 00:00:00")]
    #[case("not-a-date", "not-a-date")]
    #[case("2024-13-01T00:00:00Z", "2024-13-01T00:00:00Z")]
    #[case("", "")]
    fn test_format_datetime(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(expected, format_datetime(raw));
    }

    #[rstest]
    #[case("12345", Some("12.3 km"))]
    #[case("0", Some("0.0 km"))]
    #[case("1050.0", Some("1.1 km"))]
    #[case(" 2460 ", Some("2.5 km"))]
    #[case("km 12", None)]
    #[case("NaN", None)]
    fn test_format_kilometers(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(expected.map(String::from), format_kilometers(raw));
    }

    #[test]
    fn test_extract_single_road_number() {
        assert_eq!(
            vec!["Carretera: A-2".to_string()],
            extract_strings("<roadNumber>A-2</roadNumber>")
        );
    }

    #[test]
    fn test_extract_follows_rule_order_and_keeps_duplicate_labels() {
        let entries = extract_strings(
            r#"<roadNumber>N-I</roadNumber>
               <environmentalObstructionType>flooding</environmentalObstructionType>
               <situationRecordCreationTime>2024-03-01T12:30:00Z</situationRecordCreationTime>
               <obstructionType>objectOnTheRoad</obstructionType>
               <referencePointDistance>12345</referencePointDistance>
               <impactOnTraffic>heavy</impactOnTraffic>"#,
        );
        assert_eq!(
            vec![
                "Fecha de Creación: 01/03/2024 - 12:30:00",
                "Tipo de Obstrucción: Objeto en Calzada",
                "Tipo de Obstrucción: Inundación",
                "Impacto: Retención",
                "Carretera: N-I",
                "Punto Kilométrico: 12.3 km",
            ],
            entries
        );
    }

    #[test]
    fn test_extract_skips_empty_and_unusable_values() {
        let entries = extract_strings(
            r#"<networkManagementType></networkManagementType>
               <directionRelative>   </directionRelative>
               <roadNumber>AP-7</roadNumber>
               <referencePointDistance>unknown</referencePointDistance>"#,
        );
        assert_eq!(vec!["Carretera: AP-7".to_string()], entries);
    }

    #[test]
    fn test_extract_uses_first_nested_match() {
        let entries = extract_strings(
            r#"<groupOfLocations>
                 <roadNumber>A-1</roadNumber>
                 <roadNumber>A-2</roadNumber>
               </groupOfLocations>"#,
        );
        assert_eq!(vec!["Carretera: A-1".to_string()], entries);
    }

    #[test]
    fn test_extract_with_custom_rules() {
        let xml = record_xml("<roadNumber>a-2</roadNumber>");
        let document = parse_document(&xml).unwrap();
        let rules = [FieldRule::new(
            "roadNumber",
            "Road",
            Transform::Custom(|raw| Some(raw.to_uppercase())),
        )];
        let entries = extract(find_first(document.root(), "situationRecord").unwrap(), &rules);
        assert_eq!(
            vec![DescriptionEntry {
                label: "Road".to_string(),
                value: "A-2".to_string()
            }],
            entries
        );
    }

    #[test]
    fn test_description_html() {
        let entries = vec![
            DescriptionEntry {
                label: "Carretera".to_string(),
                value: "A-2".to_string(),
            },
            DescriptionEntry {
                label: "Dirección".to_string(),
                value: "Ambos Sentidos".to_string(),
            },
        ];
        assert_eq!(
            "<b>Carretera:</b> A-2<br><b>Dirección:</b> Ambos Sentidos",
            description_html(&entries)
        );
        assert_eq!("", description_html(&[]));
    }
}
