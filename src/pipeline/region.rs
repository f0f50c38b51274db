use crate::datex::fields::{description_html, extract, INCIDENT_FIELD_RULES};
use crate::datex::geometry::resolve_geometry;
use crate::datex::xml::{find_all, find_first, parse_document, Node};
use crate::geofile::feature::Feature;
use crate::routing::fetcher::RouteFetcher;
use crate::routing::osrm::RouteService;
use crate::source::download::{Region, RegionSource};

/// Features produced from one publication.
#[derive(Debug, Default, PartialEq)]
pub struct RegionFeatures {
    pub features: Vec<Feature>,
    /// Situation records dropped because no geometry could be resolved.
    pub skipped_records: usize,
}

/// Download and convert the publication of one region.
pub fn process_region<R: RegionSource, S: RouteService>(
    region: &Region,
    source: &R,
    route_fetcher: &RouteFetcher<S>,
) -> anyhow::Result<RegionFeatures> {
    log::info!("Processing region {} from {}", region.name, region.url);
    let contents = source.fetch(region)?;
    let region_features = features_from_publication(&contents, route_fetcher)?;
    log::info!(
        "Region {}: {} features, {} records without geometry skipped",
        region.name,
        region_features.features.len(),
        region_features.skipped_records
    );
    Ok(region_features)
}

/// Convert every situation in a DATEX II publication. Each situation contributes its first
/// situation record, if it has one.
pub fn features_from_publication<S: RouteService>(
    contents: &str,
    route_fetcher: &RouteFetcher<S>,
) -> anyhow::Result<RegionFeatures> {
    let document = parse_document(contents)?;
    let mut region_features = RegionFeatures::default();
    for situation in find_all(document.root_element(), "situation") {
        let record = match find_first(situation, "situationRecord") {
            Some(record) => record,
            None => continue,
        };
        match feature_from_record(record, route_fetcher) {
            Some(feature) => region_features.features.push(feature),
            None => {
                log::debug!(
                    "No geometry for situation record {:?}",
                    record.attribute("id")
                );
                region_features.skipped_records += 1;
            }
        }
    }
    Ok(region_features)
}

pub fn feature_from_record<S: RouteService>(
    record: Node,
    route_fetcher: &RouteFetcher<S>,
) -> Option<Feature> {
    let description = description_html(&extract(record, &INCIDENT_FIELD_RULES));
    let geometry = resolve_geometry(record, route_fetcher)?;
    Some(Feature {
        geometry,
        description,
    })
}
