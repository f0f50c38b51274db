use crate::datex::geometry::IncidentGeometry;

/// One incident ready to be written: an HTML description and its geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub geometry: IncidentGeometry,
    pub description: String,
}

impl From<&Feature> for geojson::Feature {
    fn from(feature: &Feature) -> Self {
        let mut properties = geojson::JsonObject::new();
        properties.insert(
            "description".to_string(),
            geojson::JsonValue::from(feature.description.clone()),
        );
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&feature.geometry)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
