use std::{fs, path::Path};

use anyhow::Context;

use super::feature::Feature;

pub fn to_feature_collection(features: &[Feature]) -> geojson::FeatureCollection {
    geojson::FeatureCollection {
        bbox: None,
        features: features.iter().map(geojson::Feature::from).collect(),
        foreign_members: None,
    }
}

/// Pretty-printed GeoJSON text. Non-ASCII characters are written literally.
pub fn features_to_geojson_string(features: &[Feature]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(&to_feature_collection(features))
        .context("Serializing feature collection")
}

pub fn write_features_to_geojson(
    features: &[Feature],
    output_filepath: &Path,
) -> anyhow::Result<()> {
    let geojson_contents = features_to_geojson_string(features)?;
    fs::write(output_filepath, geojson_contents)
        .with_context(|| format!("Writing GeoJSON to {:?}", output_filepath))
}
