use std::path::Path;

use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;

use crate::geofile::feature::Feature;
use crate::geofile::geojson::write_features_to_geojson;
use crate::routing::fetcher::RouteFetcher;
use crate::routing::osrm::RouteService;
use crate::source::download::{Region, RegionSource};

use super::region::process_region;

/// Collect the features of all regions, in region order and then document order.
///
/// Regions are processed in parallel; routing calls stay serialized by the fetcher's
/// limiter. A region that fails to download or parse contributes no features.
pub fn run<R: RegionSource, S: RouteService>(
    regions: &[Region],
    source: &R,
    route_fetcher: &RouteFetcher<S>,
) -> Vec<Feature> {
    let bar = ProgressBar::new(regions.len() as u64);
    let per_region: Vec<Vec<Feature>> = regions
        .par_iter()
        .progress_with(bar)
        .map(|region| match process_region(region, source, route_fetcher) {
            Ok(region_features) => region_features.features,
            Err(err) => {
                log::error!(
                    "Error processing {} from {}: {:#}",
                    region.name,
                    region.url,
                    err
                );
                Vec::new()
            }
        })
        .collect();
    per_region.into_iter().flatten().collect()
}

/// Run the pipeline and write the resulting collection once. Returns the number of
/// features written.
pub fn run_to_file<R: RegionSource, S: RouteService>(
    regions: &[Region],
    source: &R,
    route_fetcher: &RouteFetcher<S>,
    output_filepath: &Path,
) -> anyhow::Result<usize> {
    let features = run(regions, source, route_fetcher);
    log::info!(
        "Writing {} features to {:?}",
        features.len(),
        output_filepath
    );
    write_features_to_geojson(&features, output_filepath)?;
    Ok(features.len())
}
