extern crate log;
pub mod datex;
pub mod geofile;
pub mod pipeline;
pub mod routing;
pub mod source;
use crate::pipeline::driver::run_to_file;
use crate::routing::fetcher::RouteFetcher;
use crate::routing::limiter::RateLimiter;
use crate::routing::osrm::{OsrmClient, RoutingConfig};
use crate::source::download::{default_regions, HttpRegionSource, Region};
use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

/// Merge DATEX II traffic incidents from several regions into one GeoJSON file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to an optional YAML config file. Built-in defaults are used without one.
    #[arg(short, long)]
    config_filepath: Option<String>,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
struct Config {
    regions: Vec<Region>,
    output_filepath: PathBuf,
    routing: RoutingConfig,
    user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            output_filepath: PathBuf::from("traffic_data.geojson"),
            routing: RoutingConfig::default(),
            user_agent: "datex-incidents".to_string(),
        }
    }
}

fn load_config(config_filepath: &str) -> anyhow::Result<Config> {
    if !Path::new(config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", config_filepath));
    }
    let config_contents = read_to_string(config_filepath)?;
    Ok(serde_yaml::from_str(&config_contents)?)
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    let config = match &args.config_filepath {
        Some(config_filepath) => load_config(config_filepath)?,
        None => Config::default(),
    };

    let source = HttpRegionSource::new(&config.user_agent)?;
    let route_fetcher = RouteFetcher::new(
        OsrmClient::new(&config.routing, &config.user_agent)?,
        RateLimiter::new(config.routing.delay()?),
    );
    log::info!(
        "Processing {} regions, routing via {} with {:?} between calls",
        config.regions.len(),
        config.routing.base_url,
        route_fetcher.limiter().min_delay()
    );

    let num_features = run_to_file(
        &config.regions,
        &source,
        &route_fetcher,
        &config.output_filepath,
    )?;
    log::info!(
        "Wrote {} features to {:?}",
        num_features,
        config.output_filepath
    );
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testdir::testdir;

    use crate::routing::osrm::RoutingConfig;
    use crate::source::download::Region;

    use super::{load_config, Config};

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_yaml::from_str(
            r#"
regions:
  - name: Madrid
    url: http://localhost/madrid.xml
routing:
  timeout_secs: 2.5
"#,
        )
        .unwrap();
        assert_eq!(
            vec![Region::new("Madrid", "http://localhost/madrid.xml")],
            config.regions
        );
        assert_eq!(2.5, config.routing.timeout_secs);
        assert_eq!(RoutingConfig::default().delay_secs, config.routing.delay_secs);
        assert_eq!(Config::default().output_filepath, config.output_filepath);
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config: Config = serde_yaml::from_str(include_str!("../config.example.yaml")).unwrap();
        assert_eq!(Config::default(), config);
    }

    #[test]
    fn test_load_config_from_file() {
        let config_filepath = testdir!().join("config.yaml");
        fs::write(&config_filepath, "output_filepath: /tmp/incidents.geojson\n").unwrap();
        let config = load_config(config_filepath.to_str().unwrap()).unwrap();
        assert_eq!(3, config.regions.len());
        assert_eq!("/tmp/incidents.geojson", config.output_filepath.to_str().unwrap());
    }

    #[test]
    fn test_load_missing_config_fails() {
        let config_filepath = testdir!().join("missing.yaml");
        assert!(load_config(config_filepath.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_negative_delay_is_rejected() {
        let routing = RoutingConfig {
            delay_secs: -1.0,
            ..RoutingConfig::default()
        };
        assert!(routing.delay().is_err());
    }
}
