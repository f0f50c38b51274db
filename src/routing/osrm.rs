use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::Deserialize;

/// A road-following route between two WGS84 coordinates.
///
/// Returns `Ok(None)` when the service answered but found no route.
pub trait RouteService: Sync {
    fn route(&self, from: geo::Coord, to: geo::Coord) -> anyhow::Result<Option<geo::LineString>>;
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RoutingConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: f64,
    pub delay_secs: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 5.0,
            delay_secs: 0.5,
        }
    }
}

impl RoutingConfig {
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        Duration::try_from_secs_f64(self.timeout_secs)
            .with_context(|| format!("Invalid routing timeout {}", self.timeout_secs))
    }

    pub fn delay(&self) -> anyhow::Result<Duration> {
        Duration::try_from_secs_f64(self.delay_secs)
            .with_context(|| format!("Invalid routing delay {}", self.delay_secs))
    }
}

/// Client for an OSRM-compatible `route` endpoint.
pub struct OsrmClient {
    client: reqwest::blocking::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    pub fn new(config: &RoutingConfig, user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(config.timeout()?)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile.clone(),
        })
    }

    pub fn route_url(&self, from: geo::Coord, to: geo::Coord) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, self.profile, from.x, from.y, to.x, to.y
        )
    }
}

impl RouteService for OsrmClient {
    fn route(&self, from: geo::Coord, to: geo::Coord) -> anyhow::Result<Option<geo::LineString>> {
        let url = self.route_url(from, to);
        log::debug!("Requesting route {}", url);
        let body = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Requesting {}", url))?
            .text()
            .or(Err(anyhow!("No response text")))?;
        parse_route_response(&body)
    }
}

#[derive(Deserialize, Debug)]
struct RouteResponse {
    routes: Vec<Route>,
}

#[derive(Deserialize, Debug)]
struct Route {
    geometry: geojson::Geometry,
}

/// Decode a route response body. The first route's GeoJSON LineString is returned as is;
/// an empty `routes` array yields `None`. Anything else is an error.
pub fn parse_route_response(body: &str) -> anyhow::Result<Option<geo::LineString>> {
    let response: RouteResponse =
        serde_json::from_str(body).context("Decoding routing service response")?;
    let route = match response.routes.into_iter().next() {
        Some(route) => route,
        None => return Ok(None),
    };
    let positions = match route.geometry.value {
        geojson::Value::LineString(positions) => positions,
        other => return Err(anyhow!("Expected a LineString route, got {:?}", other)),
    };
    if positions.len() < 2 {
        return Err(anyhow!(
            "Route geometry has {} positions, need at least two",
            positions.len()
        ));
    }
    let coords = positions
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(geo::Coord { x: *x, y: *y }),
            _ => Err(anyhow!("Invalid route position {:?}", position)),
        })
        .collect::<anyhow::Result<Vec<geo::Coord>>>()?;
    Ok(Some(geo::LineString::new(coords)))
}
