use crate::routing::fetcher::RouteFetcher;
use crate::routing::osrm::RouteService;

use super::xml::{declared_type, find_first, find_text, Node};

/// Geometry of one incident, in WGS84 longitude/latitude order.
#[derive(Clone, Debug, PartialEq)]
pub enum IncidentGeometry {
    Point(geo::Point),
    LineString(geo::LineString),
}

impl From<&IncidentGeometry> for geojson::Geometry {
    fn from(geometry: &IncidentGeometry) -> Self {
        match geometry {
            IncidentGeometry::Point(point) => geojson::Geometry::from(point),
            IncidentGeometry::LineString(line) => geojson::Geometry::from(line),
        }
    }
}

/// Where a situation record says the incident is, before any routing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IncidentLocation {
    Linear { from: geo::Coord, to: geo::Coord },
    Point(geo::Point),
}

/// Determine the location of a record. Linear from/to locations take precedence over a
/// standalone point; `None` if neither is fully specified.
pub fn locate(record: Node) -> Option<IncidentLocation> {
    linear_location(record).or_else(|| point_coordinates(record).map(IncidentLocation::Point))
}

/// Resolve the final geometry of a record, routing linear locations along the road network.
pub fn resolve_geometry<S: RouteService>(
    record: Node,
    route_fetcher: &RouteFetcher<S>,
) -> Option<IncidentGeometry> {
    match locate(record)? {
        IncidentLocation::Linear { from, to } => Some(IncidentGeometry::LineString(
            route_fetcher.fetch_route(from, to),
        )),
        IncidentLocation::Point(point) => Some(IncidentGeometry::Point(point)),
    }
}

fn linear_location(record: Node) -> Option<IncidentLocation> {
    let group = find_first(record, "groupOfLocations")?;
    if !declared_type(group).map_or(false, |location_type| location_type.contains("Linear")) {
        return None;
    }
    let from = point_coordinates(find_first(group, "from")?)?;
    let to = point_coordinates(find_first(group, "to")?)?;
    Some(IncidentLocation::Linear {
        from: from.into(),
        to: to.into(),
    })
}

/// Point from the first `pointCoordinates` below `node`. Missing or non-numeric latitude or
/// longitude yields `None`.
fn point_coordinates(node: Node) -> Option<geo::Point> {
    let coordinates = find_first(node, "pointCoordinates")?;
    let latitude = parse_degrees(find_text(coordinates, "latitude")?)?;
    let longitude = parse_degrees(find_text(coordinates, "longitude")?)?;
    Some(geo::Point::new(longitude, latitude))
}

fn parse_degrees(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}
