use super::limiter::RateLimiter;
use super::osrm::RouteService;

/// Rate-limited, infallible front for a [`RouteService`].
pub struct RouteFetcher<S: RouteService> {
    service: S,
    limiter: RateLimiter,
}

impl<S: RouteService> RouteFetcher<S> {
    pub fn new(service: S, limiter: RateLimiter) -> Self {
        Self { service, limiter }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Route between two coordinates. Never fails: when the service errors or finds no
    /// route, the straight line between the endpoints is returned.
    pub fn fetch_route(&self, from: geo::Coord, to: geo::Coord) -> geo::LineString {
        let _permit = self.limiter.acquire();
        match self.service.route(from, to) {
            Ok(Some(line)) => line,
            Ok(None) => {
                log::warn!(
                    "No route found from {:?} to {:?}, using a straight line",
                    from,
                    to
                );
                straight_line(from, to)
            }
            Err(err) => {
                log::warn!(
                    "Routing from {:?} to {:?} failed, using a straight line: {:#}",
                    from,
                    to,
                    err
                );
                straight_line(from, to)
            }
        }
    }
}

pub fn straight_line(from: geo::Coord, to: geo::Coord) -> geo::LineString {
    vec![from, to].into()
}
