pub mod fetcher;
pub mod limiter;
pub mod osrm;
