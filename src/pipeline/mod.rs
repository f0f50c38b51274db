pub mod driver;
pub mod region;
