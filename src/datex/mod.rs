pub mod fields;
pub mod geometry;
pub mod translation;
pub mod xml;
