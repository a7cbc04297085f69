pub mod coverage;
mod coverage_error;
pub mod distance;
pub mod geometry;
pub mod layer;
pub mod origin;
pub mod provider;
pub mod service_area;

pub use coverage_error::CoverageError;
