pub mod coverage;
pub mod euclidean;
