mod distance_set;
mod distance_threshold;

pub use distance_set::{DistanceRange, DistanceSet};
pub use distance_threshold::DistanceThreshold;
