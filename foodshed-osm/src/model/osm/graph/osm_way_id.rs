use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// OpenStreetMap identifier of a way element
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct OsmWayId(pub i64);

impl From<i64> for OsmWayId {
    fn from(value: i64) -> Self {
        OsmWayId(value)
    }
}

impl Display for OsmWayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "way/{}", self.0)
    }
}
