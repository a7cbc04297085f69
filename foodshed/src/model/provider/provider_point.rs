use geo::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// a validated food provider location in WGS84 degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderPoint {
    pub id: String,
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub attributes: BTreeMap<String, String>,
}

impl ProviderPoint {
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}
