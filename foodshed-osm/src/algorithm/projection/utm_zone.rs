use super::Transformer;
use crate::model::osm::OsmError;
use geo::{BoundingRect, Geometry};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a WGS84 Universal Transverse Mercator zone, used as the metric CRS for
/// all buffering, area and distance calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtmZone {
    pub zone: u8,
    pub north: bool,
}

impl UtmZone {
    pub fn new(zone: u8, north: bool) -> Result<UtmZone, OsmError> {
        if !(1..=60).contains(&zone) {
            return Err(OsmError::ProjectionError(format!(
                "UTM zone must be in [1, 60], found {zone}"
            )));
        }
        Ok(UtmZone { zone, north })
    }

    /// the zone containing a WGS84 longitude/latitude position
    pub fn from_lonlat(lon: f64, lat: f64) -> Result<UtmZone, OsmError> {
        if !lon.is_finite() || !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(OsmError::ProjectionError(format!(
                "invalid coordinate ({lon}, {lat})"
            )));
        }
        let zone = (((lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u8;
        UtmZone::new(zone, lat >= 0.0)
    }

    /// the zone containing the center of a geographic extent's bounding box
    pub fn for_extent(extent: &Geometry<f64>) -> Result<UtmZone, OsmError> {
        let rect = extent.bounding_rect().ok_or_else(|| {
            OsmError::InvalidExtent(String::from("extent has no bounding box"))
        })?;
        let center = rect.center();
        UtmZone::from_lonlat(center.x, center.y)
    }

    pub fn epsg(&self) -> u32 {
        let base = if self.north { 32600 } else { 32700 };
        base + self.zone as u32
    }

    pub fn proj_string(&self) -> String {
        let south = if self.north { "" } else { " +south" };
        format!(
            "+proj=utm +zone={}{south} +datum=WGS84 +units=m +no_defs +type=crs",
            self.zone
        )
    }

    pub fn transformer(&self) -> Result<Transformer, OsmError> {
        Transformer::new(self)
    }
}

impl Display for UtmZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}
