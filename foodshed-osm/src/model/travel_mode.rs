use crate::model::osm::graph::osm_element_filter::ElementFilter;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use uom::si::{f64::Length, length::meter};

/// the routing profile used to build a travel network. each mode has its own
/// way filter, edge directionality and service-area buffer radii.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Walk,
    Drive,
}

impl TravelMode {
    pub const ALL: [TravelMode; 2] = [TravelMode::Walk, TravelMode::Drive];

    /// the osmnx-equivalent way filter for this mode
    pub fn element_filter(&self) -> ElementFilter {
        match self {
            TravelMode::Walk => ElementFilter::OsmnxWalk,
            TravelMode::Drive => ElementFilter::OsmnxDrive,
        }
    }

    /// pedestrians may traverse any way in both directions, regardless of oneway tags.
    pub fn ignores_oneway(&self) -> bool {
        matches!(self, TravelMode::Walk)
    }

    /// buffer radii that turn thin street geometry into a plausible footprint.
    pub fn default_buffer_radii(&self) -> BufferRadii {
        match self {
            TravelMode::Walk => BufferRadii {
                edge_buffer_m: 60.0,
                node_buffer_m: 40.0,
            },
            TravelMode::Drive => BufferRadii {
                edge_buffer_m: 90.0,
                node_buffer_m: 60.0,
            },
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelMode::Walk => write!(f, "walk"),
            TravelMode::Drive => write!(f, "drive"),
        }
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "walk" => Ok(TravelMode::Walk),
            "drive" => Ok(TravelMode::Drive),
            other => Err(format!("unsupported travel mode '{other}'")),
        }
    }
}

/// per-mode buffer radii in meters, applied to reached edges and nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferRadii {
    pub edge_buffer_m: f64,
    pub node_buffer_m: f64,
}

impl BufferRadii {
    pub fn edge_buffer(&self) -> Length {
        Length::new::<meter>(self.edge_buffer_m)
    }

    pub fn node_buffer(&self) -> Length {
        Length::new::<meter>(self.node_buffer_m)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("edge_buffer_m", self.edge_buffer_m),
            ("node_buffer_m", self.node_buffer_m),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{name} must be a non-negative number of meters, found {value}"
                ));
            }
        }
        Ok(())
    }
}
