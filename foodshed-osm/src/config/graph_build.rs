use crate::{algorithm::truncation::ComponentFilter, model::osm::OsmError};
use serde::{Deserialize, Serialize};

/// defines behaviors for building a travel network from OSM data
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct GraphBuildConfiguration {
    pub component_filter: ComponentFilter,
    pub truncate_by_edge: bool,
    pub simplify: bool,
    /// distance in meters the boundary's bounding box is grown by before
    /// reading the network source, so edges crossing the boundary survive
    pub extent_buffer_m: f64,
}

impl Default for GraphBuildConfiguration {
    fn default() -> Self {
        Self {
            component_filter: ComponentFilter::Largest,
            truncate_by_edge: true,
            simplify: true,
            extent_buffer_m: 500.0,
        }
    }
}

impl GraphBuildConfiguration {
    pub fn validate(&self) -> Result<(), OsmError> {
        if !self.extent_buffer_m.is_finite() || self.extent_buffer_m < 0.0 {
            return Err(OsmError::ConfigurationError(format!(
                "extent_buffer_m must be a non-negative number, found {}",
                self.extent_buffer_m
            )));
        }
        if let ComponentFilter::TopK { k: 0 } = self.component_filter {
            return Err(OsmError::ConfigurationError(String::from(
                "top_k component filter requires k > 0",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let conf: GraphBuildConfiguration = serde_json::from_str(r#"{"simplify": false}"#).unwrap();
        assert!(!conf.simplify);
        assert!(conf.truncate_by_edge);
        assert_eq!(conf.extent_buffer_m, 500.0);
        assert_eq!(conf.component_filter, ComponentFilter::Largest);
        assert!(conf.validate().is_ok());
    }

    #[test]
    fn test_negative_buffer_rejected() {
        let conf = GraphBuildConfiguration {
            extent_buffer_m: -1.0,
            ..Default::default()
        };
        assert!(conf.validate().is_err());
    }
}
