use super::{graph::TravelGraph, import_ops, GraphBuilder, OsmError};
use crate::{config::GraphBuildConfiguration, model::TravelMode};
use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

/// a source of OpenStreetMap network data
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum OsmSource {
    Pbf { pbf_filepath: String },
}

impl OsmSource {
    /// reads the network for a travel mode around a WGS84 boundary and builds
    /// its routable [`TravelGraph`].
    pub fn import(
        &self,
        mode: TravelMode,
        boundary: &MultiPolygon<f64>,
        config: &GraphBuildConfiguration,
    ) -> Result<TravelGraph, OsmError> {
        config.validate()?;
        match self {
            OsmSource::Pbf { pbf_filepath } => {
                eprintln!();
                log::info!("  (((1))) reading {mode} network from PBF source {pbf_filepath}");
                let bbox = import_ops::expand_extent(boundary, config.extent_buffer_m)?;
                let (nodes, ways) =
                    import_ops::read_pbf(pbf_filepath, &mode.element_filter(), Some(&bbox))?;
                GraphBuilder::new(mode, config.clone()).build(&nodes, &ways, boundary)
            }
        }
    }

    /// the file this source reads from, used to fingerprint cached results
    pub fn filepath(&self) -> &str {
        match self {
            OsmSource::Pbf { pbf_filepath } => pbf_filepath,
        }
    }
}
