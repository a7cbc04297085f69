use thiserror::Error;

use super::graph::OsmNodeId;
use crate::model::TravelMode;

#[derive(Error, Debug)]
pub enum OsmError {
    #[error("invalid network import configuration: {0}")]
    ConfigurationError(String),
    #[error("failure reading .pbf file {filepath}: {source}")]
    PbfLibError {
        filepath: String,
        source: osmpbf::Error,
    },
    #[error("failure simplifying graph: {0}")]
    GraphSimplificationError(String),
    #[error("attempting to get node '{0}' not in graph")]
    GraphMissingNodeId(OsmNodeId),
    #[error("{0}")]
    GraphModificationError(String),
    #[error("no {mode} network remains {stage}")]
    EmptyNetwork { mode: TravelMode, stage: String },
    #[error("import extent is not usable: {0}")]
    InvalidExtent(String),
    #[error("failure projecting coordinates: {0}")]
    ProjectionError(String),
    #[error("{0}")]
    InternalError(String),
}
