use foodshed_osm::model::{osm::OsmError, TravelMode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("malformed geometry in {path}: {reason}")]
    MalformedGeometry { path: String, reason: String },
    #[error("failure building {mode} network: {source}")]
    GraphBuildError { mode: TravelMode, source: OsmError },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failure reading providers from {path}: {reason}")]
    ProviderReadError { path: String, reason: String },
    #[error("failure reading coverage layer {path}: {reason}")]
    LayerReadError { path: String, reason: String },
    #[error("failure accessing {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },
    #[error("failure encoding or decoding JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("failure projecting geometry: {0}")]
    ProjectionError(String),
    #[error("{0}")]
    InternalError(String),
}

impl CoverageError {
    /// wraps an io error with the path that produced it
    pub fn io(path: &std::path::Path, source: std::io::Error) -> CoverageError {
        CoverageError::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}

impl From<OsmError> for CoverageError {
    fn from(value: OsmError) -> Self {
        match value {
            OsmError::ProjectionError(msg) => CoverageError::ProjectionError(msg),
            other => CoverageError::InternalError(other.to_string()),
        }
    }
}
