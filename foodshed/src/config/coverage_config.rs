use super::ModeFailurePolicy;
use crate::model::{
    distance::DistanceSet, provider::ProviderColumns, service_area::HullAlgorithm, CoverageError,
};
use foodshed_osm::{
    config::GraphBuildConfiguration,
    model::{BufferRadii, TravelMode},
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr};

/// parameters of a coverage run. every field has a default, so a
/// configuration file only needs the values it changes.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct CoverageConfiguration {
    /// buffer radii for the walk network
    pub walk: BufferRadii,
    /// buffer radii for the drive network
    pub drive: BufferRadii,
    pub distances: DistanceSet,
    pub modes: Vec<TravelMode>,
    pub hull_algorithm: HullAlgorithm,
    /// segments per quarter circle when buffering
    pub quadrant_segments: usize,
    /// fan origins out over the rayon thread pool
    pub parallelize: bool,
    pub mode_failure_policy: ModeFailurePolicy,
    /// reuse layers of a previous run when their inputs are unchanged
    pub reuse_cached_layers: bool,
    pub graph: GraphBuildConfiguration,
    pub provider_columns: ProviderColumns,
}

impl Default for CoverageConfiguration {
    fn default() -> Self {
        Self {
            walk: TravelMode::Walk.default_buffer_radii(),
            drive: TravelMode::Drive.default_buffer_radii(),
            distances: DistanceSet::default(),
            modes: TravelMode::ALL.to_vec(),
            hull_algorithm: HullAlgorithm::default(),
            quadrant_segments: 8,
            parallelize: true,
            mode_failure_policy: ModeFailurePolicy::default(),
            reuse_cached_layers: true,
            graph: GraphBuildConfiguration::default(),
            provider_columns: ProviderColumns::default(),
        }
    }
}

impl CoverageConfiguration {
    pub fn buffer_radii(&self, mode: &TravelMode) -> BufferRadii {
        match mode {
            TravelMode::Walk => self.walk,
            TravelMode::Drive => self.drive,
        }
    }

    pub fn validate(&self) -> Result<(), CoverageError> {
        for mode in TravelMode::ALL {
            self.buffer_radii(&mode)
                .validate()
                .map_err(|e| CoverageError::InvalidConfiguration(format!("{mode}: {e}")))?;
        }
        if self.modes.is_empty() {
            return Err(CoverageError::InvalidConfiguration(String::from(
                "at least one travel mode is required",
            )));
        }
        if self.quadrant_segments == 0 {
            return Err(CoverageError::InvalidConfiguration(String::from(
                "quadrant_segments must be at least 1",
            )));
        }
        self.hull_algorithm
            .validate()
            .map_err(CoverageError::InvalidConfiguration)?;
        self.graph
            .validate()
            .map_err(|e| CoverageError::InvalidConfiguration(e.to_string()))?;
        self.distances.resolve()?;
        Ok(())
    }
}

impl TryFrom<&Path> for CoverageConfiguration {
    type Error = CoverageError;

    fn try_from(f: &Path) -> Result<Self, Self::Error> {
        let read = || {
            std::fs::read_to_string(f).map_err(|e| {
                CoverageError::InvalidConfiguration(format!("failure reading {}: {e}", f.display()))
            })
        };
        let decode_error = |e: String| {
            CoverageError::InvalidConfiguration(format!("failure decoding {}: {e}", f.display()))
        };
        match f.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&read()?).map_err(|e| decode_error(e.to_string())),
            Some("json") => {
                serde_json::from_str(&read()?).map_err(|e| decode_error(e.to_string()))
            }
            _ => Err(CoverageError::InvalidConfiguration(format!(
                "unsupported file type: {}",
                f.display()
            ))),
        }
    }
}

/// parses a comma-separated mode list, case-insensitively. an empty list
/// selects every mode.
pub fn parse_modes(modes: &str) -> Result<Vec<TravelMode>, CoverageError> {
    let names = modes
        .split(',')
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect_vec();
    if names.is_empty() {
        return Ok(TravelMode::ALL.to_vec());
    }
    let parsed = names
        .iter()
        .map(|m| TravelMode::from_str(m).map_err(CoverageError::InvalidConfiguration))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parsed.into_iter().unique().collect_vec())
}
