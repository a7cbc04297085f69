use crate::{
    model::{
        coverage::{CoverageRecord, RunSummary},
        distance::DistanceThreshold,
        service_area::HullAlgorithm,
        CoverageError,
    },
    util::fingerprint::{file_digest, Fingerprint},
};
use foodshed_osm::{config::GraphBuildConfiguration, model::{BufferRadii, TravelMode}};
use itertools::Itertools;
use std::path::Path;

/// content digests of the input files of a run
#[derive(Debug, Clone, PartialEq)]
pub struct InputDigests {
    pub providers: String,
    pub boundary: String,
    pub network: String,
}

impl InputDigests {
    pub fn from_paths(
        providers: &Path,
        boundary: &Path,
        network: &Path,
    ) -> Result<InputDigests, CoverageError> {
        Ok(InputDigests {
            providers: file_digest(providers)?,
            boundary: file_digest(boundary)?,
            network: file_digest(network)?,
        })
    }
}

/// every input that determines the layers of one (mode, distance) cell
pub struct CellFingerprint<'a> {
    pub inputs: &'a InputDigests,
    pub mode: TravelMode,
    pub distance: DistanceThreshold,
    pub radii: &'a BufferRadii,
    pub hull: &'a HullAlgorithm,
    pub quadrant_segments: usize,
    pub graph: &'a GraphBuildConfiguration,
    /// OSM ids of the unique origin nodes
    pub origins: &'a [i64],
}

impl CellFingerprint<'_> {
    pub fn digest(&self) -> Result<String, CoverageError> {
        let origins = self.origins.iter().sorted().join(",");
        let digest = Fingerprint::new()
            .field("providers", &self.inputs.providers)
            .field("boundary", &self.inputs.boundary)
            .field("network", &self.inputs.network)
            .field("mode", self.mode.to_string())
            .field("distance", self.distance.key())
            .field("radii", serde_json::to_string(self.radii)?)
            .field("hull", serde_json::to_string(self.hull)?)
            .field("quadrant_segments", self.quadrant_segments.to_string())
            .field("graph", serde_json::to_string(self.graph)?)
            .field("origins", origins)
            .finish();
        Ok(digest)
    }
}

/// reuses the layers of a previous run whose cell fingerprint matches and
/// whose layer files are still present.
#[derive(Debug, Default)]
pub struct CoverageCache {
    previous: Option<RunSummary>,
}

impl CoverageCache {
    /// loads the previous summary when reuse is enabled. an unreadable
    /// summary only disables reuse.
    pub fn open(summary_path: &Path, enabled: bool) -> CoverageCache {
        if !enabled || !summary_path.exists() {
            return CoverageCache::default();
        }
        match RunSummary::read(summary_path) {
            Ok(previous) => CoverageCache {
                previous: Some(previous),
            },
            Err(e) => {
                log::warn!("ignoring previous run summary, layers will be recomputed: {e}");
                CoverageCache::default()
            }
        }
    }

    pub fn lookup(
        &self,
        mode: TravelMode,
        distance: &DistanceThreshold,
        fingerprint: &str,
    ) -> Option<CoverageRecord> {
        let record = self.previous.as_ref()?.get(&mode, distance)?;
        if record.fingerprint.as_deref() != Some(fingerprint) {
            return None;
        }
        let present = Path::new(&record.coverage_path).is_file()
            && Path::new(&record.uncovered_path).is_file();
        if !present {
            log::warn!(
                "{mode} {distance}mi layers are listed in the previous summary but missing on disk"
            );
            return None;
        }
        Some(record.clone())
    }
}
