use super::CoverageRecord;
use crate::model::{distance::DistanceThreshold, CoverageError};
use foodshed_osm::model::TravelMode;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

pub const SUMMARY_FILENAME: &str = "network_coverage_summary.json";

/// the machine-readable record of a coverage run. records are keyed by mode
/// and then by the one-decimal distance key, e.g. `modes.walk["0.5"]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub distances_miles: Vec<f64>,
    pub provider_count: usize,
    pub modes: BTreeMap<TravelMode, BTreeMap<String, CoverageRecord>>,
    /// modes whose network could not be built, with the failure message
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub skipped_modes: BTreeMap<TravelMode, String>,
}

impl RunSummary {
    pub fn new(distances: &[DistanceThreshold], provider_count: usize) -> RunSummary {
        RunSummary {
            distances_miles: distances.iter().map(|d| d.miles()).collect(),
            provider_count,
            modes: BTreeMap::new(),
            skipped_modes: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, mode: TravelMode, distance: &DistanceThreshold, record: CoverageRecord) {
        self.modes
            .entry(mode)
            .or_default()
            .insert(distance.key(), record);
    }

    pub fn get(&self, mode: &TravelMode, distance: &DistanceThreshold) -> Option<&CoverageRecord> {
        self.modes.get(mode).and_then(|m| m.get(&distance.key()))
    }

    pub fn read(path: &Path) -> Result<RunSummary, CoverageError> {
        let file = File::open(path).map_err(|e| CoverageError::io(path, e))?;
        let summary = serde_json::from_reader(BufReader::new(file))?;
        Ok(summary)
    }

    /// writes the summary next to its final location and renames it into
    /// place, so readers never observe a partially written file.
    pub fn write(&self, path: &Path) -> Result<(), CoverageError> {
        let directory = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp =
            tempfile::NamedTempFile::new_in(directory).map_err(|e| CoverageError::io(path, e))?;
        serde_json::to_writer_pretty(&mut tmp, self)?;
        tmp.write_all(b"\n")
            .map_err(|e| CoverageError::io(path, e))?;
        tmp.persist(path)
            .map_err(|e| CoverageError::io(path, e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ratio: f64) -> CoverageRecord {
        CoverageRecord {
            coverage_path: String::from("out/walk_coverage_0.5mi.geojson"),
            uncovered_path: String::from("out/walk_uncovered_0.5mi.geojson"),
            unique_origin_nodes: 3,
            covered_area_sq_m: 10.0,
            uncovered_area_sq_m: 90.0,
            coverage_ratio: ratio,
            fingerprint: None,
        }
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SUMMARY_FILENAME);
        let half = DistanceThreshold::new(0.5).unwrap();
        let mut summary = RunSummary::new(&[half], 4);
        summary.insert(TravelMode::Walk, &half, record(0.1));
        summary
            .skipped_modes
            .insert(TravelMode::Drive, String::from("empty network"));
        summary.write(&path).unwrap();

        let read = RunSummary::read(&path).unwrap();
        assert_eq!(read, summary);
        assert_eq!(read.get(&TravelMode::Walk, &half), Some(&record(0.1)));
        assert!(read.get(&TravelMode::Drive, &half).is_none());
    }

    #[test]
    fn test_areas_read_back_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SUMMARY_FILENAME);
        let half = DistanceThreshold::new(0.5).unwrap();
        let mut summary = RunSummary::new(&[half], 1);
        let mut awkward = record(0.07124029745296551);
        awkward.covered_area_sq_m = 71237.20252965507;
        awkward.uncovered_area_sq_m = 928762.7974703449;
        summary.insert(TravelMode::Walk, &half, awkward.clone());
        summary.write(&path).unwrap();

        let read = RunSummary::read(&path).unwrap();
        let stored = read.get(&TravelMode::Walk, &half).unwrap();
        assert_eq!(
            stored.uncovered_area_sq_m.to_bits(),
            awkward.uncovered_area_sq_m.to_bits()
        );
        assert_eq!(stored, &awkward);
    }

    #[test]
    fn test_json_layout() {
        let half = DistanceThreshold::new(0.5).unwrap();
        let mut summary = RunSummary::new(&[half], 1);
        summary.insert(TravelMode::Walk, &half, record(0.1));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["distances_miles"][0], 0.5);
        assert_eq!(json["modes"]["walk"]["0.5"]["unique_origin_nodes"], 3);
        assert!(json.get("skipped_modes").is_none());
    }
}
