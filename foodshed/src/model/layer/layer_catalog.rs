use super::{LayerKey, LayerKind};
use crate::model::{
    coverage::{CoverageRecord, RunSummary},
    distance::DistanceThreshold,
    CoverageError,
};
use foodshed_osm::model::TravelMode;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// file locations of one (mode, distance) cell. a discovered directory may
/// be missing either file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPaths {
    pub coverage: Option<PathBuf>,
    pub uncovered: Option<PathBuf>,
}

impl LayerPaths {
    fn set(&mut self, kind: LayerKind, path: PathBuf) {
        match kind {
            LayerKind::Coverage => self.coverage = Some(path),
            LayerKind::Uncovered => self.uncovered = Some(path),
        }
    }
}

/// consumer-side lookup of precomputed layers by mode and distance. distances
/// are matched through the same one-decimal rounding used when writing, so
/// 0.54 resolves the layers written for 0.5.
#[derive(Debug, Clone, Default)]
pub struct LayerCatalog {
    layers: BTreeMap<LayerKey, LayerPaths>,
    summary: Option<RunSummary>,
}

impl LayerCatalog {
    /// catalogs the layers recorded in a run summary
    pub fn from_summary(summary_path: &Path) -> Result<LayerCatalog, CoverageError> {
        let summary = RunSummary::read(summary_path)?;
        let mut layers = BTreeMap::new();
        for (mode, records) in summary.modes.iter() {
            for (distance_key, record) in records.iter() {
                let distance = distance_key.parse::<DistanceThreshold>()?;
                let paths = LayerPaths {
                    coverage: Some(PathBuf::from(&record.coverage_path)),
                    uncovered: Some(PathBuf::from(&record.uncovered_path)),
                };
                layers.insert(LayerKey::new(*mode, distance), paths);
            }
        }
        Ok(LayerCatalog {
            layers,
            summary: Some(summary),
        })
    }

    /// catalogs the layer files of a directory by their file names
    pub fn discover(directory: &Path) -> Result<LayerCatalog, CoverageError> {
        let regex = LayerKey::filename_regex()?;
        let entries = std::fs::read_dir(directory).map_err(|e| CoverageError::io(directory, e))?;
        let mut layers: BTreeMap<LayerKey, LayerPaths> = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|e| CoverageError::io(directory, e))?;
            let filename = entry.file_name();
            let Some(name) = filename.to_str() else {
                continue;
            };
            if let Some((key, kind)) = LayerKey::parse_filename(&regex, name) {
                layers.entry(key).or_default().set(kind, entry.path());
            }
        }
        log::debug!(
            "discovered {} coverage cells in {}",
            layers.len(),
            directory.display()
        );
        Ok(LayerCatalog {
            layers,
            summary: None,
        })
    }

    /// layer paths for a mode and distance in miles, if that cell exists. a
    /// distance that does not round to a positive tenth of a mile has no cell.
    pub fn lookup(&self, mode: TravelMode, distance_miles: f64) -> Option<&LayerPaths> {
        let distance = DistanceThreshold::new(distance_miles).ok()?;
        self.layers.get(&LayerKey::new(mode, distance))
    }

    /// the summary record of a cell, when the catalog was opened from a summary
    pub fn record(&self, mode: TravelMode, distance: &DistanceThreshold) -> Option<&CoverageRecord> {
        self.summary.as_ref().and_then(|s| s.get(&mode, distance))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&LayerKey, &LayerPaths)> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::coverage::SUMMARY_FILENAME;

    fn record(dir: &Path, key: &LayerKey) -> CoverageRecord {
        CoverageRecord {
            coverage_path: key.path(dir, LayerKind::Coverage).display().to_string(),
            uncovered_path: key.path(dir, LayerKind::Uncovered).display().to_string(),
            unique_origin_nodes: 1,
            covered_area_sq_m: 1.0,
            uncovered_area_sq_m: 1.0,
            coverage_ratio: 0.5,
            fingerprint: None,
        }
    }

    #[test]
    fn test_lookup_through_summary() {
        let dir = tempfile::tempdir().unwrap();
        let half = DistanceThreshold::new(0.5).unwrap();
        let key = LayerKey::new(TravelMode::Walk, half);
        let mut summary = RunSummary::new(&[half], 2);
        summary.insert(TravelMode::Walk, &half, record(dir.path(), &key));
        let summary_path = dir.path().join(SUMMARY_FILENAME);
        summary.write(&summary_path).unwrap();

        let catalog = LayerCatalog::from_summary(&summary_path).unwrap();
        let paths = catalog.lookup(TravelMode::Walk, 0.54).unwrap();
        assert_eq!(
            paths.coverage,
            Some(key.path(dir.path(), LayerKind::Coverage))
        );
        assert!(catalog.lookup(TravelMode::Drive, 0.5).is_none());
        assert_eq!(catalog.record(TravelMode::Walk, &half).map(|r| r.coverage_ratio), Some(0.5));
    }

    #[test]
    fn test_discover_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "walk_coverage_0.5mi.geojson",
            "walk_uncovered_0.5mi.geojson",
            "drive_coverage_1.0mi.geojson",
            "notes.txt",
        ] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let catalog = LayerCatalog::discover(dir.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        let walk = catalog.lookup(TravelMode::Walk, 0.5).unwrap();
        assert!(walk.coverage.is_some() && walk.uncovered.is_some());
        let drive = catalog.lookup(TravelMode::Drive, 1.0).unwrap();
        assert!(drive.uncovered.is_none());
        assert!(catalog.record(TravelMode::Walk, &DistanceThreshold::new(0.5).unwrap()).is_none());
    }

    #[test]
    fn test_lookup_below_smallest_distance_has_no_layer() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("walk_coverage_0.1mi.geojson"), "{}").unwrap();
        let catalog = LayerCatalog::discover(dir.path()).unwrap();
        assert!(catalog.lookup(TravelMode::Walk, 0.1).is_some());
        assert!(catalog.lookup(TravelMode::Walk, 0.04).is_none());
        assert!(catalog.lookup(TravelMode::Walk, 0.0).is_none());
        assert!(catalog.lookup(TravelMode::Walk, -1.0).is_none());
        assert!(catalog.lookup(TravelMode::Walk, f64::NAN).is_none());
    }
}
