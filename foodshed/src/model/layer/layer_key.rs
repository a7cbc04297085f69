use crate::model::{distance::DistanceThreshold, CoverageError};
use foodshed_osm::model::TravelMode;
use regex::{Regex, RegexBuilder};
use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

/// the two layers written for every mode and distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    Coverage,
    Uncovered,
}

impl Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Coverage => write!(f, "coverage"),
            LayerKind::Uncovered => write!(f, "uncovered"),
        }
    }
}

impl FromStr for LayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coverage" => Ok(LayerKind::Coverage),
            "uncovered" => Ok(LayerKind::Uncovered),
            other => Err(format!("unknown layer kind '{other}'")),
        }
    }
}

/// identifies the layers of one (mode, distance) cell and owns their file
/// naming, e.g. `walk_coverage_0.5mi.geojson`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerKey {
    pub mode: TravelMode,
    pub distance: DistanceThreshold,
}

impl LayerKey {
    /// a pattern matching layer file names
    pub const FILENAME_REGEX: &str =
        r"^(?P<mode>[a-z]+)_(?P<kind>coverage|uncovered)_(?P<distance>\d+\.\d)mi\.geojson$";

    pub fn new(mode: TravelMode, distance: DistanceThreshold) -> LayerKey {
        LayerKey { mode, distance }
    }

    /// file name without extension, also used as the layer's `name` property
    pub fn stem(&self, kind: LayerKind) -> String {
        format!("{}_{}_{}mi", self.mode, kind, self.distance.key())
    }

    pub fn filename(&self, kind: LayerKind) -> String {
        format!("{}.geojson", self.stem(kind))
    }

    pub fn path(&self, directory: &Path, kind: LayerKind) -> PathBuf {
        directory.join(self.filename(kind))
    }

    pub fn filename_regex() -> Result<Regex, CoverageError> {
        RegexBuilder::new(Self::FILENAME_REGEX)
            .build()
            .map_err(|e| CoverageError::InternalError(format!("invalid layer pattern: {e}")))
    }

    /// parses a layer file name. names that do not follow the layer naming
    /// pattern, or that name an unknown mode, are not layers.
    pub fn parse_filename(regex: &Regex, filename: &str) -> Option<(LayerKey, LayerKind)> {
        let captures = regex.captures(filename)?;
        let mode = TravelMode::from_str(&captures["mode"]).ok()?;
        let kind = LayerKind::from_str(&captures["kind"]).ok()?;
        let distance = DistanceThreshold::from_str(&captures["distance"]).ok()?;
        Some((LayerKey::new(mode, distance), kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames() {
        let key = LayerKey::new(TravelMode::Drive, DistanceThreshold::new(1.0).unwrap());
        assert_eq!(key.filename(LayerKind::Coverage), "drive_coverage_1.0mi.geojson");
        assert_eq!(key.stem(LayerKind::Uncovered), "drive_uncovered_1.0mi");
        assert_eq!(
            key.path(Path::new("coverage_layers"), LayerKind::Uncovered),
            PathBuf::from("coverage_layers/drive_uncovered_1.0mi.geojson")
        );
    }

    #[test]
    fn test_parse_filename() {
        let regex = LayerKey::filename_regex().unwrap();
        let key = LayerKey::new(TravelMode::Walk, DistanceThreshold::new(0.3).unwrap());
        let parsed = LayerKey::parse_filename(&regex, &key.filename(LayerKind::Coverage));
        assert_eq!(parsed, Some((key, LayerKind::Coverage)));
        assert!(LayerKey::parse_filename(&regex, "bike_coverage_0.3mi.geojson").is_none());
        assert!(LayerKey::parse_filename(&regex, "walk_coverage_0.3mi.json").is_none());
        assert!(LayerKey::parse_filename(&regex, "network_coverage_summary.json").is_none());
    }
}
