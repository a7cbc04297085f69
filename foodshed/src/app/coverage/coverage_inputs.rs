use foodshed_osm::model::osm::OsmSource;
use std::path::PathBuf;

/// the files a coverage run reads and the directory it writes to
#[derive(Debug, Clone)]
pub struct CoverageInputs {
    /// provider table (CSV)
    pub providers: PathBuf,
    /// study-region boundary (GeoJSON, WGS84)
    pub boundary: PathBuf,
    pub network: OsmSource,
    pub output_dir: PathBuf,
}

impl CoverageInputs {
    pub fn network_path(&self) -> PathBuf {
        PathBuf::from(self.network.filepath())
    }
}
