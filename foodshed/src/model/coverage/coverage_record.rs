use super::CoverageResult;
use serde::{Deserialize, Serialize};

/// the summary entry for one mode and distance. written once and never
/// used for further computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRecord {
    pub coverage_path: String,
    pub uncovered_path: String,
    pub unique_origin_nodes: usize,
    pub covered_area_sq_m: f64,
    pub uncovered_area_sq_m: f64,
    pub coverage_ratio: f64,
    /// input fingerprint of the cell, used to reuse layers across runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl CoverageRecord {
    pub fn new(
        result: &CoverageResult,
        coverage_path: String,
        uncovered_path: String,
        unique_origin_nodes: usize,
        fingerprint: Option<String>,
    ) -> CoverageRecord {
        CoverageRecord {
            coverage_path,
            uncovered_path,
            unique_origin_nodes,
            covered_area_sq_m: result.covered_area_sq_m,
            uncovered_area_sq_m: result.uncovered_area_sq_m,
            coverage_ratio: result.coverage_ratio,
            fingerprint,
        }
    }
}
