use crate::model::geometry::{difference, intersection};
use geo::{Area, MultiPolygon};

/// coverage and uncovered regions of a study boundary for one mode and
/// distance, with their planar areas in square meters.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageResult {
    /// the coverage polygon clipped to the boundary
    pub coverage: MultiPolygon<f64>,
    /// the boundary minus the coverage polygon
    pub uncovered: MultiPolygon<f64>,
    pub covered_area_sq_m: f64,
    pub uncovered_area_sq_m: f64,
    pub boundary_area_sq_m: f64,
    /// covered share of the boundary area in [0, 1]
    pub coverage_ratio: f64,
}

impl CoverageResult {
    /// clips a coverage polygon to the boundary and derives the uncovered
    /// region. without coverage the whole boundary is uncovered.
    pub fn finalize(
        coverage: Option<&MultiPolygon<f64>>,
        boundary: &MultiPolygon<f64>,
    ) -> CoverageResult {
        let clipped = intersection(coverage, boundary);
        let uncovered = difference(boundary, clipped.as_ref());
        let coverage = clipped.unwrap_or_else(|| MultiPolygon::new(vec![]));

        let boundary_area_sq_m = boundary.unsigned_area();
        let covered_area_sq_m = coverage.unsigned_area();
        let uncovered_area_sq_m = uncovered.unsigned_area();
        let coverage_ratio = if boundary_area_sq_m > 0.0 {
            (covered_area_sq_m / boundary_area_sq_m).clamp(0.0, 1.0)
        } else {
            0.0
        };
        CoverageResult {
            coverage,
            uncovered,
            covered_area_sq_m,
            uncovered_area_sq_m,
            boundary_area_sq_m,
            coverage_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Polygon};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]
    }

    fn boundary() -> MultiPolygon<f64> {
        MultiPolygon::new(vec![rect(0.0, 0.0, 1000.0, 1000.0)])
    }

    #[test]
    fn test_partition_of_boundary() {
        // half inside, half outside the boundary
        let coverage = MultiPolygon::new(vec![rect(500.0, 250.0, 1500.0, 750.0)]);
        let result = CoverageResult::finalize(Some(&coverage), &boundary());
        assert!((result.covered_area_sq_m - 250_000.0).abs() < 1e-6);
        let total = result.covered_area_sq_m + result.uncovered_area_sq_m;
        assert!((total - result.boundary_area_sq_m).abs() / result.boundary_area_sq_m < 1e-6);
        assert!((result.coverage_ratio - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_no_coverage_leaves_boundary_uncovered() {
        let result = CoverageResult::finalize(None, &boundary());
        assert_eq!(result.uncovered, boundary());
        assert!(result.coverage.0.is_empty());
        assert_eq!(result.coverage_ratio, 0.0);
    }

    #[test]
    fn test_full_coverage_ratio_bounded() {
        let coverage = MultiPolygon::new(vec![rect(-10.0, -10.0, 1010.0, 1010.0)]);
        let result = CoverageResult::finalize(Some(&coverage), &boundary());
        assert!(result.coverage_ratio <= 1.0);
        assert!((result.coverage_ratio - 1.0).abs() < 1e-9);
        assert!(result.uncovered_area_sq_m.abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_boundary() {
        let empty = MultiPolygon::new(vec![]);
        let coverage = MultiPolygon::new(vec![rect(0.0, 0.0, 1.0, 1.0)]);
        let result = CoverageResult::finalize(Some(&coverage), &empty);
        assert_eq!(result.coverage_ratio, 0.0);
    }
}
