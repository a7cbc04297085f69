use crate::model::{
    coverage::CoverageResult,
    distance::DistanceThreshold,
    geometry::{radius_polygon, union_all},
    provider::ProviderPoint,
    CoverageError,
};
use foodshed_osm::algorithm::projection::UtmZone;
use geo::{Geometry, MultiPolygon};

/// straight-line baseline: coverage of the boundary by a circle of the given
/// radius around every provider, ignoring the street network. areas are
/// measured in the UTM zone of the boundary.
pub fn euclidean_coverage(
    providers: &[ProviderPoint],
    boundary: &MultiPolygon<f64>,
    distance: &DistanceThreshold,
    segments: usize,
) -> Result<CoverageResult, CoverageError> {
    let zone = UtmZone::for_extent(&Geometry::MultiPolygon(boundary.clone()))?;
    let transformer = zone.transformer()?;
    let circles = providers
        .iter()
        .map(|p| {
            let circle = radius_polygon(p.latitude, p.longitude, distance.miles(), segments);
            let projected = transformer.project(&circle)?;
            Ok(MultiPolygon::new(vec![projected]))
        })
        .collect::<Result<Vec<_>, CoverageError>>()?;
    let coverage = union_all(circles, true);
    let boundary = transformer.project(boundary)?;
    Ok(CoverageResult::finalize(coverage.as_ref(), &boundary))
}
