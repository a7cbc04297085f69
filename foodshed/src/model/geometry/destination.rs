use geo::{LineString, Polygon};

/// mean Earth radius in miles used for great-circle math
pub const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// the point reached by travelling `distance_miles` from (`lat`, `lon`)
/// along the initial bearing, on a spherical Earth. angles are in degrees.
///
/// # Returns
///
/// the destination as (longitude, latitude), longitude wrapped to [-180, 180)
pub fn destination_point(lat: f64, lon: f64, bearing_degrees: f64, distance_miles: f64) -> (f64, f64) {
    let delta = distance_miles / EARTH_RADIUS_MILES;
    let theta = bearing_degrees.to_radians();
    let phi1 = lat.to_radians();
    let lambda1 = lon.to_radians();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    let lon2 = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    (lon2, phi2.to_degrees())
}

/// the straight-line coverage circle around a location, traced with
/// `segments` great-circle destination points. used as the Euclidean
/// baseline against network coverage.
pub fn radius_polygon(lat: f64, lon: f64, distance_miles: f64, segments: usize) -> Polygon<f64> {
    let n = segments.max(4);
    let mut coords = (0..n)
        .map(|i| {
            let bearing = 360.0 * i as f64 / n as f64;
            destination_point(lat, lon, bearing, distance_miles)
        })
        .collect::<Vec<_>>();
    if let Some(first) = coords.first().cloned() {
        coords.push(first);
    }
    Polygon::new(LineString::from(coords), vec![])
}
