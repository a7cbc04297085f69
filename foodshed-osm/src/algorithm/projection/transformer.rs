use super::UtmZone;
use crate::model::osm::OsmError;
use geo::{Coord, MapCoords};
use proj4rs::{proj::Proj, transform::transform};

const WGS84_PROJ_STRING: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// transforms coordinates between WGS84 longitude/latitude (degrees) and a
/// UTM zone (meters).
pub struct Transformer {
    zone: UtmZone,
    geographic: Proj,
    projected: Proj,
}

impl std::fmt::Debug for Transformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformer")
            .field("zone", &self.zone)
            .finish()
    }
}

impl Transformer {
    pub fn new(zone: &UtmZone) -> Result<Transformer, OsmError> {
        let geographic = Proj::from_proj_string(WGS84_PROJ_STRING).map_err(|e| {
            OsmError::ProjectionError(format!(
                "failed to build source PROJ.4 '{WGS84_PROJ_STRING}': {e:?}"
            ))
        })?;
        let proj_string = zone.proj_string();
        let projected = Proj::from_proj_string(&proj_string).map_err(|e| {
            OsmError::ProjectionError(format!(
                "failed to build target PROJ.4 '{proj_string}': {e:?}"
            ))
        })?;
        Ok(Transformer {
            zone: *zone,
            geographic,
            projected,
        })
    }

    pub fn zone(&self) -> UtmZone {
        self.zone
    }

    /// lon/lat degrees into UTM meters
    pub fn to_projected(&self, coord: Coord<f64>) -> Result<Coord<f64>, OsmError> {
        // proj4rs expects geographic coordinates in radians
        let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);
        transform(&self.geographic, &self.projected, &mut point).map_err(|e| {
            OsmError::ProjectionError(format!(
                "failed to project ({}, {}) into {}: {e:?}",
                coord.x, coord.y, self.zone
            ))
        })?;
        Ok(Coord {
            x: point.0,
            y: point.1,
        })
    }

    /// UTM meters back into lon/lat degrees
    pub fn to_geographic(&self, coord: Coord<f64>) -> Result<Coord<f64>, OsmError> {
        let mut point = (coord.x, coord.y, 0.0);
        transform(&self.projected, &self.geographic, &mut point).map_err(|e| {
            OsmError::ProjectionError(format!(
                "failed to unproject ({}, {}) from {}: {e:?}",
                coord.x, coord.y, self.zone
            ))
        })?;
        Ok(Coord {
            x: point.0.to_degrees(),
            y: point.1.to_degrees(),
        })
    }

    /// projects every coordinate of a geometry into the UTM zone
    pub fn project<G>(&self, geometry: &G) -> Result<G::Output, OsmError>
    where
        G: MapCoords<f64, f64>,
    {
        geometry.try_map_coords(|c| self.to_projected(c))
    }

    /// returns every coordinate of a projected geometry to lon/lat degrees
    pub fn unproject<G>(&self, geometry: &G) -> Result<G::Output, OsmError>
    where
        G: MapCoords<f64, f64>,
    {
        geometry.try_map_coords(|c| self.to_geographic(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Polygon};

    #[test]
    fn test_round_trip_atlanta() {
        let zone = UtmZone::from_lonlat(-84.39, 33.75).unwrap();
        let transformer = zone.transformer().unwrap();
        let geographic = Coord { x: -84.39, y: 33.75 };
        let projected = transformer.to_projected(geographic).unwrap();
        // zone 16N puts downtown Atlanta near x=740km, y=3737km
        assert!((projected.x - 740_000.0).abs() < 5_000.0, "{projected:?}");
        assert!((projected.y - 3_737_000.0).abs() < 5_000.0, "{projected:?}");
        let back = transformer.to_geographic(projected).unwrap();
        assert!((back.x - geographic.x).abs() < 1e-7);
        assert!((back.y - geographic.y).abs() < 1e-7);
    }

    #[test]
    fn test_project_polygon() {
        let zone = UtmZone::from_lonlat(-84.39, 33.75).unwrap();
        let transformer = zone.transformer().unwrap();
        let p: Polygon<f64> = polygon![
            (x: 740_000.0, y: 3_735_000.0),
            (x: 741_000.0, y: 3_735_000.0),
            (x: 741_000.0, y: 3_736_000.0),
            (x: 740_000.0, y: 3_736_000.0),
        ];
        let geographic = transformer.unproject(&p).unwrap();
        let projected = transformer.project(&geographic).unwrap();
        for (a, b) in p.exterior().coords().zip(projected.exterior().coords()) {
            assert!((a.x - b.x).abs() < 1e-3);
            assert!((a.y - b.y).abs() < 1e-3);
        }
    }
}
