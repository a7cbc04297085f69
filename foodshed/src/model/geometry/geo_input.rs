use crate::model::CoverageError;
use geo::{Geometry, MultiPolygon, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson};
use std::{path::Path, str::FromStr};

/// the shapes a boundary file may hold. collections contribute only their
/// first feature; any further features are ignored with a warning.
#[derive(Debug, Clone)]
pub enum GeoInput {
    Feature(Feature),
    FeatureCollection(FeatureCollection),
    Geometry(geojson::Geometry),
}

impl From<GeoJson> for GeoInput {
    fn from(value: GeoJson) -> Self {
        match value {
            GeoJson::Feature(f) => GeoInput::Feature(f),
            GeoJson::FeatureCollection(fc) => GeoInput::FeatureCollection(fc),
            GeoJson::Geometry(g) => GeoInput::Geometry(g),
        }
    }
}

impl FromStr for GeoInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let geojson = GeoJson::from_str(s).map_err(|e| format!("invalid GeoJSON: {e}"))?;
        Ok(GeoInput::from(geojson))
    }
}

impl GeoInput {
    pub fn from_path(path: &Path) -> Result<GeoInput, CoverageError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CoverageError::io(path, e))?;
        GeoInput::from_str(&contents).map_err(|reason| CoverageError::MalformedGeometry {
            path: path.display().to_string(),
            reason,
        })
    }

    /// extracts the polygonal area of this input, which must not be empty.
    pub fn normalize(&self) -> Result<MultiPolygon<f64>, String> {
        let polygons = self.polygons()?;
        if polygons.is_empty() {
            return Err(String::from("geometry holds no polygons"));
        }
        Ok(MultiPolygon::new(polygons))
    }

    /// all polygons of the input's (first) geometry, possibly none
    pub fn polygons(&self) -> Result<Vec<Polygon<f64>>, String> {
        let geometry = match self {
            GeoInput::Geometry(g) => g,
            GeoInput::Feature(f) => f
                .geometry
                .as_ref()
                .ok_or_else(|| String::from("feature has no geometry"))?,
            GeoInput::FeatureCollection(fc) => {
                if fc.features.len() > 1 {
                    log::warn!(
                        "feature collection has {} features, only the first is used",
                        fc.features.len()
                    );
                }
                fc.features
                    .first()
                    .ok_or_else(|| String::from("feature collection is empty"))?
                    .geometry
                    .as_ref()
                    .ok_or_else(|| String::from("first feature has no geometry"))?
            }
        };
        let geometry = Geometry::<f64>::try_from(geometry.value.clone())
            .map_err(|e| format!("unsupported geometry: {e}"))?;
        polygons_of(geometry)
    }
}

fn polygons_of(geometry: Geometry<f64>) -> Result<Vec<Polygon<f64>>, String> {
    match geometry {
        Geometry::Polygon(p) => Ok(vec![p]),
        Geometry::MultiPolygon(mp) => Ok(mp.0),
        Geometry::Rect(r) => Ok(vec![r.to_polygon()]),
        Geometry::Triangle(t) => Ok(vec![t.to_polygon()]),
        Geometry::GeometryCollection(gc) => {
            let nested = gc
                .0
                .into_iter()
                .map(polygons_of)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(nested.into_iter().flatten().collect())
        }
        Geometry::Point(_) => Err(String::from("expected a polygon, found a point")),
        Geometry::MultiPoint(_) => Err(String::from("expected a polygon, found a multipoint")),
        Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
            Err(String::from("expected a polygon, found a line"))
        }
    }
}

/// reads and normalizes a study-region boundary file into a geographic
/// multipolygon.
pub fn read_boundary(path: &Path) -> Result<MultiPolygon<f64>, CoverageError> {
    let input = GeoInput::from_path(path)?;
    input
        .normalize()
        .map_err(|reason| CoverageError::MalformedGeometry {
            path: path.display().to_string(),
            reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    const SQUARE: &str = r#"{"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}"#;
    const TRIANGLE: &str = r#"{"type": "Polygon", "coordinates": [[[5,5],[6,5],[5,6],[5,5]]]}"#;

    #[test]
    fn test_bare_geometry() {
        let mp = GeoInput::from_str(SQUARE).unwrap().normalize().unwrap();
        assert_eq!(mp.0.len(), 1);
        assert!((mp.unsigned_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_feature() {
        let s = format!(r#"{{"type": "Feature", "properties": {{}}, "geometry": {SQUARE}}}"#);
        let mp = GeoInput::from_str(&s).unwrap().normalize().unwrap();
        assert!((mp.unsigned_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_collection_uses_first_feature() {
        let s = format!(
            r#"{{"type": "FeatureCollection", "features": [
                {{"type": "Feature", "properties": {{}}, "geometry": {TRIANGLE}}},
                {{"type": "Feature", "properties": {{}}, "geometry": {SQUARE}}}
            ]}}"#
        );
        let mp = GeoInput::from_str(&s).unwrap().normalize().unwrap();
        assert!((mp.unsigned_area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_non_polygon_rejected() {
        let point = r#"{"type": "Point", "coordinates": [0, 0]}"#;
        assert!(GeoInput::from_str(point).unwrap().normalize().is_err());
        let empty = r#"{"type": "FeatureCollection", "features": []}"#;
        assert!(GeoInput::from_str(empty).unwrap().normalize().is_err());
    }

    #[test]
    fn test_read_boundary_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boundary.geojson");
        std::fs::write(&path, "{not json").unwrap();
        let result = read_boundary(&path);
        assert!(matches!(result, Err(CoverageError::MalformedGeometry { .. })));

        std::fs::write(&path, SQUARE).unwrap();
        assert!(read_boundary(&path).is_ok());
    }
}
