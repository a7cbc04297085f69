use crate::model::{geometry::GeoInput, CoverageError};
use foodshed_osm::algorithm::projection::Transformer;
use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::json;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

/// writes a projected polygon as a WGS84 GeoJSON feature collection holding
/// a single feature whose `name` property is the file stem.
pub fn write_layer(
    path: &Path,
    polygon: &MultiPolygon<f64>,
    transformer: &Transformer,
) -> Result<(), CoverageError> {
    let geographic = transformer.unproject(polygon)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut properties = JsonObject::new();
    properties.insert(String::from("name"), json![name]);
    let feature = Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::from(&geo::Geometry::MultiPolygon(
            geographic,
        ))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    };
    let collection = FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    };
    let file = File::create(path).map_err(|e| CoverageError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &collection)?;
    writer.flush().map_err(|e| CoverageError::io(path, e))?;
    Ok(())
}

/// reads a layer back into a WGS84 multipolygon. an empty coverage layer
/// reads as a multipolygon with no parts.
pub fn read_layer(path: &Path) -> Result<MultiPolygon<f64>, CoverageError> {
    let layer_error = |reason: String| CoverageError::LayerReadError {
        path: path.display().to_string(),
        reason,
    };
    let contents = std::fs::read_to_string(path).map_err(|e| CoverageError::io(path, e))?;
    let input = GeoInput::from_str(&contents).map_err(layer_error)?;
    let polygons = input.polygons().map_err(layer_error)?;
    Ok(MultiPolygon::new(polygons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodshed_osm::algorithm::projection::UtmZone;
    use geo::{polygon, Area, Coord, CoordsIter};

    #[test]
    fn test_layer_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk_coverage_0.5mi.geojson");
        let transformer = UtmZone::new(16, true).unwrap().transformer().unwrap();
        let projected = MultiPolygon::new(vec![polygon![
            (x: 740_000.0, y: 3_735_000.0),
            (x: 741_000.0, y: 3_735_000.0),
            (x: 741_000.0, y: 3_736_000.0),
            (x: 740_000.0, y: 3_736_000.0),
        ]]);
        write_layer(&path, &projected, &transformer).unwrap();

        let geographic = read_layer(&path).unwrap();
        let first: Coord<f64> = geographic.coords_iter().next().unwrap();
        assert!((-85.0..-84.0).contains(&first.x));
        assert!((33.0..34.0).contains(&first.y));

        let reprojected = transformer.project(&geographic).unwrap();
        for (a, b) in projected.coords_iter().zip(reprojected.coords_iter()) {
            assert!((a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3);
        }
        assert!((reprojected.unsigned_area() - 1_000_000.0).abs() < 1.0);

        let contents = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["features"][0]["properties"]["name"], "walk_coverage_0.5mi");
    }

    #[test]
    fn test_empty_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drive_coverage_0.1mi.geojson");
        let transformer = UtmZone::new(16, true).unwrap().transformer().unwrap();
        write_layer(&path, &MultiPolygon::new(vec![]), &transformer).unwrap();
        assert!(read_layer(&path).unwrap().0.is_empty());
    }

    #[test]
    fn test_malformed_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk_coverage_0.1mi.geojson");
        std::fs::write(&path, "{\"type\": \"Point\", \"coordinates\": [0, 0]}").unwrap();
        assert!(matches!(
            read_layer(&path),
            Err(CoverageError::LayerReadError { .. })
        ));
    }
}
