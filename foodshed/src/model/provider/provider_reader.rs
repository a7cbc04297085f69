use super::{ProviderColumns, ProviderPoint};
use crate::model::CoverageError;
use std::{collections::HashMap, path::Path};

/// reads the provider table, dropping rows whose coordinates are missing,
/// non-numeric or non-finite.
pub fn read_providers(
    path: &Path,
    columns: &ProviderColumns,
) -> Result<Vec<ProviderPoint>, CoverageError> {
    let read_error = |reason: String| CoverageError::ProviderReadError {
        path: path.display().to_string(),
        reason,
    };
    let mut reader = csv::Reader::from_path(path).map_err(|e| read_error(e.to_string()))?;
    let header_record = reader
        .headers()
        .map_err(|e| read_error(e.to_string()))?
        .clone();
    let header_lookup = header_record
        .iter()
        .enumerate()
        .map(|(i, s)| (s.trim(), i))
        .collect::<HashMap<_, _>>();
    let lat_idx = *header_lookup
        .get(columns.latitude.as_str())
        .ok_or_else(|| read_error(format!("missing `{}` column", columns.latitude)))?;
    let lon_idx = *header_lookup
        .get(columns.longitude.as_str())
        .ok_or_else(|| read_error(format!("missing `{}` column", columns.longitude)))?;
    let name_idx = header_lookup.get(columns.name.as_str()).cloned();
    let id_idx = columns
        .id
        .as_ref()
        .and_then(|c| header_lookup.get(c.as_str()).cloned());

    let mut providers = vec![];
    let mut dropped = 0;
    for (row_idx, row) in reader.records().enumerate() {
        let record = row.map_err(|e| read_error(format!("row {row_idx}: {e}")))?;
        let coordinate = |idx: usize| {
            record
                .get(idx)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };
        let (latitude, longitude) = match (coordinate(lat_idx), coordinate(lon_idx)) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                log::debug!("dropping provider row {row_idx} without usable coordinates");
                dropped += 1;
                continue;
            }
        };
        let id = id_idx
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .unwrap_or_else(|| row_idx.to_string());
        let name = name_idx
            .and_then(|idx| record.get(idx))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let attributes = header_record
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(idx, _)| {
                *idx != lat_idx && *idx != lon_idx && Some(*idx) != name_idx && Some(*idx) != id_idx
            })
            .map(|(_, (k, v))| (k.to_string(), v.to_string()))
            .collect();
        providers.push(ProviderPoint {
            id,
            name,
            latitude,
            longitude,
            attributes,
        });
    }
    if dropped > 0 {
        log::warn!(
            "dropped {dropped} provider rows with missing or non-numeric coordinates from {}",
            path.display()
        );
    }
    log::info!("read {} providers from {}", providers.len(), path.display());
    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_providers_drops_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("providers.csv");
        let csv = "\
license_number,company_name,latitude,longitude,type
A1,Corner Market,33.75,-84.39,grocery
A2,No Coordinates,,-84.39,grocery
,Farm Stand,33.76,-84.38,farmers market
A4,Bad Number,north,-84.38,grocery
A5,Infinite,inf,-84.38,grocery
";
        std::fs::write(&path, csv).unwrap();
        let providers = read_providers(&path, &ProviderColumns::default()).unwrap();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].id, "A1");
        assert_eq!(providers[0].name.as_deref(), Some("Corner Market"));
        assert_eq!(providers[0].attributes.get("type").map(String::as_str), Some("grocery"));
        assert_eq!(providers[0].attributes.len(), 1);
        // falls back to the row index when the id is blank
        assert_eq!(providers[1].id, "2");
        assert_eq!(providers[1].point().x(), -84.38);
    }

    #[test]
    fn test_missing_coordinate_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("providers.csv");
        std::fs::write(&path, "name,lat,lon\nA,1,2\n").unwrap();
        let result = read_providers(&path, &ProviderColumns::default());
        assert!(matches!(result, Err(CoverageError::ProviderReadError { .. })));
    }
}
