use super::DistanceThreshold;
use crate::model::CoverageError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// an inclusive range of distances in miles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for DistanceRange {
    fn default() -> Self {
        DistanceRange {
            start: 0.1,
            end: 1.0,
            step: 0.1,
        }
    }
}

/// the distances to compute coverage for, as an explicit list or a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DistanceSet {
    List { miles: Vec<f64> },
    Range(DistanceRange),
}

impl Default for DistanceSet {
    fn default() -> Self {
        DistanceSet::Range(DistanceRange::default())
    }
}

impl DistanceSet {
    /// selects the distance set from command line style arguments. a single
    /// distance wins over a list, and a list wins over the range.
    pub fn from_arguments(
        single: Option<f64>,
        list: Option<&str>,
        range: DistanceRange,
    ) -> Result<DistanceSet, CoverageError> {
        if let Some(miles) = single {
            return Ok(DistanceSet::List { miles: vec![miles] });
        }
        match list.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => {
                let miles = s
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| {
                        v.parse::<f64>().map_err(|e| {
                            CoverageError::InvalidConfiguration(format!(
                                "invalid distance '{v}' in list: {e}"
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DistanceSet::List { miles })
            }
            None => Ok(DistanceSet::Range(range)),
        }
    }

    /// the rounded, de-duplicated and sorted thresholds of this set.
    pub fn resolve(&self) -> Result<Vec<DistanceThreshold>, CoverageError> {
        let miles = match self {
            DistanceSet::List { miles } => miles.clone(),
            DistanceSet::Range(range) => range_values(range)?,
        };
        let thresholds = miles
            .into_iter()
            .map(DistanceThreshold::new)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .sorted()
            .dedup()
            .collect_vec();
        if thresholds.is_empty() {
            return Err(CoverageError::InvalidConfiguration(String::from(
                "distance set resolves to no distances",
            )));
        }
        Ok(thresholds)
    }
}

fn range_values(range: &DistanceRange) -> Result<Vec<f64>, CoverageError> {
    let DistanceRange { start, end, step } = *range;
    if !step.is_finite() || step <= 0.0 {
        return Err(CoverageError::InvalidConfiguration(format!(
            "distance step must be positive, found {step}"
        )));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(CoverageError::InvalidConfiguration(format!(
            "distance range [{start}, {end}] is not finite"
        )));
    }
    let mut values = vec![];
    let mut current = start;
    while current <= end + 1e-9 {
        values.push(current);
        current += step;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(set: &DistanceSet) -> Vec<String> {
        set.resolve().unwrap().iter().map(|d| d.key()).collect()
    }

    #[test]
    fn test_default_range() {
        let set = DistanceSet::default();
        assert_eq!(
            keys(&set),
            vec!["0.1", "0.2", "0.3", "0.4", "0.5", "0.6", "0.7", "0.8", "0.9", "1.0"]
        );
    }

    #[test]
    fn test_single_wins_over_list() {
        let set = DistanceSet::from_arguments(Some(0.46), Some("1,2"), DistanceRange::default())
            .unwrap();
        assert_eq!(keys(&set), vec!["0.5"]);
    }

    #[test]
    fn test_list_is_sorted_and_deduplicated() {
        let set = DistanceSet::from_arguments(None, Some(" 0.7, 0.1,0.14 ,"), DistanceRange::default())
            .unwrap();
        assert_eq!(keys(&set), vec!["0.1", "0.7"]);
    }

    #[test]
    fn test_blank_list_uses_range() {
        let range = DistanceRange {
            start: 0.5,
            end: 1.0,
            step: 0.25,
        };
        let set = DistanceSet::from_arguments(None, Some("  "), range).unwrap();
        assert_eq!(keys(&set), vec!["0.5", "0.8", "1.0"]);
    }

    #[test]
    fn test_invalid_sets() {
        let zero_step = DistanceSet::Range(DistanceRange {
            start: 0.1,
            end: 1.0,
            step: 0.0,
        });
        assert!(zero_step.resolve().is_err());
        let empty = DistanceSet::List { miles: vec![] };
        assert!(empty.resolve().is_err());
        let backwards = DistanceSet::Range(DistanceRange {
            start: 1.0,
            end: 0.5,
            step: 0.1,
        });
        assert!(backwards.resolve().is_err());
        assert!(DistanceSet::from_arguments(None, Some("0.1,x"), DistanceRange::default()).is_err());
    }
}
