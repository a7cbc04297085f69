use crate::model::CoverageError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt::Display, str::FromStr};
use uom::si::{
    f64::Length,
    length::{meter, mile},
};

/// a positive travel distance in miles, rounded to one decimal place. the
/// rounded value is the lookup key shared by the layer writer and any
/// consumer resolving a layer, so two distances name the same layer exactly
/// when their keys are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DistanceThreshold {
    tenths_of_mile: u32,
}

impl DistanceThreshold {
    /// rounds to one decimal place, half away from zero
    pub fn new(miles: f64) -> Result<DistanceThreshold, CoverageError> {
        if !miles.is_finite() || miles < 0.0 {
            return Err(CoverageError::InvalidConfiguration(format!(
                "distance must be a positive number of miles, found {miles}"
            )));
        }
        let tenths = (miles * 10.0).round();
        if tenths < 1.0 || tenths > u32::MAX as f64 {
            return Err(CoverageError::InvalidConfiguration(format!(
                "distance {miles} mi does not round to a positive tenth of a mile"
            )));
        }
        Ok(DistanceThreshold {
            tenths_of_mile: tenths as u32,
        })
    }

    pub fn miles(&self) -> f64 {
        self.tenths_of_mile as f64 / 10.0
    }

    pub fn length(&self) -> Length {
        Length::new::<mile>(self.miles())
    }

    pub fn meters(&self) -> f64 {
        self.length().get::<meter>()
    }

    /// the one-decimal string used in file names and summary keys, e.g. "0.5"
    pub fn key(&self) -> String {
        format!("{:.1}", self.miles())
    }
}

impl Display for DistanceThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for DistanceThreshold {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let miles = s.trim().parse::<f64>().map_err(|e| {
            CoverageError::InvalidConfiguration(format!("invalid distance '{s}': {e}"))
        })?;
        DistanceThreshold::new(miles)
    }
}

impl Serialize for DistanceThreshold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.miles())
    }
}

impl<'de> Deserialize<'de> for DistanceThreshold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let miles = f64::deserialize(deserializer)?;
        DistanceThreshold::new(miles).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_shares_key() {
        let a = DistanceThreshold::new(0.5).unwrap();
        let b = DistanceThreshold::new(0.54).unwrap();
        let c = DistanceThreshold::new(0.45).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.key(), "0.5");
        assert_eq!(DistanceThreshold::new(1.0).unwrap().key(), "1.0");
        assert_eq!(DistanceThreshold::new(0.30000000000000004).unwrap().key(), "0.3");
    }

    #[test]
    fn test_meters() {
        let d = DistanceThreshold::new(1.0).unwrap();
        assert!((d.meters() - 1609.344).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_distances() {
        assert!(DistanceThreshold::new(0.0).is_err());
        assert!(DistanceThreshold::new(0.04).is_err());
        assert!(DistanceThreshold::new(-1.0).is_err());
        assert!(DistanceThreshold::new(f64::NAN).is_err());
        assert!("abc".parse::<DistanceThreshold>().is_err());
        assert_eq!("0.7".parse::<DistanceThreshold>().unwrap().key(), "0.7");
    }
}
