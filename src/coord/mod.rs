//! Coordinates, distances and proximity ranking
//!
//! This module handles:
//! - The `Coordinates` value type and its range validation
//! - Great-circle distance between two coordinates
//! - Ranking points of interest by distance from an origin

pub mod distance;
pub mod rank;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates without validation
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create new coordinates, rejecting values outside the valid ranges
    pub fn try_new(lat: f64, lng: f64) -> Result<Self> {
        let coords = Self::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(Error::InvalidCoordinates(format!(
                "Coordinates ({}, {}) are not finite numbers",
                self.lat, self.lng
            )));
        }
        if self.lat < -90.0 || self.lat > 90.0 {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if self.lng < -180.0 || self.lng > 180.0 {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(-90.0, -180.0).validate().is_ok());
        assert!(Coordinates::new(48.7758, 9.1829).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(matches!(
            Coordinates::new(90.5, 0.0).validate(),
            Err(Error::InvalidCoordinates(_))
        ));
        assert!(matches!(
            Coordinates::new(0.0, -180.1).validate(),
            Err(Error::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(Coordinates::try_new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::try_new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        let coords = Coordinates::new(48.7758, 9.1829);
        assert_eq!(coords.to_string(), "(48.775800, 9.182900)");
    }
}
