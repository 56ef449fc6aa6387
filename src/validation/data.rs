//! Boundary checks for directive and reading payloads

use crate::core::{Degrees, GeoPosition, Meters, MAX_UTC_OFFSET_MINUTES};
use crate::validation::error::{AngleField, InputError};

/// Validates values before they enter a session
pub struct InputValidator;

impl InputValidator {
    pub fn validate_angle(field: AngleField, angle: Degrees) -> Result<f64, InputError> {
        if !angle.is_finite() {
            return Err(InputError::InvalidAngle {
                field,
                value: angle.value(),
            });
        }
        Ok(angle.value())
    }

    /// A reduced sight must leave a zenith distance in [0, 180)
    pub fn validate_zenith_distance(altitude: Degrees, zenith_distance: f64) -> Result<f64, InputError> {
        if !(0.0..180.0).contains(&zenith_distance) {
            return Err(InputError::InvalidAngle {
                field: AngleField::SextantAltitude,
                value: altitude.value(),
            });
        }
        Ok(zenith_distance)
    }

    /// Eye height above sea level; negative or non-finite heights are rejected
    pub fn validate_height(height: Meters) -> Result<f64, InputError> {
        let meters = height.value();
        if !meters.is_finite() || meters < 0.0 {
            return Err(InputError::InvalidHeight { meters });
        }
        Ok(meters)
    }

    pub fn validate_zone(minutes: i32) -> Result<i32, InputError> {
        if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&minutes) {
            return Err(InputError::InvalidZone { minutes });
        }
        Ok(minutes)
    }

    /// Latitude must already be on the sphere; longitude is wrapped
    pub fn validate_position(position: GeoPosition) -> Result<GeoPosition, InputError> {
        if !position.is_finite() || !(-90.0..=90.0).contains(&position.lat) {
            return Err(InputError::InvalidPosition {
                lat: position.lat,
                lon: position.lon,
            });
        }
        Ok(position.normalized())
    }
}
