use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while applying a sight-log event to a session.
///
/// These describe bad or incomplete user input. Processing of the remaining
/// events stops, but lines of position built before the error stay valid.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum InputError {
    #[error("Missing date: a date directive must precede the first reading")]
    MissingDate,

    #[error("Failed to get information of {body} at {instant}")]
    UnknownBody { body: String, instant: String },

    #[error("Invalid {field} angle: {value}")]
    InvalidAngle { field: AngleField, value: f64 },

    #[error("Invalid eye height: {meters} m")]
    InvalidHeight { meters: f64 },

    #[error("Invalid time zone offset: {minutes} minutes")]
    InvalidZone { minutes: i32 },

    #[error("Invalid dead-reckoning position: {lat}, {lon}")]
    InvalidPosition { lat: f64, lon: f64 },

    #[error("Observation instant {date} {time} at offset {offset_minutes} min is not representable")]
    InvalidInstant {
        date: String,
        time: String,
        offset_minutes: i32,
    },
}

/// Which angle an [`InputError::InvalidAngle`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleField {
    IndexError,
    SextantAltitude,
}

impl std::fmt::Display for AngleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AngleField::IndexError => write!(f, "index error"),
            AngleField::SextantAltitude => write!(f, "sextant altitude"),
        }
    }
}

/// Errors raised while resolving a fix from lines of position.
///
/// A geometry error never alters the session it came from; adding or removing
/// observations and solving again is always allowed.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum GeometryError {
    #[error("Insufficient data: {available} line(s) of position with a usable azimuth, at least 2 required")]
    InsufficientData { available: usize },

    #[error("Unsupported line count: {count} lines of position, at most 3 supported")]
    UnsupportedCount { count: usize },

    #[error("Degenerate geometry: lines are parallel (cross product {cross:e})")]
    DegenerateGeometry { cross: f64 },

    #[error("Singular projection at reference latitude {latitude}")]
    SingularProjection { latitude: f64 },

    #[error("Invalid projection scale: {scale}")]
    InvalidScale { scale: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_messages() {
        assert_eq!(
            InputError::MissingDate.to_string(),
            "Missing date: a date directive must precede the first reading"
        );
        let err = InputError::InvalidAngle {
            field: AngleField::SextantAltitude,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "Invalid sextant altitude angle: NaN");
    }

    #[test]
    fn test_errors_are_distinct_error_types() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&InputError::MissingDate);
        assert_error(&GeometryError::SingularProjection { latitude: 90.0 });
    }
}
