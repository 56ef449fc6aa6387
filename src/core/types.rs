//! Core data types for sight reduction and position fixing

use crate::core::angles;
use crate::core::constants::ARC_MINUTES_PER_DEGREE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Angle in decimal degrees.
///
/// Angles arriving from a sight log (sextant altitude, index error) are
/// already converted to degrees before they reach a session.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Build from whole degrees plus arc minutes, e.g. `55° 18.4'`
    pub fn from_dm(degrees: f64, minutes: f64) -> Self {
        let sign = if degrees < 0.0 { -1.0 } else { 1.0 };
        Self(degrees + sign * minutes / ARC_MINUTES_PER_DEGREE)
    }

    pub fn from_arc_minutes(minutes: f64) -> Self {
        Self(minutes / ARC_MINUTES_PER_DEGREE)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl From<f64> for Degrees {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl Meters {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Position on the spherical earth in decimal degrees (north and east positive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPosition {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Apply the pole-mirror rule and wrap longitude into (-180, 180]
    pub fn normalized(self) -> Self {
        let (lat, lon) = angles::normalize_position(self.lat, self.lon);
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// Sidereal hour angle and declination of a body at an instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub sha: f64,
    pub dec: f64,
}

/// A sextant reading with its absolute UTC instant resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub body: String,
    pub instant: DateTime<Utc>,
    pub altitude: Degrees,
}

/// Great-circle bearing, tied to the position it was measured from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bearing {
    pub degrees: f64,
    pub from: GeoPosition,
}

/// Intermediate values of one sight reduction, all in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reduction {
    pub sha: f64,
    pub dec: f64,
    /// Greenwich hour angle of Aries at the observation instant
    pub aries_gha: f64,
    pub gha: f64,
    pub index: Option<f64>,
    pub dip: Option<f64>,
    /// Apparent altitude: sextant altitude after index and dip
    pub ha: f64,
    pub refraction: f64,
    /// Observed altitude: Ha after refraction
    pub ho: f64,
}

/// Circle of equal altitude produced from one observation.
///
/// Built once by a session and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOfPosition {
    observation: Observation,
    center: GeoPosition,
    radius: f64,
    azimuth: Option<Bearing>,
    reduction: Reduction,
}

impl LineOfPosition {
    pub(crate) fn new(
        observation: Observation,
        center: GeoPosition,
        reduction: Reduction,
        azimuth: Option<Bearing>,
    ) -> Self {
        Self {
            observation,
            center,
            radius: 90.0 - reduction.ho,
            azimuth,
            reduction,
        }
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    pub fn body(&self) -> &str {
        &self.observation.body
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.observation.instant
    }

    /// Ground point of the body at the observation instant
    pub fn center(&self) -> GeoPosition {
        self.center
    }

    /// Zenith distance in degrees
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn reduction(&self) -> &Reduction {
        &self.reduction
    }

    pub fn azimuth(&self) -> Option<&Bearing> {
        self.azimuth.as_ref()
    }

    /// Azimuth to the ground point, only if it was measured from `reference`
    pub fn azimuth_from(&self, reference: &GeoPosition) -> Option<f64> {
        self.azimuth
            .filter(|bearing| bearing.from == *reference)
            .map(|bearing| bearing.degrees)
    }
}

/// How a fix was resolved from its lines of position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FixMethod {
    /// Intersection of two lines
    TwoLines,
    /// Incenter of the triangle formed by three lines
    CockedHat { inscribed_radius_nm: f64 },
}

/// Geographic position fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub position: GeoPosition,
    pub method: FixMethod,
    pub lines_used: usize,
}
