//! Astronomical model consumed by sight reduction
//!
//! The session only ever asks the questions below. Everything is in degrees
//! on a spherical earth, and every query is a pure function of its arguments.

pub mod reference;

pub use reference::{CatalogStar, ReferenceAlmanac};

use crate::core::{BodyPosition, GeoPosition, Meters};
use chrono::{DateTime, Utc};

pub trait AstronomicalModel {
    /// SHA and declination of a named body, `None` if the body is unknown
    fn body(&self, name: &str, instant: DateTime<Utc>) -> Option<BodyPosition>;

    /// Greenwich hour angle of the first point of Aries
    fn earth_rotation_angle(&self, instant: DateTime<Utc>) -> f64;

    /// Dip of the sea horizon for an eye height above sea level
    fn dip(&self, height: Meters) -> f64;

    /// Atmospheric refraction at an apparent altitude
    fn refraction(&self, apparent_altitude: f64) -> f64;

    /// Initial great-circle bearing from one position to another, [0, 360)
    fn initial_azimuth(&self, from: &GeoPosition, to: &GeoPosition) -> f64;
}

impl<M: AstronomicalModel + ?Sized> AstronomicalModel for &M {
    fn body(&self, name: &str, instant: DateTime<Utc>) -> Option<BodyPosition> {
        (**self).body(name, instant)
    }

    fn earth_rotation_angle(&self, instant: DateTime<Utc>) -> f64 {
        (**self).earth_rotation_angle(instant)
    }

    fn dip(&self, height: Meters) -> f64 {
        (**self).dip(height)
    }

    fn refraction(&self, apparent_altitude: f64) -> f64 {
        (**self).refraction(apparent_altitude)
    }

    fn initial_azimuth(&self, from: &GeoPosition, to: &GeoPosition) -> f64 {
        (**self).initial_azimuth(from, to)
    }
}
