//! Fixed-epoch reference almanac
//!
//! A small stand-in for a real ephemeris, good to roughly a minute of arc for
//! a few years around its epoch:
//! - star places are fixed apparent SHA/Dec (epoch 2018.9) and may be overridden
//! - Aries GHA from the IAU 1982 mean sidereal time polynomial
//! - dip 1.76'·√h, refraction from Bennett's formula
//!
//! Sessions work with any [`AstronomicalModel`]; this one backs the command
//! line tool and the integration tests.

use crate::almanac::AstronomicalModel;
use crate::core::angles::normalize_degrees;
use crate::core::spherical::initial_bearing;
use crate::core::{BodyPosition, Degrees, GeoPosition, Meters, ARC_MINUTES_PER_DEGREE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unix time of the J2000.0 epoch, 2000-01-01T12:00:00Z
const J2000_UNIX_SECONDS: f64 = 946_728_000.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Lowest altitude Bennett's formula is evaluated at
const MIN_REFRACTION_ALTITUDE: f64 = -1.0;

/// Catalog entry, as it appears in the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStar {
    pub name: String,
    pub sha: Degrees,
    pub dec: Degrees,
}

/// Navigational stars: name, SHA (deg, arcmin), Dec (deg, arcmin)
const NAVIGATIONAL_STARS: &[(&str, (f64, f64), (f64, f64))] = &[
    ("Achernar", (335.0, 23.5), (-57.0, 8.7)),
    ("Aldebaran", (290.0, 44.8), (16.0, 32.7)),
    ("Altair", (62.0, 4.8), (8.0, 55.3)),
    ("Antares", (112.0, 22.1), (-26.0, 28.2)),
    ("Arcturus", (145.0, 52.7), (19.0, 5.3)),
    ("Betelgeuse", (270.0, 57.1), (7.0, 24.5)),
    ("Canopus", (263.0, 54.1), (-52.0, 42.2)),
    ("Capella", (280.0, 28.6), (46.0, 0.8)),
    ("Deneb", (49.0, 29.1), (45.0, 21.2)),
    ("Dubhe", (193.0, 47.5), (61.0, 38.8)),
    ("Fomalhaut", (15.0, 19.8), (-29.0, 31.5)),
    ("Pollux", (243.0, 23.1), (27.0, 58.7)),
    ("Procyon", (244.0, 55.8), (5.0, 10.5)),
    ("Regulus", (207.0, 39.7), (11.0, 52.5)),
    ("Rigel", (281.0, 8.2), (-8.0, 10.9)),
    ("Sirius", (258.0, 30.3), (-16.0, 44.5)),
    ("Spica", (158.0, 27.7), (-11.0, 15.3)),
    ("Vega", (80.0, 36.8), (38.0, 48.4)),
];

/// Star catalog plus closed-form corrections
#[derive(Debug, Clone, Default)]
pub struct ReferenceAlmanac {
    stars: HashMap<String, BodyPosition>,
}

impl ReferenceAlmanac {
    /// Almanac preloaded with the navigational stars
    pub fn new() -> Self {
        let mut almanac = Self::empty();
        for (name, (sha_deg, sha_min), (dec_deg, dec_min)) in NAVIGATIONAL_STARS {
            almanac.insert(
                name,
                BodyPosition {
                    sha: Degrees::from_dm(*sha_deg, *sha_min).value(),
                    dec: Degrees::from_dm(*dec_deg, *dec_min).value(),
                },
            );
        }
        almanac
    }

    /// Almanac with no stars at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace a star; names are matched case-insensitively
    pub fn insert(&mut self, name: &str, position: BodyPosition) {
        self.stars.insert(Self::key(name), position);
    }

    pub fn with_star(mut self, name: &str, position: BodyPosition) -> Self {
        self.insert(name, position);
        self
    }

    /// Apply catalog overrides from configuration
    pub fn extend_catalog(&mut self, catalog: &[CatalogStar]) {
        for star in catalog {
            self.insert(
                &star.name,
                BodyPosition {
                    sha: star.sha.value(),
                    dec: star.dec.value(),
                },
            );
        }
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stars.contains_key(&Self::key(name))
    }

    /// Greenwich mean sidereal time in degrees, i.e. GHA of Aries
    pub fn mean_sidereal_angle(instant: DateTime<Utc>) -> f64 {
        let seconds = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
        let days = (seconds - J2000_UNIX_SECONDS) / SECONDS_PER_DAY;
        let centuries = days / DAYS_PER_CENTURY;

        let gmst = 280.460_618_37 + 360.985_647_366_29 * days + 0.000_387_933 * centuries * centuries
            - centuries * centuries * centuries / 38_710_000.0;
        normalize_degrees(gmst)
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

impl AstronomicalModel for ReferenceAlmanac {
    fn body(&self, name: &str, _instant: DateTime<Utc>) -> Option<BodyPosition> {
        self.stars.get(&Self::key(name)).copied()
    }

    fn earth_rotation_angle(&self, instant: DateTime<Utc>) -> f64 {
        Self::mean_sidereal_angle(instant)
    }

    fn dip(&self, height: Meters) -> f64 {
        1.76 * height.value().max(0.0).sqrt() / ARC_MINUTES_PER_DEGREE
    }

    fn refraction(&self, apparent_altitude: f64) -> f64 {
        let h = apparent_altitude.max(MIN_REFRACTION_ALTITUDE);
        let arc_minutes = 1.0 / (h + 7.31 / (h + 4.4)).to_radians().tan();
        arc_minutes.max(0.0) / ARC_MINUTES_PER_DEGREE
    }

    fn initial_azimuth(&self, from: &GeoPosition, to: &GeoPosition) -> f64 {
        initial_bearing(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builtin_catalog_lookup_ignores_case() {
        let almanac = ReferenceAlmanac::new();
        let instant = Utc.with_ymd_and_hms(2018, 11, 15, 8, 30, 0).unwrap();

        let dubhe = almanac.body("dubhe", instant).unwrap();
        assert!((dubhe.sha - (193.0 + 47.5 / 60.0)).abs() < 1e-9);
        assert!((dubhe.dec - (61.0 + 38.8 / 60.0)).abs() < 1e-9);
        assert!(almanac.body("  DUBHE ", instant).is_some());
        assert!(almanac.body("Nibiru", instant).is_none());
        assert_eq!(almanac.star_count(), NAVIGATIONAL_STARS.len());
    }

    #[test]
    fn test_southern_declination_sign() {
        let almanac = ReferenceAlmanac::new();
        let instant = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        let sirius = almanac.body("Sirius", instant).unwrap();
        assert!((sirius.dec - -(16.0 + 44.5 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_catalog_override() {
        let mut almanac = ReferenceAlmanac::empty();
        almanac.extend_catalog(&[CatalogStar {
            name: "Kochab".to_string(),
            sha: Degrees(137.3),
            dec: Degrees(74.05),
        }]);
        assert!(almanac.contains("kochab"));
        assert_eq!(almanac.star_count(), 1);
    }

    #[test]
    fn test_sidereal_angle_at_j2000() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((ReferenceAlmanac::mean_sidereal_angle(epoch) - 280.460_618_37).abs() < 1e-9);
    }

    #[test]
    fn test_sidereal_angle_matches_almanac_daily_page() {
        // GHA Aries, 2018 November 15: 0h 54°01.9', 8h 174°21.6'
        let midnight = Utc.with_ymd_and_hms(2018, 11, 15, 0, 0, 0).unwrap();
        let morning = Utc.with_ymd_and_hms(2018, 11, 15, 8, 0, 0).unwrap();
        let one_minute = 1.0 / 60.0;
        assert!((ReferenceAlmanac::mean_sidereal_angle(midnight) - (54.0 + 1.9 / 60.0)).abs() < one_minute);
        assert!((ReferenceAlmanac::mean_sidereal_angle(morning) - (174.0 + 21.6 / 60.0)).abs() < one_minute);
    }

    #[test]
    fn test_sidereal_angle_advances_about_a_degree_a_day() {
        let start = Utc.with_ymd_and_hms(2018, 11, 15, 0, 0, 0).unwrap();
        let next = Utc.with_ymd_and_hms(2018, 11, 16, 0, 0, 0).unwrap();
        let gained = normalize_degrees(
            ReferenceAlmanac::mean_sidereal_angle(next) - ReferenceAlmanac::mean_sidereal_angle(start),
        );
        assert!((gained - 0.985_647).abs() < 1e-5);
    }

    #[test]
    fn test_dip_for_two_meters() {
        let dip = ReferenceAlmanac::new().dip(Meters(2.0));
        assert!((dip * 60.0 - 2.489).abs() < 1e-3);
        assert_eq!(ReferenceAlmanac::new().dip(Meters(0.0)), 0.0);
    }

    #[test]
    fn test_refraction_values() {
        let almanac = ReferenceAlmanac::new();
        assert!((almanac.refraction(0.0) * 60.0 - 34.5).abs() < 0.2);
        assert!((almanac.refraction(45.0) * 60.0 - 1.0).abs() < 0.02);
        assert!(almanac.refraction(90.0) >= 0.0);
        assert!(almanac.refraction(10.0) > almanac.refraction(20.0));
    }
}
