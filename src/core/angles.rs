//! Degree normalization rules shared by the session, the solver and the projector

/// Wrap an angle into [0, 360)
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap a longitude into (-180, 180]
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = normalize_degrees(lon);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Normalize a latitude/longitude pair.
///
/// Latitudes past a pole are mirrored back onto the sphere and the longitude
/// is moved to the opposite meridian, so 95° N at 10° E becomes 85° N at
/// 170° W. The longitude always ends up in (-180, 180].
pub fn normalize_position(lat: f64, lon: f64) -> (f64, f64) {
    if (-90.0..=90.0).contains(&lat) {
        return (lat, normalize_longitude(lon));
    }

    let folded = (lat + 180.0).rem_euclid(360.0) - 180.0;
    let (lat, lon) = if folded > 90.0 {
        (180.0 - folded, lon + 180.0)
    } else if folded < -90.0 {
        (-180.0 - folded, lon + 180.0)
    } else {
        (folded, lon)
    };

    (lat, normalize_longitude(lon))
}

/// Signed difference `a - b` wrapped into (-180, 180]
pub fn longitude_difference(a: f64, b: f64) -> f64 {
    normalize_longitude(a - b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(370.5), 10.5);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-1e-17), 0.0);
    }

    #[test]
    fn test_normalize_longitude_boundaries() {
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(540.0), 180.0);
        assert_eq!(normalize_longitude(-37.0), -37.0);
    }

    #[test]
    fn test_latitude_overflow_is_mirrored() {
        let (lat, lon) = normalize_position(95.0, 10.0);
        assert!((lat - 85.0).abs() < 1e-12);
        assert!((lon - -170.0).abs() < 1e-12);

        let (lat, lon) = normalize_position(-100.0, -20.0);
        assert!((lat - -80.0).abs() < 1e-12);
        assert!((lon - 160.0).abs() < 1e-12);

        let (lat, lon) = normalize_position(95.0, 170.0);
        assert!((lat - 85.0).abs() < 1e-12);
        assert!((lon - -10.0).abs() < 1e-12);
    }

    #[test]
    fn test_in_range_latitude_untouched() {
        let (lat, lon) = normalize_position(29.7033, 323.0);
        assert_eq!(lat, 29.7033);
        assert!((lon - -37.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_turn_latitude() {
        // 270° of latitude is the same place as -90°
        let (lat, _) = normalize_position(270.0, 0.0);
        assert!((lat - -90.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_longitude_in_half_open_range(lon in -10_000.0f64..10_000.0) {
            let normalized = normalize_longitude(lon);
            prop_assert!(normalized > -180.0 && normalized <= 180.0);
        }

        #[test]
        fn prop_position_always_on_sphere(lat in -1_000.0f64..1_000.0, lon in -1_000.0f64..1_000.0) {
            let (lat, lon) = normalize_position(lat, lon);
            prop_assert!((-90.0..=90.0).contains(&lat));
            prop_assert!(lon > -180.0 && lon <= 180.0);
        }
    }
}
