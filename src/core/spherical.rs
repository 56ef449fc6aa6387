//! Spherical-earth helpers, degrees in and degrees out.
//!
//! Every conversion to radians happens here through `f64::to_radians`.

use crate::core::angles::normalize_degrees;
use crate::core::GeoPosition;

/// Great-circle central angle between two positions (haversine), in degrees
pub fn central_angle(a: &GeoPosition, b: &GeoPosition) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    (2.0 * h.sqrt().atan2((1.0 - h).sqrt())).to_degrees()
}

/// Initial great-circle bearing from `from` to `to`, degrees in [0, 360)
pub fn initial_bearing(from: &GeoPosition, to: &GeoPosition) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlon = (to.lon - from.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Altitude of a body above the horizon of `observer`, given its ground point
pub fn altitude(observer: &GeoPosition, ground_point: &GeoPosition) -> f64 {
    90.0 - central_angle(observer, ground_point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_central_angle_along_meridian() {
        let a = GeoPosition::new(10.0, 20.0);
        let b = GeoPosition::new(25.5, 20.0);
        assert!((central_angle(&a, &b) - 15.5).abs() < 1e-9);
    }

    #[test]
    fn test_central_angle_along_equator_across_antimeridian() {
        let a = GeoPosition::new(0.0, 179.0);
        let b = GeoPosition::new(0.0, -179.0);
        assert!((central_angle(&a, &b) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_central_angle_antipodal() {
        let a = GeoPosition::new(30.0, 40.0);
        let b = GeoPosition::new(-30.0, -140.0);
        assert!((central_angle(&a, &b) - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_initial_bearing_cardinal_directions() {
        let origin = GeoPosition::new(0.0, 0.0);
        assert!(initial_bearing(&origin, &GeoPosition::new(10.0, 0.0)).abs() < 1e-9);
        assert!((initial_bearing(&origin, &GeoPosition::new(0.0, 10.0)) - 90.0).abs() < 1e-9);
        assert!((initial_bearing(&origin, &GeoPosition::new(-10.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((initial_bearing(&origin, &GeoPosition::new(0.0, -10.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_altitude_of_body_overhead() {
        let gp = GeoPosition::new(12.0, -45.0);
        assert!((altitude(&gp, &gp) - 90.0).abs() < 1e-9);
    }
}
