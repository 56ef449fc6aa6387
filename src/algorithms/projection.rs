//! Local plane projection around a reference position
//!
//! Lines of position are linearized on a plotting sheet centred on the
//! dead-reckoning position. This module provides the sheet's coordinates:
//! - equirectangular: x grows east and is scaled by cos(reference latitude)
//! - y grows south (screen convention), `scale` units per degree of latitude
//! - longitude differences are taken the short way round the antimeridian
//!
//! The projection is only meaningful over a few degrees around the reference,
//! which is all a sight-reduction plot ever covers.

use crate::core::angles::longitude_difference;
use crate::core::{GeoPosition, POLAR_SINGULARITY_TOLERANCE};
use crate::validation::GeometryError;
use nalgebra::Vector2;

/// Point on the plotting sheet
pub type PlanarPoint = Vector2<f64>;

/// Forward/inverse transform between geographic and plotting-sheet coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateProjector {
    reference: GeoPosition,
    /// Planar units per degree of latitude
    scale: f64,
    /// Planar units per degree of longitude at the reference latitude
    lon_scale: f64,
}

impl CoordinateProjector {
    /// Build a projector centred on `reference`.
    ///
    /// Fails at the poles, where a degree of longitude has no length.
    pub fn new(reference: GeoPosition, scale: f64) -> Result<Self, GeometryError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(GeometryError::InvalidScale { scale });
        }

        let cos_lat = reference.lat.to_radians().cos();
        if !reference.is_finite() || cos_lat.abs() < POLAR_SINGULARITY_TOLERANCE {
            return Err(GeometryError::SingularProjection {
                latitude: reference.lat,
            });
        }

        Ok(Self {
            reference,
            scale,
            lon_scale: cos_lat * scale,
        })
    }

    pub fn reference(&self) -> GeoPosition {
        self.reference
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Geographic position to plotting-sheet coordinates
    pub fn forward(&self, geo: &GeoPosition) -> PlanarPoint {
        let dlon = longitude_difference(geo.lon, self.reference.lon);
        let dlat = geo.lat - self.reference.lat;
        Vector2::new(dlon * self.lon_scale, -dlat * self.scale)
    }

    /// Plotting-sheet coordinates back to a normalized geographic position
    pub fn inverse(&self, point: &PlanarPoint) -> GeoPosition {
        let lat = self.reference.lat - point.y / self.scale;
        let lon = self.reference.lon + point.x / self.lon_scale;
        GeoPosition::new(lat, lon).normalized()
    }

    /// Convert a planar length back to degrees of great-circle arc
    pub fn to_arc_degrees(&self, planar_length: f64) -> f64 {
        planar_length / self.scale
    }
}
