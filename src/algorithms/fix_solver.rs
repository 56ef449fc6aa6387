//! Position fix from two or three lines of position
//!
//! Each circle of equal altitude is replaced by its tangent line near the
//! reference (dead-reckoning) position, the intercept method:
//! - range offset = distance(reference, ground point) - zenith distance
//! - a positive offset means the observer is farther from the ground point
//!   than the sight allows, so the line is moved toward the body
//! - the line runs perpendicular to the azimuth through the offset point
//!
//! Two lines give their intersection. Three lines give the incenter of the
//! cocked hat, the point equidistant from all three.

use crate::algorithms::planar::{inscribed_circle_center, PlanarLine};
use crate::algorithms::projection::{CoordinateProjector, PlanarPoint};
use crate::core::spherical::central_angle;
use crate::core::{
    Fix, FixMethod, GeoPosition, LineOfPosition, DEFAULT_CONCURRENCY_TOLERANCE,
    DEFAULT_PARALLEL_TOLERANCE, DEFAULT_PROJECTION_SCALE, NAUTICAL_MILES_PER_DEGREE,
};
use crate::validation::GeometryError;
use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Solver tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Planar units per degree of arc on the plotting sheet
    pub scale: f64,
    /// Minimum |cross product| of unit directions for two lines to intersect
    pub parallel_tolerance: f64,
    /// Cocked-hat size (planar units) below which the lines count as concurrent
    pub concurrency_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_PROJECTION_SCALE,
            parallel_tolerance: DEFAULT_PARALLEL_TOLERANCE,
            concurrency_tolerance: DEFAULT_CONCURRENCY_TOLERANCE,
        }
    }
}

/// The parts of a line of position the solver needs, azimuth already resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightLine {
    pub center: GeoPosition,
    /// Zenith distance in degrees
    pub radius: f64,
    /// Bearing from the reference position to `center`, degrees
    pub azimuth: f64,
}

impl SightLine {
    /// Solver input for `line`, if its azimuth was measured from `reference`
    pub fn from_line(line: &LineOfPosition, reference: &GeoPosition) -> Option<Self> {
        line.azimuth_from(reference).map(|azimuth| Self {
            center: line.center(),
            radius: line.radius(),
            azimuth,
        })
    }
}

/// Intercept-method fix solver
#[derive(Debug, Clone, Default)]
pub struct FixSolver {
    config: SolverConfig,
}

impl FixSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Great-circle distance from `reference` to the ground point minus the
    /// zenith distance, in degrees. Positive: move toward the body.
    pub fn range_offset(reference: &GeoPosition, sight: &SightLine) -> f64 {
        central_angle(reference, &sight.center) - sight.radius
    }

    /// Unit vector on the plotting sheet pointing along `azimuth`
    pub fn azimuth_unit(azimuth: f64) -> Vector2<f64> {
        let angle = azimuth.to_radians();
        // North is up, which is negative y on the sheet
        Vector2::new(angle.sin(), -angle.cos())
    }

    /// Tangent line of one circle of equal altitude on the plotting sheet
    pub fn planar_line(
        &self,
        projector: &CoordinateProjector,
        sight: &SightLine,
    ) -> Result<PlanarLine, GeometryError> {
        let reference = projector.reference();
        let origin = projector.forward(&reference);
        let toward_body = Self::azimuth_unit(sight.azimuth);
        let offset = Self::range_offset(&reference, sight);

        let point = origin + toward_body * offset * projector.scale();
        PlanarLine::new(point, Vector2::new(-toward_body.y, toward_body.x))
    }

    /// Fix from the lines of position whose azimuth was measured from `reference`.
    ///
    /// Lines without an azimuth, or with one measured from a different
    /// reference, do not take part.
    pub fn solve_lines(
        &self,
        reference: GeoPosition,
        lines: &[LineOfPosition],
    ) -> Result<Fix, GeometryError> {
        let sights: Vec<SightLine> = lines
            .iter()
            .filter_map(|line| SightLine::from_line(line, &reference))
            .collect();

        if sights.len() < lines.len() {
            debug!(
                "{} of {} lines of position have no azimuth from {}",
                lines.len() - sights.len(),
                lines.len(),
                reference
            );
        }

        self.solve(reference, &sights)
    }

    /// Fix from two or three sight lines around `reference`
    pub fn solve(&self, reference: GeoPosition, sights: &[SightLine]) -> Result<Fix, GeometryError> {
        match sights.len() {
            0 | 1 => {
                return Err(GeometryError::InsufficientData {
                    available: sights.len(),
                })
            }
            2 | 3 => {}
            count => return Err(GeometryError::UnsupportedCount { count }),
        }

        let projector = CoordinateProjector::new(reference, self.config.scale)?;
        let lines = sights
            .iter()
            .map(|sight| self.planar_line(&projector, sight))
            .collect::<Result<Vec<_>, _>>()?;

        let (point, method) = match lines.as_slice() {
            [a, b] => (
                a.intersection_with(b, self.config.parallel_tolerance)?,
                FixMethod::TwoLines,
            ),
            [a, b, c] => self.resolve_cocked_hat(&projector, a, b, c)?,
            _ => {
                return Err(GeometryError::UnsupportedCount { count: lines.len() });
            }
        };

        let position = projector.inverse(&point);
        debug!("Fix from {} lines: {} ({:?})", lines.len(), position, method);

        Ok(Fix {
            position,
            method,
            lines_used: lines.len(),
        })
    }

    fn resolve_cocked_hat(
        &self,
        projector: &CoordinateProjector,
        a: &PlanarLine,
        b: &PlanarLine,
        c: &PlanarLine,
    ) -> Result<(PlanarPoint, FixMethod), GeometryError> {
        let tolerance = self.config.parallel_tolerance;
        let ab = a.intersection_with(b, tolerance)?;
        let bc = b.intersection_with(c, tolerance)?;
        let ca = c.intersection_with(a, tolerance)?;

        let center = inscribed_circle_center(
            ab,
            bc,
            ca,
            self.config.concurrency_tolerance,
            tolerance,
        )?;

        let inscribed_radius = projector.to_arc_degrees(a.distance_to(&center));
        Ok((
            center,
            FixMethod::CockedHat {
                inscribed_radius_nm: inscribed_radius * NAUTICAL_MILES_PER_DEGREE,
            },
        ))
    }
}
