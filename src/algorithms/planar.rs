//! Plotting-sheet geometry: lines, intersections and the cocked-hat incenter

use crate::algorithms::projection::PlanarPoint;
use crate::validation::GeometryError;
use nalgebra::{Matrix2, Vector2};

/// 2D cross product (z component of the 3D cross product)
pub fn cross(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Infinite line through a point with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarLine {
    point: PlanarPoint,
    direction: Vector2<f64>,
}

impl PlanarLine {
    /// Line through `point` along `direction`; the direction is normalized
    pub fn new(point: PlanarPoint, direction: Vector2<f64>) -> Result<Self, GeometryError> {
        let length = direction.norm();
        if !length.is_finite() || length == 0.0 || !point.iter().all(|v| v.is_finite()) {
            return Err(GeometryError::DegenerateGeometry { cross: 0.0 });
        }
        Ok(Self {
            point,
            direction: direction / length,
        })
    }

    /// Line through two distinct points
    pub fn through(a: PlanarPoint, b: PlanarPoint) -> Result<Self, GeometryError> {
        Self::new(a, b - a)
    }

    pub fn point(&self) -> PlanarPoint {
        self.point
    }

    pub fn direction(&self) -> Vector2<f64> {
        self.direction
    }

    /// Point at signed distance `t` along the line
    pub fn at(&self, t: f64) -> PlanarPoint {
        self.point + self.direction * t
    }

    /// Perpendicular distance from `p` to the line
    pub fn distance_to(&self, p: &PlanarPoint) -> f64 {
        cross(&self.direction, &(p - self.point)).abs()
    }

    /// Intersection with another line.
    ///
    /// Solves `p1 + t1·d1 = p2 + t2·d2` for the two line parameters. Lines
    /// whose unit directions have a cross product below `parallel_tolerance`
    /// are reported as degenerate instead of producing a far-away point.
    pub fn intersection_with(
        &self,
        other: &PlanarLine,
        parallel_tolerance: f64,
    ) -> Result<PlanarPoint, GeometryError> {
        let det = cross(&self.direction, &other.direction);
        if !det.is_finite() || det.abs() < parallel_tolerance {
            return Err(GeometryError::DegenerateGeometry { cross: det });
        }

        let system = Matrix2::from_columns(&[self.direction, -other.direction]);
        let params = system
            .try_inverse()
            .map(|inverse| inverse * (other.point - self.point))
            .ok_or(GeometryError::DegenerateGeometry { cross: det })?;

        Ok(self.at(params.x))
    }
}

/// Center of the circle inscribed in triangle `abc`.
///
/// Each bisector leaves its vertex along the sum of the two unit edge
/// directions pointing away from that vertex; the bisectors from `a` and `b`
/// meet at the incenter. A triangle collapsed to a point within
/// `concurrency_tolerance` returns that point.
pub fn inscribed_circle_center(
    a: PlanarPoint,
    b: PlanarPoint,
    c: PlanarPoint,
    concurrency_tolerance: f64,
    parallel_tolerance: f64,
) -> Result<PlanarPoint, GeometryError> {
    let edges = [(b - a).norm(), (c - b).norm(), (a - c).norm()];
    let longest = edges.iter().cloned().fold(0.0, f64::max);
    let shortest = edges.iter().cloned().fold(f64::INFINITY, f64::min);

    if longest < concurrency_tolerance {
        return Ok((a + b + c) / 3.0);
    }
    if shortest < concurrency_tolerance {
        // Two corners coincide but the third does not: not a triangle
        return Err(GeometryError::DegenerateGeometry { cross: 0.0 });
    }

    let a_dir = (c - a).normalize() + (b - a).normalize();
    let b_dir = (a - b).normalize() + (c - b).normalize();

    let a_bisector = PlanarLine::new(a, a_dir)?;
    let b_bisector = PlanarLine::new(b, b_dir)?;
    a_bisector.intersection_with(&b_bisector, parallel_tolerance)
}
