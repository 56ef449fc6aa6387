//! Physical constants and solver defaults

/// Arc minutes in one degree
pub const ARC_MINUTES_PER_DEGREE: f64 = 60.0;

/// Nautical miles per degree of great-circle arc
pub const NAUTICAL_MILES_PER_DEGREE: f64 = 60.0;

/// Largest UTC offset accepted from a zone directive (minutes)
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Default planar units per degree of arc
pub const DEFAULT_PROJECTION_SCALE: f64 = 1.0;

/// Cross product of two unit directions below which lines count as parallel
pub const DEFAULT_PARALLEL_TOLERANCE: f64 = 1e-9;

/// Triangle edge length (planar units) below which three lines count as concurrent
pub const DEFAULT_CONCURRENCY_TOLERANCE: f64 = 1e-12;

/// |cos(latitude)| below which the longitude scale of the projection is singular
pub const POLAR_SINGULARITY_TOLERANCE: f64 = 1e-12;
