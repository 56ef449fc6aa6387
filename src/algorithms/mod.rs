//! Plotting-sheet geometry and the fix solver

pub mod fix_solver;
pub mod planar;
pub mod projection;

pub use fix_solver::{FixSolver, SightLine, SolverConfig};
pub use planar::PlanarLine;
pub use projection::{CoordinateProjector, PlanarPoint};
