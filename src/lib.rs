//! Celestial Navigation Fix Computation
//!
//! Reduces timed sextant sights into circles of equal altitude and resolves
//! two or three of them into a position fix on a local plotting sheet.

pub mod core;
pub mod algorithms;
pub mod almanac;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use core::{Bearing, Degrees, Fix, FixMethod, GeoPosition, LineOfPosition, Meters, Observation};
pub use algorithms::{CoordinateProjector, FixSolver, SolverConfig};
pub use almanac::{AstronomicalModel, CatalogStar, ReferenceAlmanac};
pub use processing::{FixSession, Reading, SessionEvent, SessionHalt, SightLog};
pub use validation::{GeometryError, InputError};
pub use utils::{ConfigurationManager, FixConfig};
pub use api::{JsonFormatter, ReportBuilder, SessionReport, TextFormatter};
