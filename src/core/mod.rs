//! Core types, constants and angle arithmetic for sight reduction

pub mod types;
pub mod constants;
pub mod angles;
pub mod spherical;

pub use types::*;
pub use constants::*;
