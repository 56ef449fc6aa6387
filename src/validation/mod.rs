//! Input validation and the two error families

pub mod data;
pub mod error;

pub use data::InputValidator;
pub use error::{AngleField, GeometryError, InputError};
