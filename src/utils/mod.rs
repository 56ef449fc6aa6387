//! Configuration file handling

pub mod config;

pub use config::{ConfigError, ConfigurationManager, FixConfig};
