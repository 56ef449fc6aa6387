use crate::algorithms::fix_solver::{FixSolver, SolverConfig};
use crate::almanac::{CatalogStar, ReferenceAlmanac};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Contents of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    /// Plotting-sheet scale and solver tolerances
    pub solver: SolverConfig,
    /// Stars added to, or replacing entries of, the built-in catalog
    pub catalog: Vec<CatalogStar>,
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("Failed to access config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of validating a configuration
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

/// Loads, validates and saves the configuration file
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    config: FixConfig,
    config_file_path: Option<PathBuf>,
    is_modified: bool,
}

impl ConfigurationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &FixConfig {
        &self.config
    }

    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Replace the whole configuration after validating it
    pub fn update_config(&mut self, config: FixConfig) -> Result<(), ConfigError> {
        Self::into_first_error(self.validate_config(&config))?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref().to_path_buf();

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let config: FixConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Serialization {
                path: path.clone(),
                source,
            })?;

        let validation = self.validate_config(&config);
        for warning in &validation.warnings {
            log::warn!("{}: {}", path.display(), warning);
        }
        Self::into_first_error(validation)?;

        self.config = config;
        self.config_file_path = Some(path);
        self.is_modified = false;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref().to_path_buf();

        let content =
            serde_json::to_string_pretty(&self.config).map_err(|source| ConfigError::Serialization {
                path: path.clone(),
                source,
            })?;

        fs::write(&path, content).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        self.config_file_path = Some(path);
        self.is_modified = false;
        Ok(())
    }

    /// Save back to the file the configuration was loaded from
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::InvalidParameter {
                parameter: "config_file_path".to_string(),
                value: "none".to_string(),
                reason: "no file has been loaded or saved yet".to_string(),
            }),
        }
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<f64, ConfigError> {
        let mut config = self.config.clone();
        config.solver.scale = scale;
        self.update_config(config)?;
        Ok(scale)
    }

    pub fn set_parallel_tolerance(&mut self, tolerance: f64) -> Result<f64, ConfigError> {
        let mut config = self.config.clone();
        config.solver.parallel_tolerance = tolerance;
        self.update_config(config)?;
        Ok(tolerance)
    }

    pub fn add_catalog_star(&mut self, star: CatalogStar) -> Result<(), ConfigError> {
        let mut config = self.config.clone();
        config.catalog.retain(|existing| !existing.name.eq_ignore_ascii_case(&star.name));
        config.catalog.push(star);
        self.update_config(config)
    }

    /// Built-in almanac with this configuration's catalog applied
    pub fn build_almanac(&self) -> ReferenceAlmanac {
        let mut almanac = ReferenceAlmanac::new();
        almanac.extend_catalog(&self.config.catalog);
        almanac
    }

    pub fn build_solver(&self) -> FixSolver {
        FixSolver::with_config(self.config.solver)
    }

    pub fn validate_config(&self, config: &FixConfig) -> ValidationResult {
        let mut result = ValidationResult::default();
        let solver = &config.solver;

        if !solver.scale.is_finite() || solver.scale <= 0.0 {
            result.errors.push(invalid("solver.scale", solver.scale, "must be a positive number"));
        }
        if !solver.parallel_tolerance.is_finite()
            || solver.parallel_tolerance <= 0.0
            || solver.parallel_tolerance >= 1.0
        {
            result.errors.push(invalid(
                "solver.parallel_tolerance",
                solver.parallel_tolerance,
                "must lie strictly between 0 and 1",
            ));
        }
        if !solver.concurrency_tolerance.is_finite() || solver.concurrency_tolerance < 0.0 {
            result.errors.push(invalid(
                "solver.concurrency_tolerance",
                solver.concurrency_tolerance,
                "must be zero or positive",
            ));
        }
        if solver.parallel_tolerance > 1e-3 && solver.parallel_tolerance < 1.0 {
            result.warnings.push(format!(
                "parallel tolerance {} rejects lines crossing at less than {:.2}°",
                solver.parallel_tolerance,
                solver.parallel_tolerance.asin().to_degrees()
            ));
        }

        let mut seen = HashSet::new();
        for star in &config.catalog {
            let name = star.name.trim();
            if name.is_empty() {
                result.errors.push(invalid("catalog.name", "\"\"", "star name must not be empty"));
                continue;
            }
            if !seen.insert(name.to_lowercase()) {
                result.warnings.push(format!("star '{}' listed more than once, last entry wins", name));
            }
            let sha = star.sha.value();
            if !sha.is_finite() || !(0.0..360.0).contains(&sha) {
                result.errors.push(invalid(&format!("catalog.{}.sha", name), sha, "must lie in [0, 360)"));
            }
            let dec = star.dec.value();
            if !dec.is_finite() || !(-90.0..=90.0).contains(&dec) {
                result.errors.push(invalid(&format!("catalog.{}.dec", name), dec, "must lie in [-90, 90]"));
            }
        }

        result.is_valid = result.errors.is_empty();
        result
    }

    fn into_first_error(validation: ValidationResult) -> Result<(), ConfigError> {
        match validation.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
