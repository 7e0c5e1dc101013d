//! TOML configuration for the CLI.
//!
//! A missing config file is not an error; every field has a default.
//!
//! ```toml
//! log_level = "debug"
//! log_file = "conveyor_calculator.log"
//! table_path = ""
//!
//! [defaults]
//! width_mm = 800.0
//! trough_deg = 20.0
//! surcharge_deg = 20.0
//! speed_mps = 1.5
//! density_tpm3 = 1.6
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Input values used when an argument or prompt is left blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub width_mm: f64,
    pub trough_deg: f64,
    pub surcharge_deg: f64,
    pub speed_mps: f64,
    pub density_tpm3: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            width_mm: 800.0,
            trough_deg: conveyor_core::labels::DEFAULT_TROUGH_DEG,
            surcharge_deg: 20.0,
            speed_mps: 1.5,
            density_tpm3: 1.6,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: Option<String>,
    /// Log file path; empty logs to stderr
    pub log_file: String,
    /// Alternate K-factor table (JSON); empty uses the standard table
    pub table_path: String,
    pub defaults: Defaults,
}

impl Config {
    /// Log file path, if configured
    pub fn log_file(&self) -> Option<PathBuf> {
        non_empty_path(&self.log_file)
    }

    /// Alternate K-factor table path, if configured
    pub fn table_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.table_path)
    }
}

fn non_empty_path(s: &str) -> Option<PathBuf> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// Load the config file, or defaults when it does not exist.
pub fn load_or_default(path: &Path) -> Result<Config, CliError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    parse(&content).map_err(|source| CliError::ConfigParse {
        path: path.display().to_string(),
        source,
    })
}

fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}
