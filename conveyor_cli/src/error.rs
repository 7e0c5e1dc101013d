//! CLI error type wrapping core, config and I/O failures.

use conveyor_core::CalcError;
use thiserror::Error;

/// Errors surfaced by the command-line front end
#[derive(Error, Debug)]
pub enum CliError {
    /// Calculation or reference table error from conveyor_core
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// Config file could not be read
    #[error("Cannot read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected shape
    #[error("Invalid config '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Log file could not be opened
    #[error("Cannot open log file '{path}': {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A global logger was already installed
    #[error("Logger initialization failed: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// Terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Structured core error, when there is one, for JSON error output
    pub fn calc_error(&self) -> Option<&CalcError> {
        match self {
            CliError::Calc(e) => Some(e),
            _ => None,
        }
    }
}
