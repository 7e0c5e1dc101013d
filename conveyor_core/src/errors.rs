//! # Error Types
//!
//! Structured error types for conveyor_core. The calculation functions clamp
//! out-of-range inputs instead of rejecting them, so with the standard
//! reference table these errors only surface when alternate reference data
//! is injected (empty rows, non-positive coefficients) or read from disk.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::errors::{CalcError, CalcResult};
//!
//! fn check_coefficient(k: f64) -> CalcResult<()> {
//!     if k <= 0.0 {
//!         return Err(CalcError::invalid_table("K must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_coefficient(-0.1).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for conveyor_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An interpolation table has no entries
    #[error("Empty table: {table}")]
    EmptyTable { table: String },

    /// Reference data violates a table invariant
    #[error("Invalid table: {reason}")]
    InvalidTable { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an EmptyTable error
    pub fn empty_table(table: impl Into<String>) -> Self {
        CalcError::EmptyTable { table: table.into() }
    }

    /// Create an InvalidTable error
    pub fn invalid_table(reason: impl Into<String>) -> Self {
        CalcError::InvalidTable { reason: reason.into() }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::EmptyTable { .. } => "EMPTY_TABLE",
            CalcError::InvalidTable { .. } => "INVALID_TABLE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
