use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

/// Error types for the Spindle application.
///
/// Covers configuration loading, parsing and validation. Playback
/// failures are reported separately as
/// [`EngineError`](crate::services::playback::EngineError).
#[derive(Error, Debug)]
pub enum SpindleError {
    /// Configuration field missing or invalid
    #[error("invalid config field '{field}' in {component}: {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Component containing the field
        component: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },
}

/// A specialized `Result` type for Spindle operations.
pub type Result<T> = result::Result<T, SpindleError>;

impl SpindleError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        SpindleError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error with file path context.
    pub fn io(error: impl fmt::Display, path: &Path) -> Self {
        SpindleError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(component: &str, field: &str, reason: impl Into<String>) -> Self {
        SpindleError::InvalidConfigField {
            field: field.to_string(),
            component: component.to_string(),
            reason: reason.into(),
        }
    }
}
