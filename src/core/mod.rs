use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

use crate::docs::ExtractError;

/// Error types for the `confdoc` tool.
///
/// Covers loading the tool configuration, extracting the documentation model
/// and writing it out.
#[derive(Error, Debug)]
pub enum ConfdocError {
    /// Configuration file parsed but holds invalid values
    #[error("invalid configuration in '{component}': {details}")]
    InvalidConfig {
        /// Section or step that rejected the configuration
        component: String,
        /// Validation error details
        details: String,
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

    /// Import operation error with file context
    #[error("failed to import '{path}': {details}")]
    ImportError {
        /// Path of file being imported
        path: PathBuf,
        /// Import error details
        details: String,
    },

    /// Documentation model extraction failed
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Documentation model could not be serialized
    #[error("failed to serialize documentation model: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A specialized `Result` type for `confdoc` operations.
pub type Result<T> = result::Result<T, ConfdocError>;

impl ConfdocError {
    /// Creates a TOML parsing error with optional file path context.
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ConfdocError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an import error with file path context.
    pub fn import(error: impl fmt::Display, path: &Path) -> Self {
        let clean_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        ConfdocError::ImportError {
            path: clean_path,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error carrying the path it happened on.
    pub fn io(error: impl fmt::Display, path: &Path) -> Self {
        ConfdocError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
