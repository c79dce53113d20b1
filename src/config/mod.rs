//! Settings of the documentation tool itself.
//!
//! Loaded from TOML, with `imports = ["@file"]` support. Every section and
//! field has a default, so an empty or missing file is valid.

mod loading;
mod paths;


use std::path::PathBuf;

pub use paths::ConfigPaths;
use serde::{Deserialize, Serialize};

use crate::{
    ConfdocError, Result,
    schema::{CategoryOverrides, LogFormat, LogLevel},
};

/// Tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Logging settings.
    #[serde(default)]
    pub general: GeneralSettings,

    /// Where and how the model is written.
    #[serde(default)]
    pub output: OutputSettings,

    /// Category reassignments keyed by flag name.
    #[serde(default, skip_serializing_if = "CategoryOverrides::is_empty")]
    pub categories: CategoryOverrides,
}

/// Logging settings, overridden by `RUST_LOG` and `CONFDOC_LOG_FORMAT`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Minimum level of emitted log lines.
    pub log_level: LogLevel,
    /// Encoding of emitted log lines.
    pub log_format: LogFormat,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Destination file; standard output when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Indent the emitted JSON.
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: None,
            pretty: true,
        }
    }
}

impl DocsConfig {
    /// Rejects values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfdocError::InvalidConfig` for an empty output path or an
    /// empty flag name in `[categories]`.
    pub fn validate(&self) -> Result<()> {
        if self
            .output
            .path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfdocError::InvalidConfig {
                component: "output".to_string(),
                details: "path must not be empty".to_string(),
            });
        }

        if self.categories.get("").is_some() {
            return Err(ConfdocError::InvalidConfig {
                component: "categories".to_string(),
                details: "flag name must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
