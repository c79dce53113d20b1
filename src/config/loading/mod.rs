mod circular_detection;
mod merging;

use std::{
    fs,
    path::{Path, PathBuf},
};

use circular_detection::CircularDetector;
use merging::merge_toml_configs;
use toml::Value;
use tracing::{debug, info};

use super::{ConfigPaths, DocsConfig};
use crate::{ConfdocError, Result};

const IMPORTS_KEY: &str = "imports";

impl DocsConfig {
    /// Loads the configuration at the default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or the file exists but cannot be loaded. See
    /// [`DocsConfig::load_with_imports`].
    pub fn load_default() -> Result<Self> {
        let path = ConfigPaths::main_config()?;
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        Self::load_with_imports(&path)
    }

    /// Loads a configuration file and the files it imports.
    ///
    /// Imports are listed as `imports = ["@shared", "@dir/other.toml"]`,
    /// resolved relative to the importing file with `.toml` implied. Imported
    /// documents are merged in order and the importing file wins conflicts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a file cannot be read
    /// - a file is not valid TOML
    /// - an imported file cannot be found
    /// - imports form a cycle
    /// - the merged document is not a valid configuration
    pub fn load_with_imports(path: &Path) -> Result<Self> {
        let canonical_path = path
            .canonicalize()
            .map_err(|e| ConfdocError::io(format!("failed to resolve path: {e}"), path))?;

        let mut detector = CircularDetector::new();
        let mut merged = Self::load_toml_with_tracking(&canonical_path, &mut detector)?;
        if let Value::Table(table) = &mut merged {
            table.remove(IMPORTS_KEY);
        }

        let config: DocsConfig =
            merged
                .try_into()
                .map_err(|e: toml::de::Error| ConfdocError::InvalidConfig {
                    component: "config parsing".to_string(),
                    details: e.to_string(),
                })?;
        config.validate()?;

        info!(path = %canonical_path.display(), "Loaded configuration");
        Ok(config)
    }

    fn load_toml_with_tracking(path: &Path, detector: &mut CircularDetector) -> Result<Value> {
        detector.detect_circular_import(path)?;
        detector.push_to_chain(path);

        let result = Self::load_toml_with_imports(path, detector);
        detector.pop_from_chain();
        result
    }

    fn load_toml_with_imports(path: &Path, detector: &mut CircularDetector) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| ConfdocError::io(e, path))?;
        let value: Value =
            toml::from_str(&content).map_err(|e| ConfdocError::toml_parse(e, Some(path)))?;

        let imported = Self::extract_import_paths(&value)
            .iter()
            .map(|import_path| {
                let resolved = Self::resolve_import_path(path, import_path)?;
                let canonical = resolved
                    .canonicalize()
                    .map_err(|e| ConfdocError::import(e, &resolved))?;

                debug!(from = %path.display(), import = %canonical.display(), "Importing configuration");
                Self::load_toml_with_tracking(&canonical, detector)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(merge_toml_configs(imported, value))
    }

    fn extract_import_paths(value: &Value) -> Vec<String> {
        let Some(Value::Array(imports)) = value.get(IMPORTS_KEY) else {
            return Vec::new();
        };

        imports
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|entry| entry.strip_prefix('@'))
            .map(str::to_owned)
            .collect()
    }

    fn resolve_import_path(base_path: &Path, import_path: &str) -> Result<PathBuf> {
        let parent_dir = base_path
            .parent()
            .ok_or_else(|| ConfdocError::ImportError {
                path: base_path.to_path_buf(),
                details: "invalid base path, no parent directory".to_string(),
            })?;

        let mut import_path_buf = PathBuf::from(import_path);
        if import_path_buf.extension().is_none() {
            import_path_buf.set_extension("toml");
        }

        Ok(parent_dir.join(import_path_buf))
    }
}
