use std::path::{Path, PathBuf};

use crate::{ConfdocError, Result};

/// Tracks the chain of files being imported.
pub struct CircularDetector {
    import_chain: Vec<PathBuf>,
}

impl CircularDetector {
    pub fn new() -> Self {
        Self {
            import_chain: Vec::new(),
        }
    }

    /// Fails if `path` is already being loaded further up the chain.
    pub fn detect_circular_import(&self, path: &Path) -> Result<()> {
        if !self.import_chain.iter().any(|known| known == path) {
            return Ok(());
        }

        let chain: Vec<String> = self
            .import_chain
            .iter()
            .chain([&path.to_path_buf()])
            .map(|p| {
                p.file_name()
                    .unwrap_or(p.as_os_str())
                    .to_string_lossy()
                    .to_string()
            })
            .collect();

        Err(ConfdocError::InvalidConfig {
            component: "imports".to_string(),
            details: format!("circular import detected: {}", chain.join(" -> ")),
        })
    }

    pub fn push_to_chain(&mut self, path: &Path) {
        self.import_chain.push(path.to_path_buf());
    }

    pub fn pop_from_chain(&mut self) {
        self.import_chain.pop();
    }
}
