use std::{
    env,
    io::{Error, ErrorKind},
    path::PathBuf,
};

/// Locates the tool's configuration following the XDG Base Directory
/// specification.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Configuration directory of the tool.
    ///
    /// Uses `$XDG_CONFIG_HOME/confdoc`, falling back to `$HOME/.config/confdoc`.
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set
    pub fn config_dir() -> Result<PathBuf, Error> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| {
                Error::new(
                    ErrorKind::NotFound,
                    "Neither XDG_CONFIG_HOME nor HOME environment variable found",
                )
            })?;

        Ok(PathBuf::from(config_home).join("confdoc"))
    }

    /// Path of the main configuration file.
    ///
    /// # Errors
    /// Returns an error if the configuration directory cannot be determined
    pub fn main_config() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
