use std::{fs, path::Path};

use tracing::{debug, info};

use super::{Config, ConfigPaths};
use crate::{Result, SpindleError};

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults. The loaded values are validated.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid TOML, or
    /// contains unusable values
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => ConfigPaths::main_config()?,
        };

        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(&path).map_err(|e| SpindleError::io(e, &path))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| SpindleError::toml_parse(e, Some(&path)))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if the string is not valid TOML or contains unusable values
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| SpindleError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }
}
