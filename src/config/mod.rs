//! Configuration schema definitions and validation.
//!
//! Defines the configuration structure for Spindle: general settings,
//! player settings and the simulated engine's timing. All configurations
//! are serializable to/from TOML format.

mod engine;
mod general;
mod loading;
mod paths;
mod player;

#[cfg(test)]
mod tests;

pub use engine::EngineConfig;
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use player::PlayerConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Result, SpindleError};

/// Main configuration structure for Spindle.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Player behaviour and demo sources.
    #[serde(default)]
    pub player: PlayerConfig,

    /// Timing of the simulated engine.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Config {
    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    /// Returns `SpindleError::InvalidConfigField` for the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.engine.tick_interval_ms == 0 {
            return Err(SpindleError::invalid_field(
                "engine",
                "tick_interval_ms",
                "must be greater than zero",
            ));
        }

        if self.engine.track_length_secs == 0 {
            return Err(SpindleError::invalid_field(
                "engine",
                "track_length_secs",
                "must be greater than zero",
            ));
        }

        if self.player.asset_prefix.trim().is_empty() {
            return Err(SpindleError::invalid_field(
                "player",
                "asset_prefix",
                "must not be empty",
            ));
        }

        Ok(())
    }
}
