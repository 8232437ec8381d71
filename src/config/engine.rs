use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::playback::SimulatedEngineConfig;

/// Simulated engine timing
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Cadence of position updates while playing, in milliseconds.
    pub tick_interval_ms: u64,

    /// Delay before an opened source becomes ready, in milliseconds.
    pub load_latency_ms: u64,

    /// How far ahead of the cursor audio counts as buffered, in seconds.
    pub buffer_ahead_secs: u64,

    /// Length reported for every track, in seconds.
    pub track_length_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            load_latency_ms: 300,
            buffer_ahead_secs: 10,
            track_length_secs: 30,
        }
    }
}

impl From<&EngineConfig> for SimulatedEngineConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            load_latency: Duration::from_millis(config.load_latency_ms),
            buffer_ahead: Duration::from_secs(config.buffer_ahead_secs),
            track_length: Duration::from_secs(config.track_length_secs),
        }
    }
}
