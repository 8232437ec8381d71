use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Player configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Directory prefix for numbered playlist songs (`{prefix}/{n}.mp3`).
    pub asset_prefix: String,

    /// Source opened by the single clip player. `http(s)://` sources are
    /// treated as URLs, anything else as an asset path.
    pub clip_source: String,

    /// Number of songs the playlist player starts with.
    pub initial_songs: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            asset_prefix: "assets/audio".to_string(),
            clip_source: "https://example.com/audio/clip.mp3".to_string(),
            initial_songs: 3,
        }
    }
}
