//! Integration tests for loading configuration files.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::fs;

use spindle::{
    SpindleError,
    config::{Config, LogLevel},
};
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

mod loading {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_every_section() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[general]
log_level = "debug"

[player]
asset_prefix = "music"
clip_source = "assets/clip.mp3"
initial_songs = 5

[engine]
tick_interval_ms = 50
load_latency_ms = 0
buffer_ahead_secs = 4
track_length_secs = 90
"#,
        );

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert_eq!(config.player.asset_prefix, "music");
        assert_eq!(config.player.clip_source, "assets/clip.mp3");
        assert_eq!(config.player.initial_songs, 5);
        assert_eq!(config.engine.tick_interval_ms, 50);
        assert_eq!(config.engine.load_latency_ms, 0);
        assert_eq!(config.engine.track_length_secs, 90);
    }

    #[test]
    fn omitted_fields_keep_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[engine]\ntrack_length_secs = 12\n");

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.engine.track_length_secs, 12);
        assert_eq!(config.engine.tick_interval_ms, 200);
        assert_eq!(config.player, Config::default().player);
    }
}

mod failures {
    use super::*;

    #[test]
    fn malformed_toml_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[general\nlog_level = ");

        let err = Config::load(Some(&path)).unwrap_err();

        match err {
            SpindleError::TomlParseError { location, .. } => {
                assert!(location.ends_with("config.toml"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[general]\nlog_level = \"loud\"\n");

        assert!(matches!(
            Config::load(Some(&path)),
            Err(SpindleError::TomlParseError { .. })
        ));
    }

    #[test]
    fn zero_tick_interval_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[engine]\ntick_interval_ms = 0\n");

        match Config::load(Some(&path)).unwrap_err() {
            SpindleError::InvalidConfigField { field, component, .. } => {
                assert_eq!(field, "tick_interval_ms");
                assert_eq!(component, "engine");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
