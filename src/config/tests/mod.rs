//! Unit tests for config module
//!
//! Tests configuration types, defaults, parsing and validation.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::unwrap_used, clippy::panic)]

use crate::{
    SpindleError,
    config::{Config, EngineConfig, LogLevel},
    services::playback::SimulatedEngineConfig,
};
use std::time::Duration;

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.player.asset_prefix, "assets/audio");
    assert_eq!(config.player.initial_songs, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn config_serialize_toml() {
    let toml_str = toml::to_string(&Config::default()).unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[player]"));
    assert!(toml_str.contains("[engine]"));
}

#[test]
fn partial_sections_fill_in_defaults() {
    let config = Config::from_toml_str(
        r#"
        [general]
        log_level = "debug"

        [engine]
        tick_interval_ms = 50
        "#,
    )
    .unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.engine.tick_interval_ms, 50);
    assert_eq!(config.engine.track_length_secs, 30);
    assert_eq!(config.player.initial_songs, 3);
}

#[test]
fn empty_string_is_default_config() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn zero_tick_interval_is_rejected() {
    let err = Config::from_toml_str("[engine]\ntick_interval_ms = 0").unwrap_err();

    match err {
        SpindleError::InvalidConfigField { field, component, .. } => {
            assert_eq!(field, "tick_interval_ms");
            assert_eq!(component, "engine");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_asset_prefix_is_rejected() {
    let err = Config::from_toml_str("[player]\nasset_prefix = \"  \"").unwrap_err();

    assert!(err.to_string().contains("asset_prefix"));
}

#[test]
fn invalid_toml_reports_string_location() {
    let err = Config::from_toml_str("[general\nlog_level = ").unwrap_err();

    match err {
        SpindleError::TomlParseError { location, .. } => assert_eq!(location, "string"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_log_level_is_a_parse_error() {
    let result = Config::from_toml_str("[general]\nlog_level = \"loud\"");

    assert!(matches!(result, Err(SpindleError::TomlParseError { .. })));
}

#[test]
fn log_level_display_matches_serde_name() {
    for level in [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        let config = Config::from_toml_str(&format!("[general]\nlog_level = \"{level}\"")).unwrap();
        assert_eq!(config.general.log_level, level);
    }
}

#[test]
fn engine_config_converts_to_durations() {
    let engine = EngineConfig {
        tick_interval_ms: 100,
        load_latency_ms: 0,
        buffer_ahead_secs: 5,
        track_length_secs: 12,
    };

    let simulated = SimulatedEngineConfig::from(&engine);

    assert_eq!(simulated.tick_interval, Duration::from_millis(100));
    assert_eq!(simulated.load_latency, Duration::ZERO);
    assert_eq!(simulated.buffer_ahead, Duration::from_secs(5));
    assert_eq!(simulated.track_length, Duration::from_secs(12));
}

#[test]
fn schema_lists_every_section() {
    let schema = schemars::schema_for!(Config);
    let json = serde_json::to_string(&schema).unwrap();

    assert!(json.contains("general"));
    assert!(json.contains("player"));
    assert!(json.contains("engine"));
}
