//! Spindle - reactive audio playback front end.
//!
//! An audio engine reports what it is doing through independent
//! asynchronous signals. Spindle folds those signals into one immutable
//! playback snapshot that a UI can watch, and forwards user intents back
//! to the engine.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use spindle::services::playback::{
//!     Config, PlaybackService, SimulatedEngineConfig, TrackSource,
//! };
//!
//! # async fn demo() -> Result<(), spindle::services::playback::EngineError> {
//! let service = PlaybackService::simulated(SimulatedEngineConfig::default(), Config::default());
//!
//! service.controls().open_playlist(3).await?;
//! service.controls().play().await?;
//!
//! let snapshot = service.projector().snapshot();
//! println!("Now playing: {}", snapshot.current_track_label);
//!
//! service.dispose().await;
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface for the terminal player.
pub mod cli;

/// Reactive playback services.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{Result, SpindleError};
