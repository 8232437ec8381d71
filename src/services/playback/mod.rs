//! Playback state projection and control.
//!
//! An [`AudioEngine`] emits independent signals (engine state, position,
//! buffered position, duration, sequence state). [`StateProjector`] folds
//! them into one immutable [`PlaybackSnapshot`] that UIs watch, and
//! [`PlaybackControls`] turns user intents into engine commands.

/// Command entry points
pub mod controls;
/// Engine boundary and the simulated engine
pub mod engine;
/// Engine error types
pub mod error;
/// Signal folding into snapshots
pub mod projector;
/// Service wiring
pub mod service;
/// Immutable playback snapshot
pub mod snapshot;
/// Playback value types
pub mod types;

pub use controls::PlaybackControls;
pub use engine::{AudioEngine, SimulatedEngine, SimulatedEngineConfig};
pub use error::EngineError;
pub use projector::StateProjector;
pub use service::{Config, PlaybackService};
pub use snapshot::PlaybackSnapshot;
pub use types::{
    ButtonState, EngineState, ItemId, LoopMode, ProcessingStage, QueuedSource, RepeatMode,
    SequenceItem, SequenceState, TrackSource,
};
