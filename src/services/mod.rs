/// Shared reactive building blocks
pub mod common;
/// Playback state projection and control
pub mod playback;

pub use playback::{
    AudioEngine, ButtonState, EngineError, EngineState, LoopMode, PlaybackControls,
    PlaybackService, PlaybackSnapshot, ProcessingStage, RepeatMode, SequenceItem, SequenceState,
    SimulatedEngine, StateProjector, TrackSource,
};
