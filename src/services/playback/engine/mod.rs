mod simulated;

pub use simulated::{SimulatedEngine, SimulatedEngineConfig};

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::{
    error::EngineError,
    types::{EngineState, LoopMode, QueuedSource, SequenceItem, SequenceState, TrackSource},
};

/// Audio decode/playback component driven by the playback service.
///
/// Primitives resolve once the engine has accepted the command. State
/// changes come back through the signal streams, which the engine emits
/// asynchronously and in no guaranteed relative order.
#[async_trait]
pub trait AudioEngine: Send + Sync + 'static {
    /// Open a single source and wait until it is ready.
    ///
    /// Returns the resolved duration, if the engine knows it yet.
    ///
    /// # Errors
    /// `SourceUnavailable` when the source cannot be opened, `Disposed`
    /// after disposal.
    async fn open(&self, source: TrackSource) -> Result<Option<Duration>, EngineError>;

    /// Replace the sequence with `sources` and open its first item.
    ///
    /// # Errors
    /// `SourceUnavailable` when the source cannot be opened, `Disposed`
    /// after disposal.
    async fn open_sequence(
        &self,
        sources: Vec<QueuedSource>,
    ) -> Result<Option<Duration>, EngineError>;

    /// Start or resume playback.
    ///
    /// # Errors
    /// `NoSource` when nothing is loaded, `Disposed` after disposal.
    async fn play(&self) -> Result<(), EngineError>;

    /// Pause playback.
    ///
    /// # Errors
    /// `Disposed` after disposal.
    async fn pause(&self) -> Result<(), EngineError>;

    /// Move the cursor of the current item.
    ///
    /// # Errors
    /// `NoSource` when nothing is loaded, `Disposed` after disposal.
    async fn seek(&self, position: Duration) -> Result<(), EngineError>;

    /// Move to the next item of the effective sequence.
    ///
    /// # Errors
    /// `NoSource` when nothing is loaded, `Disposed` after disposal.
    async fn skip_to_next(&self) -> Result<(), EngineError>;

    /// Move to the previous item of the effective sequence.
    ///
    /// # Errors
    /// `NoSource` when nothing is loaded, `Disposed` after disposal.
    async fn skip_to_previous(&self) -> Result<(), EngineError>;

    /// Current shuffle flag as the engine sees it.
    fn shuffle_enabled(&self) -> bool;

    /// Number of items in the sequence right now, ahead of any
    /// sequence-state emission still in flight.
    fn sequence_len(&self) -> usize;

    /// Turn shuffled ordering on or off.
    ///
    /// # Errors
    /// `Disposed` after disposal.
    async fn set_shuffle_enabled(&self, enabled: bool) -> Result<(), EngineError>;

    /// Compute a fresh shuffled order.
    ///
    /// # Errors
    /// `Disposed` after disposal.
    async fn reshuffle(&self) -> Result<(), EngineError>;

    /// Set how the engine loops at the end of an item.
    ///
    /// # Errors
    /// `Disposed` after disposal.
    async fn set_loop_mode(&self, mode: LoopMode) -> Result<(), EngineError>;

    /// Append a source to the end of the sequence.
    ///
    /// # Errors
    /// `Disposed` after disposal.
    async fn append_source(&self, source: QueuedSource) -> Result<SequenceItem, EngineError>;

    /// Remove the item at `index` in insertion order.
    ///
    /// # Errors
    /// `InvalidIndex` when `index` is out of range, `Disposed` after disposal.
    async fn remove_source(&self, index: usize) -> Result<(), EngineError>;

    /// Release the engine. Later commands fail and signal streams end.
    async fn dispose(&self);

    /// Playing flag and processing stage.
    fn engine_state_stream(&self) -> BoxStream<'static, EngineState>;

    /// Playback cursor, emitted on a fixed cadence while playing.
    fn position_stream(&self) -> BoxStream<'static, Duration>;

    /// Buffered position, emitted as data becomes available.
    fn buffered_position_stream(&self) -> BoxStream<'static, Duration>;

    /// Duration of the current item once resolved.
    fn duration_stream(&self) -> BoxStream<'static, Option<Duration>>;

    /// Sequence state. Engines playing a single clip may return a stream
    /// that never yields.
    fn sequence_state_stream(&self) -> BoxStream<'static, SequenceState>;
}
