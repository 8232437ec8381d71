use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use super::{
    engine::AudioEngine,
    error::EngineError,
    snapshot::PlaybackSnapshot,
    types::{LoopMode, QueuedSource, RepeatMode, SequenceItem, TrackSource},
};
use crate::services::common::Property;

/// Entry points for user intents.
///
/// Most commands go straight to the engine and leave the snapshot alone;
/// the engine's next signal carries the result back. Repeat and shuffle are
/// written into the snapshot ahead of that signal. Those two fields are
/// predictions that the next authoritative sequence-state emission may
/// overwrite.
///
/// No validation happens here: every error comes from the engine.
#[derive(Clone)]
pub struct PlaybackControls {
    engine: Arc<dyn AudioEngine>,
    snapshot: Property<PlaybackSnapshot>,
    asset_prefix: String,
}

impl PlaybackControls {
    pub(crate) fn new(
        engine: Arc<dyn AudioEngine>,
        snapshot: Property<PlaybackSnapshot>,
        asset_prefix: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            snapshot,
            asset_prefix: asset_prefix.into(),
        }
    }

    /// Open a single clip and wait until the engine has it ready.
    ///
    /// # Errors
    ///
    /// Returns whatever the engine reports while opening.
    #[instrument(skip(self))]
    pub async fn open_clip(&self, source: TrackSource) -> Result<Option<Duration>, EngineError> {
        self.engine.open(source).await
    }

    /// Open the demo playlist of `count` numbered songs.
    ///
    /// # Errors
    ///
    /// Returns whatever the engine reports while opening.
    #[instrument(skip(self))]
    pub async fn open_playlist(&self, count: usize) -> Result<Option<Duration>, EngineError> {
        let sources = (1..=count)
            .map(|number| QueuedSource::numbered(&self.asset_prefix, number))
            .collect();

        self.engine.open_sequence(sources).await
    }

    /// Start or resume playback.
    ///
    /// # Errors
    ///
    /// Returns the engine's error unchanged.
    pub async fn play(&self) -> Result<(), EngineError> {
        self.engine.play().await
    }

    /// Pause playback.
    ///
    /// # Errors
    ///
    /// Returns the engine's error unchanged.
    pub async fn pause(&self) -> Result<(), EngineError> {
        self.engine.pause().await
    }

    /// Move the playback cursor.
    ///
    /// # Errors
    ///
    /// Returns the engine's error unchanged.
    pub async fn seek(&self, position: Duration) -> Result<(), EngineError> {
        self.engine.seek(position).await
    }

    /// Skip to the next track.
    ///
    /// # Errors
    ///
    /// Returns the engine's error unchanged.
    pub async fn skip_to_next(&self) -> Result<(), EngineError> {
        self.engine.skip_to_next().await
    }

    /// Skip to the previous track.
    ///
    /// # Errors
    ///
    /// Returns the engine's error unchanged.
    pub async fn skip_to_previous(&self) -> Result<(), EngineError> {
        self.engine.skip_to_previous().await
    }

    /// Advance the repeat mode: Off → RepeatOne → RepeatAll → Off.
    ///
    /// The snapshot shows the new mode before the engine is told.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if it rejects the loop mode. The snapshot
    /// keeps the new mode either way.
    #[instrument(skip(self))]
    pub async fn cycle_repeat_mode(&self) -> Result<RepeatMode, EngineError> {
        let mut next = RepeatMode::default();
        self.snapshot.update(|current| {
            next = current.repeat_mode.next();
            current.with_repeat_mode(next)
        });

        debug!(mode = %next, "Repeat mode changed");
        self.engine.set_loop_mode(LoopMode::from(next)).await?;
        Ok(next)
    }

    /// Flip shuffle, reshuffling first when turning it on.
    ///
    /// The current flag is read from the engine so that a toggle still in
    /// flight is not applied twice.
    ///
    /// # Errors
    ///
    /// Returns the engine's error; the snapshot is only updated on success.
    #[instrument(skip(self))]
    pub async fn toggle_shuffle(&self) -> Result<bool, EngineError> {
        let enable = !self.engine.shuffle_enabled();

        if enable {
            self.engine.reshuffle().await?;
        }
        self.engine.set_shuffle_enabled(enable).await?;

        self.snapshot
            .update(|current| current.with_shuffle_enabled(enable));
        debug!(enabled = enable, "Shuffle toggled");
        Ok(enable)
    }

    /// Append the next numbered song to the playlist.
    ///
    /// The number comes from the engine's current sequence length, so
    /// appends issued back to back are numbered consecutively. The
    /// snapshot picks the new entry up from the engine's next
    /// sequence-state signal.
    ///
    /// # Errors
    ///
    /// Returns the engine's error unchanged.
    #[instrument(skip(self))]
    pub async fn append_track(&self) -> Result<SequenceItem, EngineError> {
        let index = self.engine.sequence_len();
        let queued = QueuedSource::numbered(&self.asset_prefix, index + 1);

        self.engine.append_source(queued).await
    }

    /// Remove the last playlist entry, as counted by the engine.
    ///
    /// Returns `Ok(false)` without touching the engine when the playlist is
    /// already empty.
    ///
    /// # Errors
    ///
    /// Returns the engine's error unchanged.
    #[instrument(skip(self))]
    pub async fn remove_track(&self) -> Result<bool, EngineError> {
        let Some(index) = self.engine.sequence_len().checked_sub(1) else {
            debug!("Playlist empty, nothing to remove");
            return Ok(false);
        };

        self.engine.remove_source(index).await?;
        Ok(true)
    }
}
