use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tracing::{debug, instrument, warn};

use crate::services::{
    common::Property,
    playback::{
        engine::AudioEngine,
        snapshot::PlaybackSnapshot,
        types::{ButtonState, EngineState, ProcessingStage},
    },
};

/// Outcome of folding one engine-state emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ButtonFold {
    /// Publish this button state as is
    Show(ButtonState),
    /// Playback completed: rewind and pause the engine, then show paused
    RewindAndPause,
}

/// Derive the button state. Checks run in order and the first match wins.
pub(crate) fn fold_engine_state(state: EngineState) -> ButtonFold {
    match state {
        EngineState {
            stage: ProcessingStage::Loading | ProcessingStage::Buffering,
            ..
        } => ButtonFold::Show(ButtonState::Loading),
        EngineState { playing: false, .. } => ButtonFold::Show(ButtonState::Paused),
        EngineState {
            stage: ProcessingStage::Completed,
            ..
        } => ButtonFold::RewindAndPause,
        _ => ButtonFold::Show(ButtonState::Playing),
    }
}

/// Folds engine signals into the snapshot cell.
pub(crate) struct SignalMonitor;

impl SignalMonitor {
    /// Subscribe to all engine signals and fold them until every stream ends.
    #[instrument(skip_all)]
    pub async fn run(engine: Arc<dyn AudioEngine>, snapshot: Property<PlaybackSnapshot>) {
        let mut engine_states = engine.engine_state_stream().fuse();
        let mut positions = engine.position_stream().fuse();
        let mut buffered_positions = engine.buffered_position_stream().fuse();
        let mut durations = engine.duration_stream().fuse();
        let mut sequence_states = engine.sequence_state_stream().fuse();

        debug!("Monitoring engine signals");

        loop {
            tokio::select! {
                Some(state) = engine_states.next() => {
                    Self::apply_engine_state(&*engine, &snapshot, state).await;
                }

                Some(position) = positions.next() => {
                    snapshot.update(|current| current.with_position(position));
                }

                Some(buffered) = buffered_positions.next() => {
                    snapshot.update(|current| current.with_buffered_position(buffered));
                }

                Some(duration) = durations.next() => {
                    Self::apply_duration(&snapshot, duration);
                }

                Some(sequence) = sequence_states.next() => {
                    debug!(
                        items = sequence.effective_sequence.len(),
                        shuffle = sequence.shuffle_enabled,
                        "Sequence changed"
                    );
                    snapshot.update(|current| current.with_sequence(&sequence));
                }

                else => {
                    debug!("All engine signal streams ended");
                    break;
                }
            }
        }
    }

    async fn apply_engine_state(
        engine: &dyn AudioEngine,
        snapshot: &Property<PlaybackSnapshot>,
        state: EngineState,
    ) {
        let button_state = match fold_engine_state(state) {
            ButtonFold::Show(button_state) => button_state,
            ButtonFold::RewindAndPause => {
                debug!("Playback completed, rewinding");
                if let Err(e) = engine.seek(Duration::ZERO).await {
                    warn!("Failed to rewind after completion: {e}");
                }
                if let Err(e) = engine.pause().await {
                    warn!("Failed to pause after completion: {e}");
                }
                ButtonState::Paused
            }
        };

        snapshot.update(|current| current.with_button_state(button_state));
    }

    fn apply_duration(snapshot: &Property<PlaybackSnapshot>, duration: Option<Duration>) {
        snapshot.update(|current| current.with_total_duration(duration));
    }
}
