use std::sync::Arc;

use tracing::{info, instrument};

use super::{
    controls::PlaybackControls,
    engine::{AudioEngine, SimulatedEngine, SimulatedEngineConfig},
    projector::StateProjector,
};

/// Configuration for the playback service
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory prefix for numbered demo songs
    pub asset_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_prefix: "assets/audio".to_string(),
        }
    }
}

/// The projector and the controls wired to one engine.
///
/// Hand this to the UI layer: it reads through [`StateProjector`] and
/// mutates only through [`PlaybackControls`].
pub struct PlaybackService {
    engine: Arc<dyn AudioEngine>,
    projector: StateProjector,
    controls: PlaybackControls,
}

impl PlaybackService {
    /// Start projecting `engine` and build controls for it.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(engine))]
    pub fn start(engine: Arc<dyn AudioEngine>, config: Config) -> Self {
        info!("Starting playback service");

        let projector = StateProjector::start(Arc::clone(&engine));
        let controls = PlaybackControls::new(
            Arc::clone(&engine),
            projector.cell(),
            config.asset_prefix,
        );

        Self {
            engine,
            projector,
            controls,
        }
    }

    /// Start the service over a fresh [`SimulatedEngine`].
    pub fn simulated(engine_config: SimulatedEngineConfig, config: Config) -> Self {
        Self::start(Arc::new(SimulatedEngine::new(engine_config)), config)
    }

    /// Read side: current snapshot and change stream.
    pub fn projector(&self) -> &StateProjector {
        &self.projector
    }

    /// Write side: user intents.
    pub fn controls(&self) -> &PlaybackControls {
        &self.controls
    }

    /// Stop projecting and release the engine.
    ///
    /// Commands issued just before this may be dropped by the engine.
    #[instrument(skip(self))]
    pub async fn dispose(mut self) {
        self.projector.shutdown();
        self.engine.dispose().await;
        info!("Playback service disposed");
    }
}
