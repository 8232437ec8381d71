pub(crate) mod monitoring;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, instrument};

use super::{engine::AudioEngine, snapshot::PlaybackSnapshot};
use crate::services::common::Property;

/// Maintains one consistent playback snapshot from the engine's signals.
///
/// A single monitor task owns every subscription and applies each
/// emission to the latest snapshot before handling the next one.
/// Observers only read: they get clones or a change stream.
#[derive(Debug)]
pub struct StateProjector {
    snapshot: Property<PlaybackSnapshot>,
    monitor: Option<JoinHandle<()>>,
}

impl StateProjector {
    /// Subscribe to `engine` and start folding its signals.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(engine))]
    pub fn start(engine: Arc<dyn AudioEngine>) -> Self {
        let snapshot = Property::new(PlaybackSnapshot::default());
        let monitor = tokio::spawn(monitoring::SignalMonitor::run(engine, snapshot.clone()));

        Self {
            snapshot,
            monitor: Some(monitor),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot.get()
    }

    /// Stream of snapshots, starting with the current one.
    ///
    /// Slow consumers skip superseded snapshots and only see the latest.
    pub fn watch(&self) -> WatchStream<PlaybackSnapshot> {
        self.snapshot.watch()
    }

    /// Whether the monitor task is still folding signals.
    pub fn is_running(&self) -> bool {
        self.monitor
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Writable handle for optimistic updates from the controls.
    pub(crate) fn cell(&self) -> Property<PlaybackSnapshot> {
        self.snapshot.clone()
    }

    /// Cancel every engine subscription.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.monitor.take() {
            debug!("Stopping state projector");
            handle.abort();
        }
    }
}

impl Drop for StateProjector {
    fn drop(&mut self) {
        self.shutdown();
    }
}
