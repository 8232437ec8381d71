//! Shared helpers for integration tests: a scripted engine whose signals
//! the test pushes by hand and whose primitive calls are recorded.

#![allow(dead_code, clippy::unwrap_used, clippy::panic)]

use std::{
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use futures::{
    StreamExt,
    stream::{self, BoxStream},
};
use spindle::services::playback::{
    AudioEngine, EngineError, EngineState, ItemId, LoopMode, PlaybackSnapshot, QueuedSource,
    SequenceItem, SequenceState, StateProjector, TrackSource,
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// A primitive call received by the scripted engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open(TrackSource),
    OpenSequence(Vec<QueuedSource>),
    Play,
    Pause,
    Seek(Duration),
    SkipToNext,
    SkipToPrevious,
    SetShuffle(bool),
    Reshuffle,
    SetLoopMode(LoopMode),
    Append(QueuedSource),
    Remove(usize),
    Dispose,
}

struct Signal<T> {
    tx: UnboundedSender<T>,
    rx: Mutex<Option<UnboundedReceiver<T>>>,
}

impl<T: Send + 'static> Signal<T> {
    fn new() -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    fn emit(&self, value: T) {
        self.tx.send(value).unwrap();
    }

    fn stream(&self) -> BoxStream<'static, T> {
        match self.rx.lock().unwrap().take() {
            Some(rx) => UnboundedReceiverStream::new(rx).boxed(),
            None => stream::empty().boxed(),
        }
    }
}

/// Engine driven entirely by the test.
pub struct ScriptedEngine {
    calls: Mutex<Vec<Call>>,
    shuffle: AtomicBool,
    len: AtomicUsize,
    next_id: AtomicU64,
    failure: Mutex<Option<EngineError>>,

    engine_state: Signal<EngineState>,
    position: Signal<Duration>,
    buffered_position: Signal<Duration>,
    duration: Signal<Option<Duration>>,
    sequence: Signal<SequenceState>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            shuffle: AtomicBool::new(false),
            len: AtomicUsize::new(0),
            next_id: AtomicU64::new(100),
            failure: Mutex::new(None),
            engine_state: Signal::new(),
            position: Signal::new(),
            buffered_position: Signal::new(),
            duration: Signal::new(),
            sequence: Signal::new(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    /// Make the next primitive call fail with `error`.
    pub fn fail_next(&self, error: EngineError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn emit_state(&self, state: EngineState) {
        self.engine_state.emit(state);
    }

    pub fn emit_position(&self, position: Duration) {
        self.position.emit(position);
    }

    pub fn emit_buffered(&self, buffered: Duration) {
        self.buffered_position.emit(buffered);
    }

    pub fn emit_duration(&self, duration: Option<Duration>) {
        self.duration.emit(duration);
    }

    /// Push a sequence state; the engine's length follows it.
    pub fn emit_sequence(&self, sequence: SequenceState) {
        self.len
            .store(sequence.effective_sequence.len(), Ordering::SeqCst);
        self.sequence.emit(sequence);
    }

    fn record(&self, call: Call) -> Result<(), EngineError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AudioEngine for ScriptedEngine {
    async fn open(&self, source: TrackSource) -> Result<Option<Duration>, EngineError> {
        self.record(Call::Open(source))?;
        Ok(None)
    }

    async fn open_sequence(
        &self,
        sources: Vec<QueuedSource>,
    ) -> Result<Option<Duration>, EngineError> {
        let count = sources.len();
        self.record(Call::OpenSequence(sources))?;
        self.len.store(count, Ordering::SeqCst);
        Ok(None)
    }

    async fn play(&self) -> Result<(), EngineError> {
        self.record(Call::Play)
    }

    async fn pause(&self) -> Result<(), EngineError> {
        self.record(Call::Pause)
    }

    async fn seek(&self, position: Duration) -> Result<(), EngineError> {
        self.record(Call::Seek(position))
    }

    async fn skip_to_next(&self) -> Result<(), EngineError> {
        self.record(Call::SkipToNext)
    }

    async fn skip_to_previous(&self) -> Result<(), EngineError> {
        self.record(Call::SkipToPrevious)
    }

    fn shuffle_enabled(&self) -> bool {
        self.shuffle.load(Ordering::SeqCst)
    }

    fn sequence_len(&self) -> usize {
        self.len.load(Ordering::SeqCst)
    }

    async fn set_shuffle_enabled(&self, enabled: bool) -> Result<(), EngineError> {
        self.record(Call::SetShuffle(enabled))?;
        self.shuffle.store(enabled, Ordering::SeqCst);
        Ok(())
    }

    async fn reshuffle(&self) -> Result<(), EngineError> {
        self.record(Call::Reshuffle)
    }

    async fn set_loop_mode(&self, mode: LoopMode) -> Result<(), EngineError> {
        self.record(Call::SetLoopMode(mode))
    }

    async fn append_source(&self, source: QueuedSource) -> Result<SequenceItem, EngineError> {
        self.record(Call::Append(source.clone()))?;
        self.len.fetch_add(1, Ordering::SeqCst);
        Ok(SequenceItem {
            id: ItemId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            label: source.label,
            source: source.source,
        })
    }

    async fn remove_source(&self, index: usize) -> Result<(), EngineError> {
        self.record(Call::Remove(index))?;
        self.len.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }

    async fn dispose(&self) {
        let _ = self.record(Call::Dispose);
    }

    fn engine_state_stream(&self) -> BoxStream<'static, EngineState> {
        self.engine_state.stream()
    }

    fn position_stream(&self) -> BoxStream<'static, Duration> {
        self.position.stream()
    }

    fn buffered_position_stream(&self) -> BoxStream<'static, Duration> {
        self.buffered_position.stream()
    }

    fn duration_stream(&self) -> BoxStream<'static, Option<Duration>> {
        self.duration.stream()
    }

    fn sequence_state_stream(&self) -> BoxStream<'static, SequenceState> {
        self.sequence.stream()
    }
}

/// Sequence item with id `n`, labelled `Song n`.
pub fn item(n: u64) -> SequenceItem {
    SequenceItem {
        id: ItemId(n),
        label: format!("Song {n}"),
        source: TrackSource::Asset(format!("assets/audio/{n}.mp3")),
    }
}

/// Sequence state over items `ids` with `current` selected.
pub fn sequence(ids: &[u64], current: Option<u64>, shuffle_enabled: bool) -> SequenceState {
    SequenceState {
        current: current.map(item),
        effective_sequence: ids.iter().copied().map(item).collect(),
        shuffle_enabled,
    }
}

/// Wait until the projector publishes a snapshot matching `predicate`.
pub async fn wait_for<F>(projector: &StateProjector, predicate: F) -> PlaybackSnapshot
where
    F: Fn(&PlaybackSnapshot) -> bool,
{
    let mut snapshots = projector.watch();
    let found = tokio::time::timeout(Duration::from_secs(60), async {
        while let Some(snapshot) = snapshots.next().await {
            if predicate(&snapshot) {
                return Some(snapshot);
            }
        }
        None
    })
    .await;

    match found {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => panic!("snapshot stream ended"),
        Err(_) => panic!(
            "timed out waiting for snapshot, last was {:?}",
            projector.snapshot()
        ),
    }
}

/// Let spawned tasks run until they block.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
