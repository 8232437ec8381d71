use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use async_trait::async_trait;
use futures::{
    StreamExt,
    future::ready,
    stream::BoxStream,
};
use rand::seq::SliceRandom;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, instrument};

use super::AudioEngine;
use crate::services::{
    common::Property,
    playback::{
        error::EngineError,
        types::{
            EngineState, ItemId, LoopMode, ProcessingStage, QueuedSource, SequenceItem,
            SequenceState, TrackSource,
        },
    },
};

/// Timing parameters of the simulated engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedEngineConfig {
    /// Cadence of position updates while playing
    pub tick_interval: Duration,
    /// Time an open takes before the source is ready
    pub load_latency: Duration,
    /// How far ahead of the cursor data counts as buffered
    pub buffer_ahead: Duration,
    /// Length reported for every source
    pub track_length: Duration,
}

impl Default for SimulatedEngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            load_latency: Duration::from_millis(300),
            buffer_ahead: Duration::from_secs(10),
            track_length: Duration::from_secs(30),
        }
    }
}

/// In-process engine that plays nothing but emits realistic signals.
///
/// Position advances on a timer while playing. Every source reports the
/// configured track length. Useful for demos and for exercising the
/// projector without audio hardware.
pub struct SimulatedEngine {
    inner: Arc<Inner>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

struct Inner {
    config: SimulatedEngineConfig,
    deck: Mutex<Deck>,

    engine_state: Property<EngineState>,
    position: Property<Duration>,
    buffered_position: Property<Duration>,
    duration: Property<Option<Duration>>,
    sequence: Property<Option<SequenceState>>,
    disposed: Property<bool>,
}

#[derive(Default)]
struct Deck {
    items: Vec<SequenceItem>,
    shuffled: Vec<ItemId>,
    current: Option<ItemId>,
    next_id: u64,

    playing: bool,
    stage: ProcessingStage,
    position: Duration,
    duration: Option<Duration>,
    loop_mode: LoopMode,
    shuffle: bool,

    publishes_sequence: bool,
    disposed: bool,
}

impl Deck {
    fn effective_order(&self) -> Vec<ItemId> {
        if self.shuffle {
            self.shuffled.clone()
        } else {
            self.items.iter().map(|item| item.id).collect()
        }
    }

    fn item(&self, id: ItemId) -> Option<&SequenceItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn enqueue(&mut self, queued: QueuedSource) -> SequenceItem {
        self.next_id += 1;
        let item = SequenceItem {
            id: ItemId(self.next_id),
            label: queued.label,
            source: queued.source,
        };

        self.items.push(item.clone());
        self.shuffled.push(item.id);
        item
    }

    fn neighbour(&self, forward: bool) -> Option<ItemId> {
        let order = self.effective_order();
        let current = self.current?;
        let index = order.iter().position(|id| *id == current)?;
        let wraps = self.loop_mode == LoopMode::All;

        let target = if forward {
            match index + 1 {
                next if next < order.len() => Some(next),
                _ if wraps => Some(0),
                _ => None,
            }
        } else {
            match index {
                0 if wraps => order.len().checked_sub(1),
                0 => None,
                previous => Some(previous - 1),
            }
        };

        target.and_then(|i| order.get(i).copied())
    }

    fn load(&mut self, id: Option<ItemId>, track_length: Duration) {
        self.current = id;
        self.position = Duration::ZERO;

        match id {
            Some(_) => {
                self.duration = Some(track_length);
                self.stage = ProcessingStage::Ready;
            }
            None => {
                self.duration = None;
                self.stage = ProcessingStage::Idle;
            }
        }
    }

    fn ensure_usable(&self) -> Result<(), EngineError> {
        if self.disposed {
            return Err(EngineError::Disposed);
        }
        Ok(())
    }

    fn ensure_source(&self) -> Result<(), EngineError> {
        self.ensure_usable()?;
        if self.current.is_none() {
            return Err(EngineError::NoSource);
        }
        Ok(())
    }
}

impl Inner {
    fn deck(&self) -> MutexGuard<'_, Deck> {
        self.deck.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, deck: &Deck) {
        self.engine_state
            .set(EngineState::new(deck.playing, deck.stage));
        self.position.set(deck.position);
        self.duration.set(deck.duration);

        let buffered = match (deck.stage, deck.duration) {
            (ProcessingStage::Ready | ProcessingStage::Completed, Some(length)) => {
                (deck.position + self.config.buffer_ahead).min(length)
            }
            _ => Duration::ZERO,
        };
        self.buffered_position.set(buffered);

        if deck.publishes_sequence {
            let order = deck.effective_order();
            let effective_sequence = order
                .iter()
                .filter_map(|id| deck.item(*id).cloned())
                .collect();

            self.sequence.set(Some(SequenceState {
                current: deck.current.and_then(|id| deck.item(id).cloned()),
                effective_sequence,
                shuffle_enabled: deck.shuffle,
            }));
        }
    }

    /// Advance the cursor by one tick. Returns false once disposed.
    fn advance(&self, elapsed: Duration) -> bool {
        let mut deck = self.deck();
        if deck.disposed {
            return false;
        }

        if deck.playing && deck.stage == ProcessingStage::Ready {
            let length = deck.duration.unwrap_or(self.config.track_length);
            deck.position += elapsed;

            if deck.position >= length {
                self.finish_item(&mut deck, length);
            }

            self.publish(&deck);
        }

        true
    }

    fn finish_item(&self, deck: &mut Deck, length: Duration) {
        if deck.loop_mode == LoopMode::One {
            deck.position = Duration::ZERO;
            return;
        }

        match deck.neighbour(true) {
            Some(next) => {
                debug!(item = %next, "Advancing to next item");
                deck.load(Some(next), self.config.track_length);
            }
            None => {
                debug!("Reached end of sequence");
                deck.position = length;
                deck.stage = ProcessingStage::Completed;
            }
        }
    }

    fn watch_until_disposed<T>(&self, property: &Property<T>) -> BoxStream<'static, T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut disposed = self.disposed.watch();
        let disposal = async move {
            while let Some(flag) = disposed.next().await {
                if flag {
                    break;
                }
            }
        };

        property.watch().take_until(disposal).boxed()
    }
}

impl SimulatedEngine {
    /// Create the engine and start its position ticker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: SimulatedEngineConfig) -> Self {
        let tick_interval = config.tick_interval;
        let inner = Arc::new(Inner {
            config,
            deck: Mutex::new(Deck::default()),
            engine_state: Property::new(EngineState::default()),
            position: Property::new(Duration::ZERO),
            buffered_position: Property::new(Duration::ZERO),
            duration: Property::new(None),
            sequence: Property::new(None),
            disposed: Property::new(false),
        });

        let ticker = tokio::spawn(Self::run_ticker(Arc::downgrade(&inner), tick_interval));

        Self {
            inner,
            ticker: Mutex::new(Some(ticker)),
        }
    }

    async fn run_ticker(inner: Weak<Inner>, tick_interval: Duration) {
        let mut interval = tokio::time::interval(tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            let Some(inner) = inner.upgrade() else {
                break;
            };

            if !inner.advance(tick_interval) {
                break;
            }
        }

        debug!("Simulated engine ticker stopped");
    }

    /// Put the deck into loading, wait out the latency, then mark it ready.
    async fn load_after_latency(&self) -> Result<Option<Duration>, EngineError> {
        tokio::time::sleep(self.inner.config.load_latency).await;

        let mut deck = self.inner.deck();
        deck.ensure_usable()?;

        let first = deck.effective_order().first().copied();
        deck.load(first, self.inner.config.track_length);
        self.inner.publish(&deck);

        Ok(deck.duration)
    }

    fn mutate<F>(&self, change: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut Deck, &SimulatedEngineConfig) -> Result<(), EngineError>,
    {
        let mut deck = self.inner.deck();
        change(&mut deck, &self.inner.config)?;
        self.inner.publish(&deck);
        Ok(())
    }
}

impl Drop for SimulatedEngine {
    fn drop(&mut self) {
        let ticker = self
            .ticker
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = ticker {
            handle.abort();
        }
    }
}

#[async_trait]
impl AudioEngine for SimulatedEngine {
    #[instrument(skip(self))]
    async fn open(&self, source: TrackSource) -> Result<Option<Duration>, EngineError> {
        if source.to_string().trim().is_empty() {
            return Err(EngineError::SourceUnavailable("empty source".to_string()));
        }

        self.mutate(|deck, _| {
            deck.ensure_usable()?;
            deck.items.clear();
            deck.shuffled.clear();
            deck.publishes_sequence = false;
            deck.enqueue(QueuedSource {
                label: source.to_string(),
                source: source.clone(),
            });
            deck.current = None;
            deck.playing = false;
            deck.position = Duration::ZERO;
            deck.duration = None;
            deck.stage = ProcessingStage::Loading;
            Ok(())
        })?;

        let duration = self.load_after_latency().await?;
        info!(?duration, "Source ready");
        Ok(duration)
    }

    #[instrument(skip(self, sources), fields(count = sources.len()))]
    async fn open_sequence(
        &self,
        sources: Vec<QueuedSource>,
    ) -> Result<Option<Duration>, EngineError> {
        let empty = sources.is_empty();

        self.mutate(|deck, _| {
            deck.ensure_usable()?;
            deck.items.clear();
            deck.shuffled.clear();
            deck.publishes_sequence = true;
            for source in sources {
                deck.enqueue(source);
            }
            deck.current = None;
            deck.playing = false;
            deck.position = Duration::ZERO;
            deck.duration = None;
            deck.stage = if empty {
                ProcessingStage::Idle
            } else {
                ProcessingStage::Loading
            };
            Ok(())
        })?;

        if empty {
            return Ok(None);
        }

        let duration = self.load_after_latency().await?;
        info!(?duration, "Sequence ready");
        Ok(duration)
    }

    async fn play(&self) -> Result<(), EngineError> {
        self.mutate(|deck, _| {
            deck.ensure_source()?;
            deck.playing = true;
            Ok(())
        })
    }

    async fn pause(&self) -> Result<(), EngineError> {
        self.mutate(|deck, _| {
            deck.ensure_usable()?;
            deck.playing = false;
            Ok(())
        })
    }

    async fn seek(&self, position: Duration) -> Result<(), EngineError> {
        self.mutate(|deck, config| {
            deck.ensure_source()?;
            let length = deck.duration.unwrap_or(config.track_length);
            deck.position = position.min(length);
            if deck.stage == ProcessingStage::Completed && deck.position < length {
                deck.stage = ProcessingStage::Ready;
            }
            Ok(())
        })
    }

    async fn skip_to_next(&self) -> Result<(), EngineError> {
        self.mutate(|deck, config| {
            deck.ensure_source()?;
            if let Some(next) = deck.neighbour(true) {
                deck.load(Some(next), config.track_length);
            }
            Ok(())
        })
    }

    async fn skip_to_previous(&self) -> Result<(), EngineError> {
        self.mutate(|deck, config| {
            deck.ensure_source()?;
            if let Some(previous) = deck.neighbour(false) {
                deck.load(Some(previous), config.track_length);
            }
            Ok(())
        })
    }

    fn shuffle_enabled(&self) -> bool {
        self.inner.deck().shuffle
    }

    fn sequence_len(&self) -> usize {
        self.inner.deck().items.len()
    }

    async fn set_shuffle_enabled(&self, enabled: bool) -> Result<(), EngineError> {
        self.mutate(|deck, _| {
            deck.ensure_usable()?;
            deck.shuffle = enabled;
            Ok(())
        })
    }

    async fn reshuffle(&self) -> Result<(), EngineError> {
        self.mutate(|deck, _| {
            deck.ensure_usable()?;
            let current = deck.current;
            let mut rest: Vec<ItemId> = deck
                .items
                .iter()
                .map(|item| item.id)
                .filter(|id| Some(*id) != current)
                .collect();
            rest.shuffle(&mut rand::thread_rng());

            deck.shuffled = current.into_iter().chain(rest).collect();
            Ok(())
        })
    }

    async fn set_loop_mode(&self, mode: LoopMode) -> Result<(), EngineError> {
        self.mutate(|deck, _| {
            deck.ensure_usable()?;
            deck.loop_mode = mode;
            Ok(())
        })
    }

    async fn append_source(&self, source: QueuedSource) -> Result<SequenceItem, EngineError> {
        let mut deck = self.inner.deck();
        deck.ensure_usable()?;

        let item = deck.enqueue(source);
        deck.publishes_sequence = true;
        if deck.current.is_none() {
            deck.load(Some(item.id), self.inner.config.track_length);
        }

        self.inner.publish(&deck);
        Ok(item)
    }

    async fn remove_source(&self, index: usize) -> Result<(), EngineError> {
        self.mutate(|deck, config| {
            deck.ensure_usable()?;
            let len = deck.items.len();
            if index >= len {
                return Err(EngineError::InvalidIndex { index, len });
            }

            let removed = deck.items[index].id;
            if deck.current == Some(removed) {
                let replacement = deck.neighbour(true).or_else(|| deck.neighbour(false));
                let replacement = replacement.filter(|id| *id != removed);
                deck.load(replacement, config.track_length);
            }

            deck.items.remove(index);
            deck.shuffled.retain(|id| *id != removed);
            Ok(())
        })
    }

    async fn dispose(&self) {
        {
            let mut deck = self.inner.deck();
            deck.disposed = true;
            deck.playing = false;
        }

        let ticker = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = ticker {
            handle.abort();
        }

        self.inner.disposed.set(true);
        info!("Simulated engine disposed");
    }

    fn engine_state_stream(&self) -> BoxStream<'static, EngineState> {
        self.inner.watch_until_disposed(&self.inner.engine_state)
    }

    fn position_stream(&self) -> BoxStream<'static, Duration> {
        self.inner.watch_until_disposed(&self.inner.position)
    }

    fn buffered_position_stream(&self) -> BoxStream<'static, Duration> {
        self.inner.watch_until_disposed(&self.inner.buffered_position)
    }

    fn duration_stream(&self) -> BoxStream<'static, Option<Duration>> {
        self.inner.watch_until_disposed(&self.inner.duration)
    }

    fn sequence_state_stream(&self) -> BoxStream<'static, SequenceState> {
        self.inner
            .watch_until_disposed(&self.inner.sequence)
            .filter_map(ready)
            .boxed()
    }
}
