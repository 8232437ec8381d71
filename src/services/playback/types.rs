use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Lifecycle phase the engine reports for its current source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingStage {
    /// Nothing loaded
    #[default]
    Idle,

    /// Source is being opened
    Loading,

    /// Playback is stalled waiting for data
    Buffering,

    /// Source is ready to play
    Ready,

    /// Playback reached the end of the source
    Completed,
}

/// One emission of the engine-state signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineState {
    /// Whether the engine intends to play
    pub playing: bool,

    /// Processing stage of the current source
    pub stage: ProcessingStage,
}

impl EngineState {
    /// Create an engine-state value
    pub fn new(playing: bool, stage: ProcessingStage) -> Self {
        Self { playing, stage }
    }
}

/// State shown on the play/pause button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Paused, button offers play
    #[default]
    Paused,

    /// Playing, button offers pause
    Playing,

    /// Loading or buffering, button shows progress
    Loading,
}

/// Repeat mode as presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// No repetition
    #[default]
    Off,

    /// Repeat the current track
    RepeatOne,

    /// Repeat the whole playlist
    RepeatAll,
}

impl RepeatMode {
    /// Next mode in the cycle: Off → RepeatOne → RepeatAll → Off
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::RepeatOne,
            Self::RepeatOne => Self::RepeatAll,
            Self::RepeatAll => Self::Off,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatMode::Off => write!(f, "off"),
            RepeatMode::RepeatOne => write!(f, "one"),
            RepeatMode::RepeatAll => write!(f, "all"),
        }
    }
}

/// Loop mode understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play through once
    #[default]
    Off,

    /// Loop the current item
    One,

    /// Loop the whole sequence
    All,
}

impl From<RepeatMode> for LoopMode {
    fn from(mode: RepeatMode) -> Self {
        match mode {
            RepeatMode::Off => Self::Off,
            RepeatMode::RepeatOne => Self::One,
            RepeatMode::RepeatAll => Self::All,
        }
    }
}

/// Where an engine loads audio from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackSource {
    /// Remote HTTP(S) resource
    Url(String),

    /// Bundled asset path
    Asset(String),
}

impl fmt::Display for TrackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackSource::Url(url) => write!(f, "{url}"),
            TrackSource::Asset(path) => write!(f, "{path}"),
        }
    }
}

impl FromStr for TrackSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::Asset(s.to_string()))
        }
    }
}

/// Identity of an item queued in the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entry in the engine's playback sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceItem {
    /// Engine-assigned identity
    pub id: ItemId,

    /// Human-readable label
    pub label: String,

    /// Where the audio comes from
    pub source: TrackSource,
}

/// A source the caller wants queued, before the engine assigns an identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedSource {
    /// Human-readable label
    pub label: String,

    /// Where the audio comes from
    pub source: TrackSource,
}

impl QueuedSource {
    /// Demo naming convention: `Song {n}` at `{prefix}/{n}.mp3`
    pub fn numbered(prefix: &str, number: usize) -> Self {
        Self {
            label: format!("Song {number}"),
            source: TrackSource::Asset(format!("{prefix}/{number}.mp3")),
        }
    }
}

/// One emission of the sequence-state signal
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequenceState {
    /// Item currently loaded, if any
    pub current: Option<SequenceItem>,

    /// Items in the order they will play
    pub effective_sequence: Vec<SequenceItem>,

    /// Whether the effective order is shuffled
    pub shuffle_enabled: bool,
}
