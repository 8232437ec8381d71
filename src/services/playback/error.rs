/// Failures reported by an audio engine
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine was disposed and accepts no more commands
    #[error("engine has been disposed")]
    Disposed,

    /// The command needs a loaded source
    #[error("no source loaded")]
    NoSource,

    /// Sequence index out of range
    #[error("index {index} out of range for sequence of {len}")]
    InvalidIndex {
        /// Requested index
        index: usize,
        /// Sequence length at the time of the call
        len: usize,
    },

    /// The source could not be opened
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
}
