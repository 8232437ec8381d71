use thiserror::Error;

use crate::services::playback::EngineError;

/// Errors that can occur while handling a typed player command.
///
/// None of these end the session: the player prints the error and keeps
/// reading input.
#[derive(Error, Debug)]
pub enum CliError {
    /// The command word was not recognised.
    #[error("Unknown command: {0} (type 'help' for a list)")]
    CommandNotFound(String),

    /// Arguments were missing or malformed.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The engine rejected the command.
    #[error("Playback error: {0}")]
    Playback(#[from] EngineError),

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Outcome of one command: an optional message for the user.
pub type CommandResult = Result<Option<String>, CliError>;
