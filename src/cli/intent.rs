use std::{str::FromStr, time::Duration};

use super::CliError;

/// A user intent typed at the player prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start or resume playback
    Play,
    /// Pause playback
    Pause,
    /// Play if paused, pause otherwise
    Toggle,
    /// Jump to an absolute position
    Seek(Duration),
    /// Next track
    Next,
    /// Previous track
    Previous,
    /// Cycle repeat mode
    Repeat,
    /// Toggle shuffle
    Shuffle,
    /// Append a song to the playlist
    Add,
    /// Remove the last song from the playlist
    Remove,
    /// Print the full snapshot
    Status,
    /// Print the command list
    Help,
    /// Leave the player
    Quit,
}

/// Name, argument hint and description of every command, for help output.
pub const CATALOGUE: &[(&str, &str, &str)] = &[
    ("play", "", "Start or resume playback"),
    ("pause", "", "Pause playback"),
    ("toggle", "", "Play or pause"),
    ("seek", "<secs|mm:ss>", "Jump to a position"),
    ("next", "", "Skip to the next track"),
    ("prev", "", "Skip to the previous track"),
    ("repeat", "", "Cycle repeat: off → one → all"),
    ("shuffle", "", "Toggle shuffle"),
    ("add", "", "Append a song to the playlist"),
    ("remove", "", "Remove the last song"),
    ("status", "", "Show the full playback state"),
    ("help", "", "Show this list"),
    ("quit", "", "Exit the player"),
];

/// Parse `90`, `1:30` or `1:02:03` into a duration.
///
/// # Errors
/// Returns `CliError::InvalidArguments` for anything else.
pub fn parse_position(text: &str) -> Result<Duration, CliError> {
    let invalid = || CliError::InvalidArguments(format!("'{text}' is not a position"));

    let mut seconds: u64 = 0;
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() > 3 {
        return Err(invalid());
    }

    for (i, part) in parts.iter().enumerate() {
        let value: u64 = part.trim().parse().map_err(|_| invalid())?;
        if i > 0 && value >= 60 {
            return Err(invalid());
        }
        seconds = seconds
            .checked_mul(60)
            .and_then(|s| s.checked_add(value))
            .ok_or_else(invalid)?;
    }

    Ok(Duration::from_secs(seconds))
}

impl FromStr for Intent {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_lowercase();
        let argument = words.next();

        let intent = match command.as_str() {
            "play" => Intent::Play,
            "pause" => Intent::Pause,
            "toggle" | "p" => Intent::Toggle,
            "seek" => {
                let position = argument.ok_or_else(|| {
                    CliError::InvalidArguments("seek needs a position".to_string())
                })?;
                Intent::Seek(parse_position(position)?)
            }
            "next" | "n" => Intent::Next,
            "prev" | "previous" => Intent::Previous,
            "repeat" | "r" => Intent::Repeat,
            "shuffle" | "s" => Intent::Shuffle,
            "add" => Intent::Add,
            "remove" | "rm" => Intent::Remove,
            "status" => Intent::Status,
            "help" | "?" => Intent::Help,
            "quit" | "exit" | "q" => Intent::Quit,
            other => return Err(CliError::CommandNotFound(other.to_string())),
        };

        Ok(intent)
    }
}
