//! Command-line interface for the terminal player.
//!
//! `spindle clip` and `spindle playlist` start a player and read commands
//! from stdin; `spindle schema` prints the config file schema.

pub mod formatting;
mod intent;
mod session;
mod types;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use intent::{CATALOGUE, Intent, parse_position};
pub use session::PlayerSession;
pub use types::{CliError, CommandResult};

/// Terminal audio player demo.
#[derive(Debug, Parser)]
#[command(name = "spindle", version, about)]
pub struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write logs to a rolling file under ~/.spindle/logs.
    #[arg(long, global = true)]
    pub log_file: bool,

    /// What to run.
    #[command(subcommand)]
    pub mode: Mode,
}

/// Player variants and utilities.
#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Play a single clip.
    Clip {
        /// URL or asset path; defaults to the configured clip.
        #[arg(long)]
        source: Option<String>,
    },

    /// Play a playlist of numbered songs.
    Playlist {
        /// Number of songs to start with; defaults to the configured count.
        #[arg(long)]
        songs: Option<usize>,
    },

    /// Print the JSON schema of the config file.
    Schema,
}
