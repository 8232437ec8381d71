//! Formatting utilities for the terminal player.
//!
//! Renders playback snapshots the way the player widgets show them: a
//! transport line with the button state and progress bar, and the
//! playlist with the current entry marked.

use std::{fmt::Write, time::Duration};

use super::intent::CATALOGUE;
use crate::services::playback::{ButtonState, PlaybackSnapshot, RepeatMode};

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

const BAR_WIDTH: usize = 24;

/// Formats a duration as `m:ss`, or `h:mm:ss` past an hour.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Draws the progress bar: `=` played, `-` buffered, ` ` not yet loaded.
///
/// An unknown total duration draws an empty bar.
pub fn progress_bar(snapshot: &PlaybackSnapshot) -> String {
    let total = snapshot.total_duration.as_secs_f64();
    let cells = |position: Duration| -> usize {
        if total <= 0.0 {
            return 0;
        }
        let ratio = (position.as_secs_f64() / total).clamp(0.0, 1.0);
        (ratio * BAR_WIDTH as f64).round() as usize
    };

    let played = cells(snapshot.current_position);
    let buffered = cells(snapshot.buffered_position).max(played);

    format!(
        "[{}{}{}]",
        "=".repeat(played),
        "-".repeat(buffered - played),
        " ".repeat(BAR_WIDTH - buffered)
    )
}

fn button_glyph(state: ButtonState) -> &'static str {
    match state {
        ButtonState::Playing => "⏸",
        ButtonState::Paused => "▶",
        ButtonState::Loading => "…",
    }
}

fn repeat_glyph(mode: RepeatMode) -> &'static str {
    match mode {
        RepeatMode::Off => "↻ off",
        RepeatMode::RepeatOne => "↻ one",
        RepeatMode::RepeatAll => "↻ all",
    }
}

fn enabled(text: &str, on: bool) -> String {
    if on {
        format!("{}{}{}", Colors::BOLD, text, Colors::RESET)
    } else {
        format!("{}{}{}", Colors::DIM, text, Colors::RESET)
    }
}

/// One-line transport view: navigation, button, progress and modes.
pub fn render_status_line(snapshot: &PlaybackSnapshot) -> String {
    let previous = enabled("⏮", !snapshot.is_first_track);
    let next = enabled("⏭", !snapshot.is_last_track);
    let button = format!(
        "{}{}{}",
        Colors::GREEN,
        button_glyph(snapshot.button_state),
        Colors::RESET
    );

    let mut line = format!(
        "{previous} {button} {next} {} {} / {}",
        progress_bar(snapshot),
        format_duration(snapshot.current_position),
        format_duration(snapshot.total_duration),
    );

    let _ = write!(
        line,
        "  {}  {}",
        enabled(repeat_glyph(snapshot.repeat_mode), snapshot.repeat_mode != RepeatMode::Off),
        enabled("⇄", snapshot.shuffle_enabled),
    );

    if !snapshot.current_track_label.is_empty() {
        let _ = write!(
            line,
            "  {}{}{}",
            Colors::CYAN,
            snapshot.current_track_label,
            Colors::RESET
        );
    }

    line
}

/// Playlist view with the current entry marked.
pub fn render_playlist(snapshot: &PlaybackSnapshot) -> String {
    if snapshot.playlist.is_empty() {
        return format!("{}(playlist empty){}", Colors::DIM, Colors::RESET);
    }

    snapshot
        .playlist
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let marker = if *label == snapshot.current_track_label {
                ">"
            } else {
                " "
            };
            format!("{marker} {:>2}. {label}", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every snapshot field, one per line.
pub fn render_details(snapshot: &PlaybackSnapshot) -> String {
    format!(
        "button:    {:?}\nposition:  {}\nbuffered:  {}\nduration:  {}\nrepeat:    {}\nshuffle:   {}\ntrack:     {}\nfirst/last: {}/{}",
        snapshot.button_state,
        format_duration(snapshot.current_position),
        format_duration(snapshot.buffered_position),
        format_duration(snapshot.total_duration),
        snapshot.repeat_mode,
        snapshot.shuffle_enabled,
        snapshot.current_track_label,
        snapshot.is_first_track,
        snapshot.is_last_track,
    )
}

/// Command list for the `help` command.
pub fn render_help() -> String {
    let mut help = format!("{}{}Commands{}\n", Colors::BOLD, Colors::CYAN, Colors::RESET);

    for (name, args, description) in CATALOGUE {
        let usage = if args.is_empty() {
            (*name).to_string()
        } else {
            format!("{name} {args}")
        };
        let _ = writeln!(
            help,
            "  {}{usage:<20}{} {}{description}{}",
            Colors::GREEN,
            Colors::RESET,
            Colors::DIM,
            Colors::RESET
        );
    }

    help
}

/// Formats error messages with styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}", Colors::RED, text, Colors::RESET)
}

/// Formats informational messages with styling
pub fn format_info(text: &str) -> String {
    format!("{}{}{}", Colors::YELLOW, text, Colors::RESET)
}
