use std::io::{self, Write};

use futures::StreamExt;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    task::JoinHandle,
};
use tracing::{debug, info, instrument};

use super::{
    CliError, CommandResult,
    formatting::{
        format_error, format_info, render_details, render_help, render_playlist,
        render_status_line,
    },
    intent::Intent,
};
use crate::services::playback::{ButtonState, PlaybackService, PlaybackSnapshot, StateProjector};

/// Interactive player: renders every snapshot and runs typed commands.
pub struct PlayerSession {
    service: PlaybackService,
}

impl PlayerSession {
    /// Wrap a started playback service.
    pub fn new(service: PlaybackService) -> Self {
        Self { service }
    }

    /// The playback service driven by this session.
    pub fn service(&self) -> &PlaybackService {
        &self.service
    }

    /// Run one intent against the controls.
    ///
    /// `Quit` is a no-op here; [`PlayerSession::run`] handles it.
    ///
    /// # Errors
    /// Returns `CliError::Playback` when the engine rejects the command.
    #[instrument(skip(self))]
    pub async fn handle(&self, intent: Intent) -> CommandResult {
        let controls = self.service.controls();
        let snapshot = self.service.projector().snapshot();

        let message = match intent {
            Intent::Play => {
                controls.play().await?;
                None
            }
            Intent::Pause => {
                controls.pause().await?;
                None
            }
            Intent::Toggle => {
                if snapshot.button_state == ButtonState::Playing {
                    controls.pause().await?;
                } else {
                    controls.play().await?;
                }
                None
            }
            Intent::Seek(position) => {
                controls.seek(position).await?;
                None
            }
            Intent::Next => {
                controls.skip_to_next().await?;
                None
            }
            Intent::Previous => {
                controls.skip_to_previous().await?;
                None
            }
            Intent::Repeat => {
                let mode = controls.cycle_repeat_mode().await?;
                Some(format!("Repeat: {mode}"))
            }
            Intent::Shuffle => {
                let enabled = controls.toggle_shuffle().await?;
                Some(format!("Shuffle: {}", if enabled { "on" } else { "off" }))
            }
            Intent::Add => {
                let item = controls.append_track().await?;
                Some(format!("Added {}", item.label))
            }
            Intent::Remove => {
                if controls.remove_track().await? {
                    Some("Removed last song".to_string())
                } else {
                    Some("Playlist is empty".to_string())
                }
            }
            Intent::Status => Some(format!(
                "{}\n{}",
                render_details(&snapshot),
                render_playlist(&snapshot)
            )),
            Intent::Help => Some(render_help()),
            Intent::Quit => None,
        };

        Ok(message)
    }

    /// Read commands line by line until `quit` or end of input, then
    /// dispose the service.
    ///
    /// # Errors
    /// Returns `CliError::IoError` if reading input fails. Command errors
    /// are printed and do not end the session.
    pub async fn run<R>(self, input: R) -> Result<(), CliError>
    where
        R: AsyncBufRead + Unpin,
    {
        let renderer = spawn_renderer(self.service.projector());
        println!("{}", format_info("Type 'help' for commands, 'quit' to exit."));

        let mut lines = input.lines();
        let result = loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break Ok(()),
                Err(e) => break Err(CliError::from(e)),
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line.parse::<Intent>() {
                Ok(Intent::Quit) => break Ok(()),
                Ok(intent) => match self.handle(intent).await {
                    Ok(Some(message)) => println!("\n{message}"),
                    Ok(None) => {}
                    Err(e) => eprintln!("\n{}", format_error(&e.to_string())),
                },
                Err(e) => eprintln!("\n{}", format_error(&e.to_string())),
            }
        };

        renderer.abort();
        println!();
        info!("Leaving player");
        self.service.dispose().await;

        result
    }
}

/// Redraw the transport line on every snapshot, and the playlist whenever
/// it changes.
fn spawn_renderer(projector: &StateProjector) -> JoinHandle<()> {
    let mut snapshots = projector.watch();

    tokio::spawn(async move {
        let mut last_playlist: Option<(Vec<String>, String)> = None;

        while let Some(snapshot) = snapshots.next().await {
            let playlist_view = (
                snapshot.playlist.clone(),
                snapshot.current_track_label.clone(),
            );
            let show_playlist =
                !snapshot.playlist.is_empty() && last_playlist.as_ref() != Some(&playlist_view);

            let drawn = draw(&mut io::stdout().lock(), &snapshot, show_playlist);
            if let Err(e) = drawn {
                debug!("Stopping renderer, stdout unavailable: {e}");
                return;
            }

            if show_playlist {
                last_playlist = Some(playlist_view);
            }
        }

        debug!("Snapshot stream ended");
    })
}

fn draw<W: Write>(
    out: &mut W,
    snapshot: &PlaybackSnapshot,
    show_playlist: bool,
) -> io::Result<()> {
    if show_playlist {
        writeln!(out, "\r\x1b[2K{}", render_playlist(snapshot))?;
    }

    write!(out, "\r\x1b[2K{}", render_status_line(snapshot))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn snapshot() -> PlaybackSnapshot {
        PlaybackSnapshot {
            playlist: vec!["Song 1".into(), "Song 2".into()],
            current_track_label: "Song 1".into(),
            ..PlaybackSnapshot::default()
        }
    }

    #[test]
    fn draws_playlist_then_status_line() {
        let mut out = Vec::new();

        draw(&mut out, &snapshot(), true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(">  1. Song 1"));
        assert_eq!(text.matches("\r\x1b[2K").count(), 2);
    }

    #[test]
    fn status_line_alone_when_playlist_unchanged() {
        let mut out = Vec::new();

        draw(&mut out, &snapshot(), false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("1. Song 1"));
        assert!(text.contains("Song 1"));
    }

    #[test]
    fn write_failure_is_reported() {
        let err = draw(&mut ClosedPipe, &snapshot(), true).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
