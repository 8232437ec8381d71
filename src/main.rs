//! Spindle terminal player - entry point
//!
//! Runs on a single-threaded runtime: engine signals, the state projector
//! and the renderer all take turns on one thread.

use std::{error::Error, process};

use clap::Parser;
use spindle::{
    cli::{Cli, Mode, PlayerSession, formatting::format_error},
    config::Config,
    services::playback::{self, PlaybackService, SimulatedEngineConfig, TrackSource},
    tracing_config,
};
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    };

    if let Mode::Schema = cli.mode {
        let schema = schemars::schema_for!(Config);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    if cli.log_file {
        tracing_config::init_with_file(config.general.log_level)?;
    } else {
        tracing_config::init(config.general.log_level)?;
    }

    let service = PlaybackService::simulated(
        SimulatedEngineConfig::from(&config.engine),
        playback::Config {
            asset_prefix: config.player.asset_prefix.clone(),
        },
    );

    let opened = match cli.mode {
        Mode::Clip { source } => {
            let source = source.unwrap_or_else(|| config.player.clip_source.clone());
            info!("Opening clip {source}");
            let source = source.parse::<TrackSource>()?;
            service.controls().open_clip(source).await
        }
        Mode::Playlist { songs } => {
            let songs = songs.unwrap_or(config.player.initial_songs);
            info!("Opening playlist of {songs} songs");
            service.controls().open_playlist(songs).await
        }
        Mode::Schema => Ok(None),
    };

    if let Err(e) = opened {
        error!("Failed to open source: {e}");
        eprintln!("{}", format_error(&e.to_string()));
    }

    let input = BufReader::new(tokio::io::stdin());
    PlayerSession::new(service).run(input).await?;

    Ok(())
}
