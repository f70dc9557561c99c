//! Subcommand implementations

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::headless::{HeadlessPlayer, RunSummary, SimulationOptions};
use cr8te_core::{DatabaseTrack, IpfsGateway};
use cr8te_playback::{format_clock, PlaybackSession, QueueEntry};
use cr8te_server_client::{Cr8teClient, StreamReporter};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{info, warn};

/// Options for the `play` subcommand
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Feed position to start at (among playable tracks)
    pub start: usize,
    pub max_tracks: Option<usize>,
    pub realtime: bool,
}

/// Fetch the feed and render it as a listing
pub async fn feed(config: &CliConfig) -> Result<String> {
    let client = Cr8teClient::new(config.server_config())?;
    let tracks = client.feed().await?;
    info!(tracks = tracks.len(), server = %client.url(), "Fetched feed");

    Ok(render_feed(&tracks))
}

/// Play the feed headlessly, reporting counted listens to the server
pub async fn play(config: &CliConfig, options: &PlayOptions) -> Result<RunSummary> {
    let client = Arc::new(Cr8teClient::new(config.server_config())?);
    let tracks = client.feed().await?;

    let entries = playable_entries(&tracks, &config.gateway());
    if entries.is_empty() {
        return Err(CliError::NothingToPlay(format!(
            "{} has no playable tracks",
            client.url()
        )));
    }

    if !client.is_authenticated() {
        info!("No access token configured, streams are reported anonymously");
    }

    let reporter = Arc::new(StreamReporter::new(
        Arc::clone(&client),
        tokio::runtime::Handle::current(),
    ));
    let mut session = PlaybackSession::new(config.playback_config(), reporter.clone());
    session.play_collection(entries, options.start)?;

    let mut player = HeadlessPlayer::new(
        session,
        SimulationOptions {
            tick_secs: config.simulation.tick_secs,
            default_track_secs: config.simulation.default_track_secs,
            max_tracks: options.max_tracks,
            realtime: options.realtime,
        },
    );
    let summary = player.run().await;

    if reporter.pending() > 0 {
        info!(pending = reporter.pending(), "Waiting for stream reports");
    }
    reporter.flush().await;

    Ok(summary)
}

/// Normalize feed tracks, skipping the ones that cannot be played
pub fn playable_entries(tracks: &[DatabaseTrack], gateway: &IpfsGateway) -> Vec<QueueEntry> {
    tracks
        .iter()
        .filter_map(|track| match QueueEntry::from_database(track, gateway) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(track_id = %track.id, error = %e, "Skipping track");
                None
            }
        })
        .collect()
}

/// One line per track: position, artist, title, length and stream count
pub fn render_feed(tracks: &[DatabaseTrack]) -> String {
    let mut out = String::new();

    for (index, track) in tracks.iter().enumerate() {
        let length = track
            .duration
            .map_or_else(|| "--:--".to_string(), format_clock);
        let _ = writeln!(
            out,
            "{:>3}  {:>6}  {} - {}  ({} streams)",
            index,
            length,
            track.artist_name().unwrap_or("Unknown"),
            track.title,
            track.stream_count
        );
    }

    out
}
