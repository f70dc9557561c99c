//! Headless player
//!
//! Stands in for an audio element: obeys the session's media commands,
//! advances a simulated media clock and feeds time updates and "ended"
//! back into the session. No audio is decoded.

use cr8te_core::TrackId;
use cr8te_playback::{format_clock, MediaCommand, PlaybackEvent, PlaybackSession};
use std::time::Duration;
use tracing::{debug, info, warn};

const FALLBACK_TICK_SECS: f64 = 1.0;
const FALLBACK_TRACK_SECS: f64 = 180.0;

/// How the simulated clock runs
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Media seconds added per tick
    pub tick_secs: f64,

    /// Length assumed when neither the entry nor the media reports one
    pub default_track_secs: f64,

    /// Stop before starting more than this many tracks
    pub max_tracks: Option<usize>,

    /// Sleep `tick_secs` of wall time per tick
    pub realtime: bool,
}

/// What happened during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Tracks started from zero, in order
    pub started: Vec<TrackId>,

    /// Tracks whose listen was counted, in order
    pub counted: Vec<TrackId>,

    /// Simulated media seconds played
    pub media_secs: f64,
}

/// Simulated media element
#[derive(Debug, Default)]
struct SimulatedMedia {
    loaded: Option<TrackId>,
    position: f64,
    playing: bool,
}

/// Drives a session to completion against a simulated clock
pub struct HeadlessPlayer {
    session: PlaybackSession,
    media: SimulatedMedia,
    options: SimulationOptions,
}

impl HeadlessPlayer {
    /// Non-positive or non-finite clock settings fall back to defaults
    pub fn new(session: PlaybackSession, mut options: SimulationOptions) -> Self {
        options.tick_secs = positive_or("tick_secs", options.tick_secs, FALLBACK_TICK_SECS);
        options.default_track_secs = positive_or(
            "default_track_secs",
            options.default_track_secs,
            FALLBACK_TRACK_SECS,
        );

        Self {
            session,
            media: SimulatedMedia::default(),
            options,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Play until the queue runs out or the track limit is hit
    ///
    /// The session resets to the first entry, paused, after its last entry
    /// ends; that stops the run.
    pub async fn run(&mut self) -> RunSummary {
        let mut summary = RunSummary::default();

        loop {
            self.dispatch_commands(&mut summary);
            self.collect_events(&mut summary);

            if !self.media.playing {
                break;
            }

            self.tick(&mut summary);

            if self.options.realtime {
                tokio::time::sleep(Duration::from_secs_f64(self.options.tick_secs)).await;
            }
        }

        info!(
            started = summary.started.len(),
            counted = summary.counted.len(),
            played = %format_clock(summary.media_secs),
            "Playback finished"
        );

        summary
    }

    fn dispatch_commands(&mut self, summary: &mut RunSummary) {
        for command in self.session.drain_commands() {
            match command {
                MediaCommand::Play {
                    track_id,
                    audio_url,
                } => {
                    if self
                        .options
                        .max_tracks
                        .is_some_and(|max| summary.started.len() >= max)
                    {
                        info!(track_id = %track_id, "Track limit reached");
                        self.media.playing = false;
                        self.session.pause();
                        // The pause command is for media we never started
                        self.session.drain_commands();
                        return;
                    }

                    let title = self
                        .session
                        .current_entry()
                        .map(|e| format!("{} - {}", e.attribution, e.title))
                        .unwrap_or_default();
                    info!(track_id = %track_id, url = %audio_url, "Now playing: {}", title);

                    summary.started.push(track_id.clone());
                    self.media.loaded = Some(track_id);
                    self.media.position = 0.0;
                    self.media.playing = true;
                }
                MediaCommand::Cue {
                    track_id,
                    audio_url,
                } => {
                    debug!(track_id = %track_id, url = %audio_url, "Cued");
                    self.media.loaded = Some(track_id);
                    self.media.position = 0.0;
                    self.media.playing = false;
                }
                MediaCommand::Resume => {
                    debug!(track_id = ?self.media.loaded, "Resumed");
                    self.media.playing = self.media.loaded.is_some();
                }
                MediaCommand::Pause => {
                    debug!(track_id = ?self.media.loaded, "Paused");
                    self.media.playing = false;
                }
            }
        }
    }

    fn collect_events(&mut self, summary: &mut RunSummary) {
        for event in self.session.drain_events() {
            match event {
                PlaybackEvent::PlayCounted { track_id } => {
                    summary.counted.push(track_id);
                }
                PlaybackEvent::TrackChanged {
                    track_id,
                    previous_track_id,
                } => {
                    debug!(track_id = %track_id, previous = ?previous_track_id, "Track changed");
                }
                PlaybackEvent::StateChanged { state } => debug!(?state, "State changed"),
                PlaybackEvent::QueueChanged { length } => debug!(length, "Queue changed"),
            }
        }
    }

    fn tick(&mut self, summary: &mut RunSummary) {
        let duration = self
            .session
            .total_secs()
            .unwrap_or(self.options.default_track_secs);

        let step = self.options.tick_secs.min(duration - self.media.position).max(0.0);
        self.media.position += step;
        summary.media_secs += step;

        self.session
            .on_time_update(self.media.position, Some(duration));

        if self.media.position >= duration {
            self.session.on_ended();
        }
    }
}

fn positive_or(name: &str, value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!(setting = name, value, fallback, "Invalid simulation setting");
        fallback
    }
}
