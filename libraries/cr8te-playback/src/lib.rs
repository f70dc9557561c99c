//! CR8TE Player - Playback Management
//!
//! Platform-agnostic playback queue and stream counting for CR8TE Player.
//!
//! This crate provides:
//! - Ordered play queue with a cursor (single track or whole collection)
//! - Play / pause / next / previous transport with end-of-queue reset
//! - Normalization of database and chain tracks into one entry shape
//! - Once-per-listen stream counting after 30 seconds of media time
//! - Media commands and UI events for the owning platform layer
//!
//! # Architecture
//!
//! `cr8te-playback` renders no audio and performs no I/O:
//! - The media boundary (an audio element, a decoder, a simulated clock)
//!   consumes `MediaCommand`s and reports time updates and "ended" back
//! - Play counts leave through the `PlayReporter` trait; the HTTP
//!   implementation lives in `cr8te-server-client`
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cr8te_core::TrackId;
//! use cr8te_playback::{MediaCommand, PlaybackSession, QueueEntry};
//!
//! let mut session = PlaybackSession::default();
//!
//! let entry = QueueEntry {
//!     id: TrackId::new("track1"),
//!     title: "My Song".to_string(),
//!     attribution: "Artist Name".to_string(),
//!     audio_url: "https://gateway.pinata.cloud/ipfs/QmAudio".to_string(),
//!     artwork_url: String::new(),
//!     duration_secs: Some(180.0),
//! };
//!
//! session.play_single(entry);
//! assert!(session.is_playing());
//!
//! // Hand commands to the media boundary
//! for command in session.drain_commands() {
//!     if let MediaCommand::Play { audio_url, .. } = command {
//!         assert!(audio_url.ends_with("QmAudio"));
//!     }
//! }
//!
//! // Wire media callbacks back in
//! session.on_time_update(31.0, Some(180.0));
//! assert!(session.is_counted());
//! session.on_ended();
//! assert!(!session.is_playing());
//! ```
//!
//! # Example: Reporting Plays
//!
//! ```rust
//! use cr8te_playback::{PlayReport, PlayReporter, PlaybackConfig, PlaybackSession};
//! use std::sync::Arc;
//!
//! struct LogReporter;
//!
//! impl PlayReporter for LogReporter {
//!     fn report(&self, report: PlayReport) {
//!         println!("counted {}", report.track_id);
//!     }
//! }
//!
//! let session = PlaybackSession::new(PlaybackConfig::default(), Arc::new(LogReporter));
//! assert!(session.is_empty());
//! ```

mod error;
mod events;
mod play_count;
mod queue;
mod reporter;
mod session;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::{MediaCommand, PlaybackEvent};
pub use play_count::StreamCountTrigger;
pub use queue::{Advance, PlaybackQueue};
pub use reporter::{NoopReporter, PlayReport, PlayReporter};
pub use session::PlaybackSession;
pub use types::{format_clock, PlaybackConfig, PlaybackState, QueueEntry};
