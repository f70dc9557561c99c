//! Playback Events
//!
//! Two outbound streams leave a session:
//! - `MediaCommand`: instructions for the media boundary (audio element,
//!   decoder, ...) that actually renders sound
//! - `PlaybackEvent`: notifications for UI synchronization
//!
//! Both are queued during a call and drained by the owner afterwards.

use crate::types::PlaybackState;
use cr8te_core::TrackId;
use serde::{Deserialize, Serialize};

/// Instructions for the media playback boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaCommand {
    /// Load the locator and start playing from zero
    Play {
        /// Entry being loaded
        track_id: TrackId,
        /// Resolved audio URL
        audio_url: String,
    },

    /// Load the locator without starting playback
    Cue {
        /// Entry being loaded
        track_id: TrackId,
        /// Resolved audio URL
        audio_url: String,
    },

    /// Continue the loaded media from its current position
    Resume,

    /// Pause in place
    Pause,
}

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed (playing or paused)
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Current entry changed
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Queue contents replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// A qualifying listen was reported for this track
    PlayCounted {
        /// ID of the counted track
        track_id: TrackId,
    },
}
