//! Core types for playback management

use cr8te_core::{ChainTrack, CoreError, DatabaseTrack, IpfsGateway, TrackId, TrackRecord};
use serde::{Deserialize, Serialize};

/// Qualifying-listen threshold used by the platform, in seconds of media time
pub const DEFAULT_QUALIFYING_LISTEN_SECS: f64 = 30.0;

const UNKNOWN_TRACK: &str = "Unknown Track";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_UPLOADER: &str = "Unknown";

/// One playable unit in the queue
///
/// Locators are already resolved to fetchable URLs; the queue never looks
/// at where a track came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Stable identifier, unique within a queue
    pub id: TrackId,

    /// Display title
    pub title: String,

    /// Display attribution (artist name)
    pub attribution: String,

    /// Resolved audio URL
    pub audio_url: String,

    /// Resolved artwork URL (may be empty)
    pub artwork_url: String,

    /// Duration in seconds, if known before playback
    pub duration_secs: Option<f64>,
}

impl QueueEntry {
    /// Normalize either track shape into a queue entry
    pub fn from_record(record: &TrackRecord, gateway: &IpfsGateway) -> cr8te_core::Result<Self> {
        match record {
            TrackRecord::Database(track) => Self::from_database(track, gateway),
            TrackRecord::Chain(track) => Self::from_chain(track, gateway),
        }
    }

    /// Normalize a feed track
    pub fn from_database(track: &DatabaseTrack, gateway: &IpfsGateway) -> cr8te_core::Result<Self> {
        let audio_url = gateway.resolve(track.audio_url.as_deref());
        if audio_url.is_empty() {
            return Err(CoreError::MissingAudio(track.id.clone()));
        }

        Ok(Self {
            id: track.id.clone(),
            title: track.title.clone(),
            attribution: track.artist_name().unwrap_or(UNKNOWN_UPLOADER).to_string(),
            audio_url,
            artwork_url: gateway.resolve(track.artwork_locator()),
            duration_secs: track.duration.filter(|d| d.is_finite() && *d > 0.0),
        })
    }

    /// Normalize an NFT track
    ///
    /// Fails until the metadata JSON has been fetched, since the audio
    /// locator only lives there.
    pub fn from_chain(track: &ChainTrack, gateway: &IpfsGateway) -> cr8te_core::Result<Self> {
        let metadata = track
            .metadata
            .as_ref()
            .ok_or_else(|| CoreError::MissingMetadata(track.token_id.clone()))?;

        let audio_url = gateway.resolve(metadata.animation_url.as_deref());
        if audio_url.is_empty() {
            return Err(CoreError::MissingAudio(track.token_id.clone()));
        }

        let title = metadata
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNKNOWN_TRACK.to_string());
        let attribution = metadata
            .attributes
            .first()
            .and_then(|a| a.display_value())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        Ok(Self {
            id: track.token_id.clone(),
            title,
            attribution,
            audio_url,
            artwork_url: gateway.resolve(metadata.image.as_deref()),
            duration_secs: None,
        })
    }
}

/// Playback state
///
/// Derived from the session; `Playing` implies a current entry exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Currently playing
    Playing,

    /// Paused, or nothing loaded
    Paused,
}

/// Configuration for a playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Media seconds a track must exceed before its play is counted (default: 30)
    pub qualifying_listen_secs: f64,

    /// Gateway used to resolve track locators
    pub gateway: IpfsGateway,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            qualifying_listen_secs: DEFAULT_QUALIFYING_LISTEN_SECS,
            gateway: IpfsGateway::default(),
        }
    }
}

/// Format seconds as `m:ss` for player display
pub fn format_clock(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
