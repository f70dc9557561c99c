//! Error types for playback management

use cr8te_core::{CoreError, TrackId};
use thiserror::Error;

/// Playback errors
///
/// All variants are caller-contract violations: the session state is left
/// untouched when one is returned.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A collection was requested with no tracks in it
    #[error("Cannot play an empty collection")]
    EmptyCollection,

    /// Start index does not point into the collection
    #[error("Start index {index} out of range for collection of {len} tracks")]
    StartIndexOutOfRange { index: usize, len: usize },

    /// The same track appears twice in one collection
    #[error("Duplicate track in collection: {0}")]
    DuplicateEntry(TrackId),

    /// A track record could not be turned into a playable entry
    #[error("Track not playable: {0}")]
    Track(#[from] CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
