//! Track shapes served by the platform

use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Artist summary embedded in feed tracks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRef {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Profile picture locator (IPFS CID)
    #[serde(default)]
    pub image_cid: Option<String>,
}

/// Collection (album/EP) summary embedded in feed tracks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRef {
    /// Cover artwork locator
    #[serde(default)]
    pub cover_url: Option<String>,
}

/// Track uploaded through the platform and stored in its database
///
/// This is the shape returned by `GET /api/music/feed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseTrack {
    /// Database identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Uploading artist
    #[serde(default)]
    pub artist: Option<ArtistRef>,

    /// Uploading artist's user ID
    #[serde(default)]
    pub artist_id: Option<String>,

    /// Audio locator (IPFS or HTTP)
    #[serde(default)]
    pub audio_url: Option<String>,

    /// Collection the track belongs to
    #[serde(default)]
    pub collection: Option<CollectionRef>,

    /// Duration in seconds, when the uploader provided one
    #[serde(default)]
    pub duration: Option<f64>,

    /// Number of qualifying listens recorded so far
    #[serde(default)]
    pub stream_count: u64,
}

impl DatabaseTrack {
    /// Artist display name, if present
    pub fn artist_name(&self) -> Option<&str> {
        self.artist
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// Artwork locator: collection cover first, then artist picture
    pub fn artwork_locator(&self) -> Option<&str> {
        self.collection
            .as_ref()
            .and_then(|c| c.cover_url.as_deref())
            .filter(|c| !c.is_empty())
            .or_else(|| self.artist.as_ref().and_then(|a| a.image_cid.as_deref()))
    }
}

/// Single NFT attribute (`{"trait_type": "Artist", "value": "..."}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainAttribute {
    #[serde(default)]
    pub trait_type: Option<String>,

    #[serde(default)]
    pub value: serde_json::Value,
}

impl ChainAttribute {
    /// Attribute value rendered for display
    pub fn display_value(&self) -> Option<String> {
        match &self.value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// NFT metadata JSON stored on IPFS
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChainMetadata {
    #[serde(default)]
    pub name: Option<String>,

    /// Artwork locator
    #[serde(default)]
    pub image: Option<String>,

    /// Audio locator
    #[serde(default)]
    pub animation_url: Option<String>,

    #[serde(default)]
    pub attributes: Vec<ChainAttribute>,
}

/// Track read from the music NFT contract
///
/// The contract only knows the token ID, the minting artist's address and
/// the metadata locator. `metadata` is filled in once the JSON behind `uri`
/// has been fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTrack {
    /// NFT token ID
    pub token_id: TrackId,

    /// Artist wallet address
    pub artist: String,

    /// Metadata locator (`ipfs://...`)
    pub uri: String,

    #[serde(default)]
    pub metadata: Option<ChainMetadata>,
}

impl ChainTrack {
    /// Attach fetched metadata
    pub fn with_metadata(mut self, metadata: ChainMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Either track shape, as it arrives from a data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum TrackRecord {
    /// Platform database track
    Database(DatabaseTrack),

    /// On-chain NFT track
    Chain(ChainTrack),
}

impl TrackRecord {
    /// Identifier the record will be queued under
    pub fn id(&self) -> &TrackId {
        match self {
            TrackRecord::Database(track) => &track.id,
            TrackRecord::Chain(track) => &track.token_id,
        }
    }
}

impl From<DatabaseTrack> for TrackRecord {
    fn from(track: DatabaseTrack) -> Self {
        TrackRecord::Database(track)
    }
}

impl From<ChainTrack> for TrackRecord {
    fn from(track: ChainTrack) -> Self {
        TrackRecord::Chain(track)
    }
}
