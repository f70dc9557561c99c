/// ID types for CR8TE entities
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Track identifier
///
/// Database tracks use UUID strings; chain tracks use the NFT token ID, which
/// the contract returns as a number. Both are held as strings. Numeric ids
/// must fit in a `u64`; larger token ids have to arrive as JSON strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
    // Token ids are uint256; past u64 the JSON number arrives as a float
    Wide(serde_json::Number),
}

impl<'de> Deserialize<'de> for TrackId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Ok(Self(s)),
            RawId::Number(n) => Ok(Self(n.to_string())),
            RawId::Wide(n) => Err(de::Error::custom(format!(
                "numeric id {} does not fit in 64 bits, send it as a string",
                n
            ))),
        }
    }
}
