/// Core error types for CR8TE Player
use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for CR8TE Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// A chain track was used before its IPFS metadata was fetched
    #[error("Metadata not loaded for token {0}")]
    MissingMetadata(TrackId),

    /// A track has no playable audio locator
    #[error("No audio locator for track {0}")]
    MissingAudio(TrackId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_track() {
        let err = CoreError::MissingMetadata(TrackId::new("12"));
        assert_eq!(err.to_string(), "Metadata not loaded for token 12");

        let err = CoreError::invalid_input("empty title");
        assert_eq!(err.to_string(), "Invalid input: empty title");
    }

    #[test]
    fn json_errors_convert() {
        fn parse(raw: &str) -> Result<TrackId> {
            Ok(serde_json::from_str(raw)?)
        }

        assert!(matches!(parse("{"), Err(CoreError::Serialization(_))));
    }
}
