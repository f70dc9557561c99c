//! Types for CR8TE API requests and responses.

use serde::{Deserialize, Serialize};

/// Configuration for connecting to the CR8TE platform.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the platform (e.g., "https://cr8te.example.com")
    pub url: String,
    /// Listener token forwarded with stream reports (anonymous when absent)
    pub access_token: Option<String>,
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
        }
    }

    /// Create a config that identifies the listener.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
        }
    }
}

/// Request body for the stream-count endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRequest<'a> {
    pub track_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<&'a str>,
}

/// Response from the stream-count endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamResponse {
    #[serde(default)]
    pub success: bool,
}

/// Error body returned by the platform (`{"error": "..."}`).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
