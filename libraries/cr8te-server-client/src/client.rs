//! Main CR8TE platform client.

use crate::error::{Result, ServerClientError};
use crate::types::{ErrorBody, ServerConfig, StreamRequest, StreamResponse};
use cr8te_core::{ChainMetadata, ChainTrack, DatabaseTrack, IpfsGateway, TrackId};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Client for the CR8TE music API.
///
/// Covers the endpoints a player needs: the public feed, the stream-count
/// endpoint and chain metadata documents behind the IPFS gateway.
///
/// # Example
///
/// ```ignore
/// use cr8te_server_client::{Cr8teClient, ServerConfig};
///
/// let client = Cr8teClient::new(ServerConfig::new("https://cr8te.example.com"))?;
///
/// let feed = client.feed().await?;
/// println!("{} tracks in the feed", feed.len());
///
/// client.report_stream(&feed[0].id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Cr8teClient {
    http: Client,
    url: String,
    access_token: Option<String>,
}

impl Cr8teClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("CR8TEPlayer/{} (CLI)", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            url,
            access_token: config.access_token.filter(|t| !t.is_empty()),
        })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check if stream reports identify the listener.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Record one qualifying listen.
    ///
    /// The platform increments the track's stream count on every call, so
    /// callers must only invoke this once per counted listen.
    pub async fn report_stream(&self, track_id: &TrackId) -> Result<StreamResponse> {
        let url = format!("{}/api/music/stream", self.url);
        debug!(url = %url, track_id = %track_id, "Reporting stream");

        let body = StreamRequest {
            track_id: track_id.as_str(),
            auth_token: self.access_token.as_deref(),
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(classify_send_error)?;

        let result: StreamResponse = parse_json(response, "stream response").await?;
        info!(track_id = %track_id, "Stream recorded");

        Ok(result)
    }

    /// Fetch the public feed (newest tracks first).
    pub async fn feed(&self) -> Result<Vec<DatabaseTrack>> {
        let url = format!("{}/api/music/feed", self.url);
        debug!(url = %url, "Fetching feed");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(classify_send_error)?;

        let tracks: Vec<DatabaseTrack> = parse_json(response, "feed").await?;
        debug!(tracks = tracks.len(), "Fetched feed");

        Ok(tracks)
    }

    /// Fetch the metadata document of an NFT track.
    pub async fn fetch_chain_metadata(
        &self,
        track: &ChainTrack,
        gateway: &IpfsGateway,
    ) -> Result<ChainMetadata> {
        let url = gateway.resolve(Some(&track.uri));
        if url.is_empty() {
            return Err(ServerClientError::InvalidUrl(format!(
                "token {} has no metadata URI",
                track.token_id
            )));
        }

        debug!(url = %url, token_id = %track.token_id, "Fetching chain metadata");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(classify_send_error)?;

        parse_json(response, "chain metadata").await
    }

    /// Return `track` with its metadata loaded, fetching it if missing.
    pub async fn load_chain_track(
        &self,
        track: ChainTrack,
        gateway: &IpfsGateway,
    ) -> Result<ChainTrack> {
        if track.metadata.is_some() {
            return Ok(track);
        }

        let metadata = self.fetch_chain_metadata(&track, gateway).await?;
        Ok(track.with_metadata(metadata))
    }
}

fn classify_send_error(e: reqwest::Error) -> ServerClientError {
    if e.is_connect() || e.is_timeout() {
        ServerClientError::ServerUnreachable(e.to_string())
    } else {
        ServerClientError::Request(e)
    }
}

/// Decode a success body or turn the response into a `ServerError`.
async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse {}: {}", what, e))
        })
    } else {
        let error_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&error_text)
            .map(|body| body.error)
            .unwrap_or(error_text);
        Err(ServerClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(Cr8teClient::new(ServerConfig::new("https://example.com")).is_ok());
        assert!(Cr8teClient::new(ServerConfig::new("http://localhost:3000")).is_ok());

        // Invalid URLs
        assert!(Cr8teClient::new(ServerConfig::new("")).is_err());
        assert!(Cr8teClient::new(ServerConfig::new("not-a-url")).is_err());
        assert!(Cr8teClient::new(ServerConfig::new("ipfs://QmServer")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = Cr8teClient::new(ServerConfig::new("https://example.com/")).unwrap();
        assert_eq!(client.url(), "https://example.com");
    }

    #[test]
    fn test_empty_token_is_anonymous() {
        let client = Cr8teClient::new(ServerConfig::with_token("https://example.com", "")).unwrap();
        assert!(!client.is_authenticated());
    }
}
