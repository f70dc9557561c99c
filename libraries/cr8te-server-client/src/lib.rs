//! CR8TE Player Server Client
//!
//! HTTP client library for the CR8TE platform music API.
//!
//! # Features
//!
//! - **Feed**: Fetch the newest tracks published on the platform
//! - **Stream counts**: Report qualifying listens (`POST /api/music/stream`)
//! - **Chain metadata**: Load NFT metadata documents through an IPFS gateway
//! - **Reporter**: [`StreamReporter`] plugs the client into a playback session
//!
//! # Example
//!
//! ```ignore
//! use cr8te_playback::{PlaybackConfig, PlaybackSession};
//! use cr8te_server_client::{Cr8teClient, ServerConfig, StreamReporter};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(Cr8teClient::new(ServerConfig::new("https://cr8te.example.com"))?);
//!
//!     let feed = client.feed().await?;
//!     let records: Vec<_> = feed.into_iter().map(Into::into).collect();
//!
//!     let reporter = StreamReporter::on_current_runtime(client).expect("inside tokio");
//!     let mut session = PlaybackSession::new(PlaybackConfig::default(), Arc::new(reporter));
//!     session.play_records(&records, 0)?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod reporter;
mod types;

// Re-export main types
pub use client::Cr8teClient;
pub use error::{Result, ServerClientError};
pub use reporter::StreamReporter;
pub use types::{ServerConfig, StreamRequest, StreamResponse};
