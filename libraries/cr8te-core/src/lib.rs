//! CR8TE Player Core
//!
//! Platform-agnostic track types and locator handling shared by the
//! playback, server-client and application crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Identifiers**: `TrackId`
//! - **Track Shapes**: `DatabaseTrack` (platform feed) and `ChainTrack`
//!   (NFT contract + IPFS metadata), unified as `TrackRecord`
//! - **Locator Resolution**: `IpfsGateway` rewrites `ipfs://` locators into
//!   fetchable gateway URLs
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use cr8te_core::IpfsGateway;
//!
//! let gateway = IpfsGateway::default();
//! assert_eq!(
//!     gateway.resolve(Some("ipfs://QmAudio")),
//!     "https://gateway.pinata.cloud/ipfs/QmAudio"
//! );
//! ```

pub mod error;
pub mod gateway;
pub mod types;

pub use error::{CoreError, Result};
pub use gateway::{IpfsGateway, DEFAULT_GATEWAY_URL};
pub use types::{
    ArtistRef, ChainAttribute, ChainMetadata, ChainTrack, CollectionRef, DatabaseTrack, TrackId,
    TrackRecord,
};
