//! Content-addressed locator resolution
//!
//! Tracks, artwork and NFT metadata are stored on IPFS and referenced as
//! `ipfs://<cid>`. Browsers and HTTP clients need a gateway URL instead.

use serde::{Deserialize, Serialize};

/// Gateway used by the platform when none is configured
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs/";

const IPFS_SCHEME: &str = "ipfs://";

/// Rewrites IPFS locators into gateway URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpfsGateway {
    base_url: String,
}

impl IpfsGateway {
    /// Create a gateway from a base URL
    ///
    /// A trailing slash is added if missing so CIDs can be appended directly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// Base URL, always ending in `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a locator to a fetchable URL
    ///
    /// - missing or empty locator: empty string
    /// - already an `http(s)` URL: returned unchanged
    /// - `ipfs://<cid>` or a bare CID: `<base_url><cid>`
    pub fn resolve(&self, locator: Option<&str>) -> String {
        let Some(locator) = locator.map(str::trim).filter(|l| !l.is_empty()) else {
            return String::new();
        };

        if locator.starts_with("http") {
            return locator.to_string();
        }

        let cid = locator.strip_prefix(IPFS_SCHEME).unwrap_or(locator);
        format!("{}{}", self.base_url, cid)
    }
}

impl Default for IpfsGateway {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_ipfs_scheme() {
        let gateway = IpfsGateway::default();
        assert_eq!(
            gateway.resolve(Some("ipfs://QmTrack")),
            "https://gateway.pinata.cloud/ipfs/QmTrack"
        );
    }

    #[test]
    fn bare_cid_gets_gateway_prefix() {
        let gateway = IpfsGateway::default();
        assert_eq!(
            gateway.resolve(Some("QmCover")),
            "https://gateway.pinata.cloud/ipfs/QmCover"
        );
    }

    #[test]
    fn http_urls_pass_through() {
        let gateway = IpfsGateway::default();
        let url = "https://cdn.example.com/song.mp3";
        assert_eq!(gateway.resolve(Some(url)), url);
        assert_eq!(
            gateway.resolve(Some("http://localhost/a.mp3")),
            "http://localhost/a.mp3"
        );
    }

    #[test]
    fn missing_locator_resolves_to_empty() {
        let gateway = IpfsGateway::default();
        assert_eq!(gateway.resolve(None), "");
        assert_eq!(gateway.resolve(Some("")), "");
        assert_eq!(gateway.resolve(Some("   ")), "");
    }

    #[test]
    fn custom_base_gets_trailing_slash() {
        let gateway = IpfsGateway::new("http://127.0.0.1:8080/ipfs");
        assert_eq!(gateway.base_url(), "http://127.0.0.1:8080/ipfs/");
        assert_eq!(
            gateway.resolve(Some("ipfs://QmX")),
            "http://127.0.0.1:8080/ipfs/QmX"
        );
    }
}
