//! CLI configuration

use crate::error::{CliError, Result};
use cr8te_core::{IpfsGateway, DEFAULT_GATEWAY_URL};
use cr8te_playback::{types::DEFAULT_QUALIFYING_LISTEN_SECS, PlaybackConfig};
use cr8te_server_client::ServerConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default configuration file, read from the working directory if present
pub const DEFAULT_CONFIG_FILE: &str = "cr8te.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_gateway")]
    pub gateway: GatewaySettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Listener token sent with stream reports
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewaySettings {
    #[serde(default = "default_gateway_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_qualifying_listen_secs")]
    pub qualifying_listen_secs: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Media seconds per clock tick
    #[serde(default = "default_tick_secs")]
    pub tick_secs: f64,

    /// Length assumed for tracks without a known duration
    #[serde(default = "default_track_secs")]
    pub default_track_secs: f64,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// A missing file is not an error; every setting has a default.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment instead of the process one
    pub fn load_with_env(path: &Path, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        // Override with environment variables (CR8TE_SERVER__URL, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("CR8TE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.server.url.starts_with("http://") && !self.server.url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "server.url must be an http(s) URL (set CR8TE_SERVER__URL), got {:?}",
                self.server.url
            )));
        }

        if self.gateway.base_url.is_empty() {
            return Err(CliError::Config("gateway.base_url cannot be empty".to_string()));
        }

        let positive = [
            ("playback.qualifying_listen_secs", self.playback.qualifying_listen_secs),
            ("simulation.tick_secs", self.simulation.tick_secs),
            ("simulation.default_track_secs", self.simulation.default_track_secs),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CliError::Config(format!(
                    "{} must be a positive number, got {}",
                    key, value
                )));
            }
        }

        Ok(())
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            url: self.server.url.clone(),
            access_token: self.server.access_token.clone(),
        }
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            qualifying_listen_secs: self.playback.qualifying_listen_secs,
            gateway: self.gateway(),
        }
    }

    pub fn gateway(&self) -> IpfsGateway {
        IpfsGateway::new(self.gateway.base_url.clone())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            gateway: default_gateway(),
            playback: default_playback(),
            simulation: default_simulation(),
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        url: default_server_url(),
        access_token: None,
    }
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_gateway() -> GatewaySettings {
    GatewaySettings {
        base_url: default_gateway_url(),
    }
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        qualifying_listen_secs: default_qualifying_listen_secs(),
    }
}

fn default_qualifying_listen_secs() -> f64 {
    DEFAULT_QUALIFYING_LISTEN_SECS
}

fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        tick_secs: default_tick_secs(),
        default_track_secs: default_track_secs(),
    }
}

fn default_tick_secs() -> f64 {
    1.0
}

fn default_track_secs() -> f64 {
    180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            CliConfig::load_with_env(&dir.path().join("missing.toml"), env(&[])).unwrap();

        assert_eq!(config.server.url, "http://localhost:3000");
        assert!(config.server.access_token.is_none());
        assert_eq!(config.gateway.base_url, DEFAULT_GATEWAY_URL);
        assert_eq!(config.playback.qualifying_listen_secs, 30.0);
        assert_eq!(config.simulation.tick_secs, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
url = "https://cr8te.example.com"
access_token = "listener"

[simulation]
tick_secs = 5.0
"#
        )
        .unwrap();

        let config = CliConfig::load_with_env(file.path(), env(&[])).unwrap();

        assert_eq!(config.server.url, "https://cr8te.example.com");
        assert_eq!(config.server.access_token.as_deref(), Some("listener"));
        assert_eq!(config.simulation.tick_secs, 5.0);
        // Sections missing from the file keep their defaults
        assert_eq!(config.simulation.default_track_secs, 180.0);
        assert_eq!(config.gateway.base_url, DEFAULT_GATEWAY_URL);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nurl = \"https://from-file.example.com\"").unwrap();

        let config = CliConfig::load_with_env(
            file.path(),
            env(&[
                ("CR8TE_SERVER__URL", "https://from-env.example.com"),
                ("CR8TE_SERVER__ACCESS_TOKEN", "tok"),
                ("CR8TE_PLAYBACK__QUALIFYING_LISTEN_SECS", "45"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.url, "https://from-env.example.com");
        assert_eq!(config.server.access_token.as_deref(), Some("tok"));
        assert_eq!(config.playback.qualifying_listen_secs, 45.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CliConfig::default();
        config.server.url = "cr8te.example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.simulation.tick_secs = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("simulation.tick_secs"));

        let mut config = CliConfig::default();
        config.playback.qualifying_listen_secs = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_playback_config_uses_gateway() {
        let mut config = CliConfig::default();
        config.gateway.base_url = "https://ipfs.example.org/ipfs".to_string();

        let playback = config.playback_config();
        assert_eq!(
            playback.gateway.resolve(Some("ipfs://QmX")),
            "https://ipfs.example.org/ipfs/QmX"
        );
    }
}
