//! CLI error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(#[from] cr8te_server_client::ServerClientError),

    #[error("Playback error: {0}")]
    Playback(#[from] cr8te_playback::PlaybackError),

    #[error("Nothing to play: {0}")]
    NothingToPlay(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
