//! CR8TE command-line player
//!
//! Lists the platform feed and plays it through a headless playback
//! session, reporting qualifying listens to the stream-count endpoint.

pub mod commands;
pub mod config;
pub mod error;
pub mod headless;
