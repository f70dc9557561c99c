//! Play count reporting seam
//!
//! The session decides *when* a listen counts; a `PlayReporter` delivers it
//! to whatever records plays (the platform API, a test double, ...).

use cr8te_core::TrackId;
use serde::{Deserialize, Serialize};

/// One qualifying listen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayReport {
    /// Track the listen belongs to, captured when the threshold was crossed
    pub track_id: TrackId,
}

/// Fire-and-forget sink for qualifying listens
///
/// `report` is called from the session's caller thread and must return
/// immediately. Delivery failures are the implementor's concern and must
/// never reach the session.
#[cfg_attr(test, mockall::automock)]
pub trait PlayReporter: Send + Sync {
    /// Hand off one play for recording
    fn report(&self, report: PlayReport);
}

/// Reporter that drops every play
///
/// Used when no backend is configured (offline sessions, previews).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl PlayReporter for NoopReporter {
    fn report(&self, report: PlayReport) {
        tracing::trace!(track_id = %report.track_id, "Play not reported (no backend)");
    }
}
