//! Fire-and-forget stream reporting on a tokio runtime.

use crate::client::Cr8teClient;
use cr8te_playback::{PlayReport, PlayReporter};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// `PlayReporter` that posts each counted listen to the platform
///
/// Every report runs as its own task on the given runtime, so the playback
/// session never waits on the network. The track id travels with the task,
/// which keeps the report correct after the session has moved on. Failures
/// are logged and dropped; there is no retry.
#[derive(Debug, Clone)]
pub struct StreamReporter {
    client: Arc<Cr8teClient>,
    runtime: Handle,
    in_flight: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl StreamReporter {
    /// Report through `client` on `runtime`
    pub fn new(client: Arc<Cr8teClient>, runtime: Handle) -> Self {
        Self {
            client,
            runtime,
            in_flight: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Report on the runtime the caller is running in
    ///
    /// Returns `None` outside of a tokio runtime.
    pub fn on_current_runtime(client: Arc<Cr8teClient>) -> Option<Self> {
        Handle::try_current()
            .ok()
            .map(|runtime| Self::new(client, runtime))
    }

    /// Number of reports that have not completed yet
    pub fn pending(&self) -> usize {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.retain(|handle| !handle.is_finished());
        in_flight.len()
    }

    /// Wait for every report spawned so far
    ///
    /// Call before shutting the runtime down, otherwise in-flight reports
    /// are dropped with it.
    pub async fn flush(&self) {
        let handles = std::mem::take(
            &mut *self.in_flight.lock().unwrap_or_else(PoisonError::into_inner),
        );

        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Stream report task aborted");
            }
        }
    }
}

impl PlayReporter for StreamReporter {
    fn report(&self, report: PlayReport) {
        let client = Arc::clone(&self.client);
        let track_id = report.track_id;

        let handle = self.runtime.spawn(async move {
            match client.report_stream(&track_id).await {
                Ok(_) => debug!(track_id = %track_id, "Stream report delivered"),
                Err(e) => warn!(track_id = %track_id, error = %e, "Stream report failed"),
            }
        });

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle);
    }
}
