//! Stream count trigger
//!
//! Decides when a listen qualifies for the play counter. A listen qualifies
//! the first time the media clock of the current entry passes the
//! threshold; after that the entry stays counted until another entry is
//! loaded.

use cr8te_core::TrackId;

/// Once-per-entry threshold detector
#[derive(Debug, Clone)]
pub struct StreamCountTrigger {
    /// Media seconds that must be exceeded
    threshold_secs: f64,
    /// Entry currently being watched
    track_id: Option<TrackId>,
    /// Whether the current entry has already been counted
    counted: bool,
}

impl StreamCountTrigger {
    /// Create a trigger with the given threshold in seconds
    pub fn new(threshold_secs: f64) -> Self {
        Self {
            threshold_secs,
            track_id: None,
            counted: false,
        }
    }

    /// Start watching a freshly loaded entry
    ///
    /// Always clears the counted flag. Callers must not call this when an
    /// already-loaded entry is merely resumed.
    pub fn begin(&mut self, track_id: &TrackId) {
        self.track_id = Some(track_id.clone());
        self.counted = false;
    }

    /// Stop watching any entry
    pub fn clear(&mut self) {
        self.track_id = None;
        self.counted = false;
    }

    /// Feed a media clock sample for the current entry
    ///
    /// Returns the identifier to report the first time `elapsed_secs`
    /// exceeds the threshold. The identifier is the one watched at this
    /// moment, so a report in flight can never be attributed to a later
    /// entry.
    pub fn observe(&mut self, elapsed_secs: f64) -> Option<TrackId> {
        // NaN samples never qualify
        let qualifies = elapsed_secs > self.threshold_secs;
        if self.counted || !qualifies {
            return None;
        }

        let track_id = self.track_id.clone()?;
        self.counted = true;
        Some(track_id)
    }

    /// Check if the current entry has been counted
    pub fn is_counted(&self) -> bool {
        self.counted
    }

    /// Entry currently being watched
    pub fn track_id(&self) -> Option<&TrackId> {
        self.track_id.as_ref()
    }

    /// Threshold in seconds
    pub fn threshold_secs(&self) -> f64 {
        self.threshold_secs
    }
}
