//! Playback session - transport control
//!
//! Coordinates the queue, the play/pause flag and the stream count trigger,
//! and tells the media boundary what to do through `MediaCommand`s.

use crate::{
    error::Result,
    events::{MediaCommand, PlaybackEvent},
    play_count::StreamCountTrigger,
    queue::{Advance, PlaybackQueue},
    reporter::{NoopReporter, PlayReport, PlayReporter},
    types::{PlaybackConfig, PlaybackState, QueueEntry},
};
use cr8te_core::{IpfsGateway, TrackId, TrackRecord};
use std::sync::Arc;
use tracing::{debug, info};

/// Single source of truth for what is playing
///
/// One session belongs to one listener context (a window, a CLI run). It is
/// created by its owner, handed to whoever needs it and dropped with it;
/// there is no global instance.
///
/// Every mutating call is synchronous. Side effects are queued and picked
/// up by the owner:
/// - [`drain_commands`](Self::drain_commands) for the media boundary
/// - [`drain_events`](Self::drain_events) for the UI
///
/// Play counting is forwarded to the injected [`PlayReporter`] as soon as a
/// listen qualifies.
pub struct PlaybackSession {
    // State
    queue: PlaybackQueue,
    playing: bool,

    // Media clock as last reported by the boundary
    elapsed_secs: f64,
    total_secs: Option<f64>,

    // Play counting
    trigger: StreamCountTrigger,
    reporter: Arc<dyn PlayReporter>,

    // Locator resolution for incoming records
    gateway: IpfsGateway,

    // Outbound queues
    pending_commands: Vec<MediaCommand>,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackSession {
    /// Create new session reporting plays to `reporter`
    pub fn new(config: PlaybackConfig, reporter: Arc<dyn PlayReporter>) -> Self {
        Self {
            queue: PlaybackQueue::new(),
            playing: false,
            elapsed_secs: 0.0,
            total_secs: None,
            trigger: StreamCountTrigger::new(config.qualifying_listen_secs),
            reporter,
            gateway: config.gateway,
            pending_commands: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    // ===== Transport =====

    /// Play one track
    ///
    /// If it is already the current entry, playback resumes where it is and
    /// the queue is left alone. Otherwise the queue becomes `[entry]`.
    pub fn play_single(&mut self, entry: QueueEntry) {
        if self.current_id() == Some(&entry.id) {
            debug!(track_id = %entry.id, "Resuming current track");
            self.resume();
            return;
        }

        let previous = self.current_id().cloned();
        self.queue.replace_with_single(entry);
        self.emit_queue_changed();
        self.load_current(true, previous);
    }

    /// Play a collection starting at `start_index`
    ///
    /// Rejects empty collections, out-of-range start indexes and duplicate
    /// identifiers without touching the current state.
    pub fn play_collection(&mut self, entries: Vec<QueueEntry>, start_index: usize) -> Result<()> {
        let previous = self.current_id().cloned();
        self.queue.replace_with_collection(entries, start_index)?;
        self.emit_queue_changed();
        self.load_current(true, previous);
        Ok(())
    }

    /// Normalize a track record and play it on its own
    pub fn play_record(&mut self, record: &TrackRecord) -> Result<()> {
        let entry = QueueEntry::from_record(record, &self.gateway)?;
        self.play_single(entry);
        Ok(())
    }

    /// Normalize track records and play them as a collection
    ///
    /// Fails on the first record that cannot be played; nothing is queued.
    pub fn play_records(&mut self, records: &[TrackRecord], start_index: usize) -> Result<()> {
        let entries = records
            .iter()
            .map(|record| QueueEntry::from_record(record, &self.gateway))
            .collect::<cr8te_core::Result<Vec<_>>>()?;
        self.play_collection(entries, start_index)
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.playing {
            self.pending_commands.push(MediaCommand::Pause);
            self.set_playing(false);
        }
    }

    /// Flip between playing and paused
    ///
    /// Does nothing when the queue is empty.
    pub fn toggle_play(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        if self.playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Skip to next track
    ///
    /// On the last entry playback stops and the cursor returns to the first
    /// entry, so the next play starts the queue over.
    pub fn next(&mut self) {
        let previous = self.current_id().cloned();

        match self.queue.advance() {
            Advance::Empty => {}
            Advance::Moved => self.load_current(true, previous),
            Advance::Wrapped => {
                debug!("Reached end of queue");
                self.load_current(false, previous);
            }
        }
    }

    /// Go to previous track
    ///
    /// Does nothing on the first entry or an empty queue.
    pub fn previous(&mut self) {
        let previous = self.current_id().cloned();

        if self.queue.retreat() {
            self.load_current(true, previous);
        }
    }

    // ===== Media boundary callbacks =====

    /// Periodic clock update from the media boundary
    ///
    /// `elapsed_secs` is media time of the current entry, so pausing does
    /// not reset it and seeking moves it.
    pub fn on_time_update(&mut self, elapsed_secs: f64, total_secs: Option<f64>) {
        if self.queue.is_empty() {
            return;
        }

        self.elapsed_secs = elapsed_secs;
        if let Some(total) = total_secs.filter(|t| t.is_finite() && *t > 0.0) {
            self.total_secs = Some(total);
        }

        if let Some(track_id) = self.trigger.observe(elapsed_secs) {
            info!(track_id = %track_id, elapsed_secs, "Qualifying listen");
            self.reporter.report(PlayReport {
                track_id: track_id.clone(),
            });
            self.pending_events
                .push(PlaybackEvent::PlayCounted { track_id });
        }
    }

    /// Current media finished playing
    pub fn on_ended(&mut self) {
        debug!(track_id = ?self.current_id(), "Track ended");
        self.next();
    }

    // ===== State Queries =====

    /// Get current playback state
    pub fn state(&self) -> PlaybackState {
        if self.playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    /// Check if playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Get currently selected entry
    pub fn current_entry(&self) -> Option<&QueueEntry> {
        self.queue.current()
    }

    /// Cursor position in the queue
    pub fn cursor(&self) -> Option<usize> {
        self.queue.cursor()
    }

    /// All queued entries in play order
    pub fn entries(&self) -> &[QueueEntry] {
        self.queue.entries()
    }

    /// Get queue length
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Check if there is a next track
    pub fn has_next(&self) -> bool {
        self.queue.has_next()
    }

    /// Check if there is a previous track
    pub fn has_previous(&self) -> bool {
        self.queue.has_previous()
    }

    /// Media seconds elapsed in the current entry
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Duration of the current entry, from the media boundary or metadata
    pub fn total_secs(&self) -> Option<f64> {
        self.total_secs
    }

    /// Playback progress from 0.0 to 1.0, for a seek bar
    pub fn progress(&self) -> f64 {
        match self.total_secs {
            Some(total) if total > 0.0 => (self.elapsed_secs / total).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Check if the current entry's listen has been counted
    pub fn is_counted(&self) -> bool {
        self.trigger.is_counted()
    }

    // ===== Outbound =====

    /// Take queued media commands (oldest first)
    pub fn drain_commands(&mut self) -> Vec<MediaCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    /// Take queued UI events (oldest first)
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if media commands are waiting
    pub fn has_pending_commands(&self) -> bool {
        !self.pending_commands.is_empty()
    }

    // ===== Internal =====

    fn current_id(&self) -> Option<&TrackId> {
        self.queue.current().map(|e| &e.id)
    }

    /// Resume the loaded entry without reloading it
    fn resume(&mut self) {
        if !self.playing && !self.queue.is_empty() {
            self.pending_commands.push(MediaCommand::Resume);
            self.set_playing(true);
        }
    }

    /// Hand the entry under the cursor to the media boundary
    ///
    /// Restarts the media clock and the stream count trigger, since the
    /// boundary starts the entry from zero.
    fn load_current(&mut self, autoplay: bool, previous: Option<TrackId>) {
        let Some(entry) = self.queue.current() else {
            return;
        };
        let track_id = entry.id.clone();
        let audio_url = entry.audio_url.clone();
        let duration = entry.duration_secs;

        self.trigger.begin(&track_id);
        self.elapsed_secs = 0.0;
        self.total_secs = duration;

        debug!(
            track_id = %track_id,
            cursor = ?self.queue.cursor(),
            autoplay,
            "Loading entry"
        );

        if previous.as_ref() != Some(&track_id) {
            self.pending_events.push(PlaybackEvent::TrackChanged {
                track_id: track_id.clone(),
                previous_track_id: previous,
            });
        }

        if autoplay {
            self.pending_commands.push(MediaCommand::Play {
                track_id,
                audio_url,
            });
            self.set_playing(true);
        } else {
            if self.playing {
                self.pending_commands.push(MediaCommand::Pause);
            }
            self.pending_commands.push(MediaCommand::Cue {
                track_id,
                audio_url,
            });
            self.set_playing(false);
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            self.playing = playing;
            self.pending_events.push(PlaybackEvent::StateChanged {
                state: self.state(),
            });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new(PlaybackConfig::default(), Arc::new(NoopReporter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::MockPlayReporter;
    use mockall::predicate::eq;

    fn create_entry(id: &str) -> QueueEntry {
        QueueEntry {
            id: TrackId::new(id),
            title: format!("Track {}", id),
            attribution: "Test Artist".to_string(),
            audio_url: format!("https://gateway.example/ipfs/{}", id),
            artwork_url: String::new(),
            duration_secs: Some(180.0),
        }
    }

    fn session_with(reporter: MockPlayReporter) -> PlaybackSession {
        PlaybackSession::new(PlaybackConfig::default(), Arc::new(reporter))
    }

    #[test]
    fn new_session_is_idle() {
        let session = PlaybackSession::default();
        assert!(session.is_empty());
        assert_eq!(session.state(), PlaybackState::Paused);
        assert!(session.current_entry().is_none());
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn play_single_emits_play_command() {
        let mut session = PlaybackSession::default();
        session.play_single(create_entry("a"));

        assert_eq!(
            session.drain_commands(),
            vec![MediaCommand::Play {
                track_id: TrackId::new("a"),
                audio_url: "https://gateway.example/ipfs/a".to_string(),
            }]
        );
        assert!(!session.has_pending_commands());
    }

    #[test]
    fn reselecting_paused_track_resumes() {
        let mut session = PlaybackSession::default();
        session.play_single(create_entry("a"));
        session.pause();
        session.drain_commands();

        session.play_single(create_entry("a"));
        assert!(session.is_playing());
        assert_eq!(session.drain_commands(), vec![MediaCommand::Resume]);
    }

    #[test]
    fn reselecting_playing_track_is_silent() {
        let mut session = PlaybackSession::default();
        session.play_single(create_entry("a"));
        session.drain_commands();
        session.drain_events();

        session.play_single(create_entry("a"));
        assert!(session.drain_commands().is_empty());
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn track_changed_event_carries_previous_id() {
        let mut session = PlaybackSession::default();
        session.play_single(create_entry("a"));
        session.drain_events();

        session.play_single(create_entry("b"));
        let events = session.drain_events();
        assert!(events.contains(&PlaybackEvent::TrackChanged {
            track_id: TrackId::new("b"),
            previous_track_id: Some(TrackId::new("a")),
        }));
        assert!(events.contains(&PlaybackEvent::QueueChanged { length: 1 }));
    }

    #[test]
    fn qualifying_listen_reports_once() {
        let mut reporter = MockPlayReporter::new();
        reporter
            .expect_report()
            .with(eq(PlayReport {
                track_id: TrackId::new("a"),
            }))
            .times(1)
            .return_const(());

        let mut session = session_with(reporter);
        session.play_single(create_entry("a"));

        for t in [0.0, 29.0, 31.0, 20.0, 35.0] {
            session.on_time_update(t, Some(180.0));
        }

        assert!(session.is_counted());
        let counted: Vec<_> = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, PlaybackEvent::PlayCounted { .. }))
            .collect();
        assert_eq!(counted.len(), 1);
    }

    #[test]
    fn pause_and_resume_do_not_reset_count() {
        let mut reporter = MockPlayReporter::new();
        reporter.expect_report().times(1).return_const(());

        let mut session = session_with(reporter);
        session.play_single(create_entry("a"));
        session.on_time_update(20.0, None);
        session.pause();
        session.toggle_play();
        session.on_time_update(31.0, None);

        // Re-selecting the current entry keeps the count
        session.play_single(create_entry("a"));
        session.on_time_update(45.0, None);
    }

    #[test]
    fn new_entry_is_counted_again() {
        let mut reporter = MockPlayReporter::new();
        reporter.expect_report().times(2).return_const(());

        let mut session = session_with(reporter);
        session
            .play_collection(vec![create_entry("a"), create_entry("b")], 0)
            .unwrap();
        session.on_time_update(31.0, None);
        session.next();
        assert!(!session.is_counted());
        session.on_time_update(31.0, None);
    }

    #[test]
    fn time_updates_without_queue_are_ignored() {
        let mut reporter = MockPlayReporter::new();
        reporter.expect_report().never();

        let mut session = session_with(reporter);
        session.on_time_update(120.0, Some(180.0));
        assert_eq!(session.elapsed_secs(), 0.0);
    }

    #[test]
    fn progress_uses_reported_duration() {
        let mut session = PlaybackSession::default();
        let mut entry = create_entry("a");
        entry.duration_secs = None;
        session.play_single(entry);
        assert_eq!(session.total_secs(), None);

        session.on_time_update(50.0, Some(200.0));
        assert_eq!(session.total_secs(), Some(200.0));
        assert_eq!(session.progress(), 0.25);

        // Unknown totals (NaN before metadata loads) keep the last good value
        session.on_time_update(60.0, Some(f64::NAN));
        assert_eq!(session.total_secs(), Some(200.0));
    }

    #[test]
    fn end_of_queue_pauses_then_cues_first_entry() {
        let mut session = PlaybackSession::default();
        session
            .play_collection(vec![create_entry("a"), create_entry("b")], 1)
            .unwrap();
        session.drain_commands();

        session.on_ended();
        assert_eq!(session.cursor(), Some(0));
        assert!(!session.is_playing());
        assert_eq!(
            session.drain_commands(),
            vec![
                MediaCommand::Pause,
                MediaCommand::Cue {
                    track_id: TrackId::new("a"),
                    audio_url: "https://gateway.example/ipfs/a".to_string(),
                },
            ]
        );
    }

    #[test]
    fn rejected_collection_keeps_state() {
        let mut session = PlaybackSession::default();
        session.play_single(create_entry("a"));
        session.drain_commands();
        session.drain_events();

        assert!(session.play_collection(vec![], 0).is_err());
        assert!(session
            .play_collection(vec![create_entry("b")], 3)
            .is_err());

        assert_eq!(session.current_entry().unwrap().id.as_str(), "a");
        assert!(session.is_playing());
        assert!(session.drain_commands().is_empty());
        assert!(session.drain_events().is_empty());
    }
}
