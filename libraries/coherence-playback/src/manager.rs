//! Session manager - core orchestration
//!
//! Owns the audio engine, the play queue, and the persisted snapshot. Every
//! other component reads derived state or calls an operation here; nothing
//! else writes to the engine or the stored session.

use std::rc::Rc;

use coherence_core::{
    page_data::resolve_album_tracks, AlbumCatalog, AudioEngine, Clock, Navigator,
    SessionSnapshot, StateStore, Track,
};

use crate::{
    error::{PlaybackError, Result},
    panel::{queue_rows, NowPlaying, Progress},
    queue::Queue,
    restore::{self, RestoreDecision, ResumeMode, ResumePlan},
    resume::{resume_gate, ResumeResolver, ResumeSignal, ResumeTrigger},
    types::{PlaybackStatus, PlayerConfig},
    view::PlayerView,
};

/// Platform services the manager drives
pub struct SessionPlatform {
    pub engine: Box<dyn AudioEngine>,
    pub store: Box<dyn StateStore>,
    pub clock: Box<dyn Clock>,
    pub view: Box<dyn PlayerView>,
    pub catalog: Box<dyn AlbumCatalog>,

    /// Full-page navigation, used when no in-place navigator is attached
    pub location: Box<dyn Navigator>,
}

/// A restore waiting for the engine
///
/// The caller awaits `signal`, arms a fallback timer with `resolver`, then
/// hands `plan` and the trigger back to [`SessionManager::complete_resume`].
#[derive(Debug)]
pub struct PendingResume {
    pub plan: ResumePlan,
    pub resolver: ResumeResolver,
    pub signal: ResumeSignal,
}

/// Continuous playback session
pub struct SessionManager {
    config: PlayerConfig,

    // Platform
    engine: Box<dyn AudioEngine>,
    store: Box<dyn StateStore>,
    clock: Box<dyn Clock>,
    view: Box<dyn PlayerView>,
    catalog: Box<dyn AlbumCatalog>,
    location: Box<dyn Navigator>,
    navigator: Option<Rc<dyn Navigator>>,

    // State
    status: PlaybackStatus,
    current_track: Option<Track>,
    queue: Queue,
    shuffle: bool,
    repeat: bool,

    // Last position checkpoint bucket that was persisted
    last_checkpoint: Option<u64>,

    // Restore in flight
    pending_resume: Option<PendingResume>,
    restoring: Option<(ResumePlan, ResumeResolver)>,
}

impl SessionManager {
    /// Create the manager and restore the stored session
    ///
    /// The stored snapshot is read here and nowhere else.
    pub fn new(config: PlayerConfig, platform: SessionPlatform) -> Self {
        let mut manager = Self {
            config,
            engine: platform.engine,
            store: platform.store,
            clock: platform.clock,
            view: platform.view,
            catalog: platform.catalog,
            location: platform.location,
            navigator: None,
            status: PlaybackStatus::Idle,
            current_track: None,
            queue: Queue::new(),
            shuffle: false,
            repeat: false,
            last_checkpoint: None,
            pending_resume: None,
            restoring: None,
        };

        manager.load_state();
        manager
    }

    /// Attach the in-place navigator used for album fallbacks
    pub fn set_navigator(&mut self, navigator: Rc<dyn Navigator>) {
        self.navigator = Some(navigator);
    }

    // ===== Track & Album =====

    /// Load `track` into the engine and start playing
    ///
    /// A supplied album name overrides the track's own. The queue is not
    /// touched.
    pub fn play_track(&mut self, track: Track, album: Option<&str>) {
        self.start_track(track.merged_album(album));
    }

    /// Replace the queue with an album and play its first track
    ///
    /// Falls back to opening the album page when the current document holds
    /// no playable tracks for it.
    pub fn play_album(&mut self, album_id: &str) {
        let tracks = match self.catalog.album(album_id) {
            Some(page) => resolve_album_tracks(&page).unwrap_or_else(|e| {
                tracing::warn!("Failed to read tracks of album {}: {}", album_id, e);
                Vec::new()
            }),
            None => {
                tracing::warn!("Album {} not present in page", album_id);
                Vec::new()
            }
        };

        if tracks.is_empty() {
            let path = self.config.album_path(album_id);
            tracing::info!("No tracks for album {}, opening {}", album_id, path);
            self.navigate_to(&path);
            return;
        }

        tracing::info!("Playing album {} ({} tracks)", album_id, tracks.len());
        self.queue.replace(tracks);
        if let Some(first) = self.queue.current().cloned() {
            self.start_track(first);
        }
    }

    /// Open an album's detail page
    pub fn open_album(&self, album_id: &str) {
        self.navigate_to(&self.config.album_path(album_id));
    }

    // ===== Queue Management =====

    /// Append to the end of the queue
    pub fn add_to_queue(&mut self, track: Track, album: Option<&str>) {
        let track = track.merged_album(album);
        tracing::debug!("Queued {}", track.title);

        self.queue.push(track);
        self.refresh_queue();
        self.view.notify(&self.config.feedback_message);
        self.persist();
    }

    /// Remove a queue entry
    ///
    /// Removing the current entry plays its successor (or predecessor when
    /// it was last); removing the only entry clears playback.
    pub fn remove_from_queue(&mut self, index: usize) -> Result<Track> {
        let removal = self
            .queue
            .remove(index)
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;

        if removal.was_current {
            match self.queue.current().cloned() {
                Some(track) => self.start_track(track),
                None => self.clear_playback(),
            }
        }

        self.refresh_queue();
        self.persist();
        Ok(removal.track)
    }

    /// Move a queue entry, keeping the current entry in place logically
    pub fn move_queue_item(&mut self, from: usize, to: usize) -> Result<()> {
        if !self.queue.move_item(from, to) {
            return Err(PlaybackError::InvalidMove { from, to });
        }

        self.refresh_queue();
        self.persist();
        Ok(())
    }

    /// Jump to a queue entry and play it
    pub fn play_at(&mut self, index: usize) -> Result<()> {
        let track = self
            .queue
            .set_current(index)
            .cloned()
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;

        self.start_track(track);
        Ok(())
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// Returns `false` when there is nothing to play or the engine refused;
    /// a refusal leaves the session paused.
    pub fn play(&mut self) -> bool {
        if self.current_track.is_none() {
            tracing::debug!("Play ignored: no track loaded");
            return false;
        }

        let started = match self.engine.play() {
            Ok(()) => {
                self.status = PlaybackStatus::Playing;
                true
            }
            Err(e) => {
                tracing::warn!("Playback failed to start: {}", e);
                self.status = PlaybackStatus::Paused;
                false
            }
        };

        self.view.render_play_state(started);
        self.persist();
        started
    }

    /// Pause playback, keeping the position
    pub fn pause(&mut self) {
        self.engine.pause();
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }

        self.view.render_play_state(false);
        self.persist();
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance with wraparound and play
    pub fn next_track(&mut self) -> Result<()> {
        let track = self.queue.advance().cloned().ok_or(PlaybackError::QueueEmpty)?;
        self.start_track(track);
        Ok(())
    }

    /// Step back with wraparound and play
    pub fn previous_track(&mut self) -> Result<()> {
        let track = self.queue.retreat().cloned().ok_or(PlaybackError::QueueEmpty)?;
        self.start_track(track);
        Ok(())
    }

    /// Seek to a fraction (0.0 - 1.0) of the current track
    pub fn seek(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }

        match self.engine.duration() {
            Some(duration) if duration.is_finite() && duration > 0.0 => {
                self.engine.set_position(fraction.clamp(0.0, 1.0) * duration);
                self.render_progress();
            }
            _ => tracing::debug!("Seek ignored: duration unknown"),
        }
    }

    /// Flip the shuffle flag
    ///
    /// The flag is kept and persisted but does not reorder playback.
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.view.render_modes(self.shuffle, self.repeat);
        self.persist();
    }

    /// Flip the repeat flag
    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
        self.view.render_modes(self.shuffle, self.repeat);
        self.persist();
    }

    // ===== Engine Callbacks =====

    /// The current track reached its end
    pub fn on_track_ended(&mut self) {
        if self.repeat {
            self.engine.set_position(0.0);
            self.last_checkpoint = None;
            self.play();
        } else if self.queue.has_next() {
            if let Err(e) = self.next_track() {
                tracing::warn!("Failed to advance: {}", e);
            }
        } else {
            tracing::debug!("Queue exhausted");
            self.pause();
        }
    }

    /// Playback position moved
    ///
    /// Persists whenever a playing track crosses a checkpoint boundary.
    pub fn on_time_update(&mut self) {
        self.render_progress();

        if !self.is_playing() {
            return;
        }

        let position = self.engine.position();
        if !position.is_finite() || position < 0.0 {
            return;
        }

        let bucket = (position / f64::from(self.config.checkpoint_secs.max(1))).floor() as u64;
        if self.last_checkpoint != Some(bucket) {
            self.last_checkpoint = Some(bucket);
            self.persist();
        }
    }

    /// Engine can seek (metadata loaded or enough data buffered)
    pub fn on_engine_ready(&mut self) {
        self.render_progress();

        if let Some((_, resolver)) = &self.restoring {
            resolver.resolve(ResumeTrigger::Ready);
        }
    }

    /// The engine rejected a play request for `url` after the fact
    ///
    /// Ignored when the engine has moved on to another source; the browser
    /// aborts the pending request of a replaced source.
    pub fn on_play_rejected(&mut self, url: &str, reason: &str) {
        if self.engine.source().as_deref() != Some(url) {
            tracing::debug!("Ignoring rejection for replaced source {}: {}", url, reason);
            return;
        }
        tracing::warn!("Playback rejected: {}", reason);

        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
        self.view.render_play_state(false);
        self.persist();
    }

    /// Engine paused or started on its own account
    pub fn on_engine_state_change(&mut self) {
        self.persist();
    }

    /// Periodic save tick
    pub fn tick(&mut self) {
        if self.is_playing() {
            self.persist();
        }
    }

    /// Page is being hidden or unloaded
    pub fn on_page_hide(&mut self) {
        self.persist();
    }

    // ===== Persistence =====

    /// Write the session snapshot
    ///
    /// With no current track the stored snapshot is removed instead.
    pub fn save_state(&mut self) -> Result<()> {
        if self.current_track.is_none() {
            return self.clear_state();
        }

        // A restore still waiting for the engine keeps its planned position
        let (position, is_playing) = match self.pending_restore() {
            Some(plan) => (plan.position, plan.mode == ResumeMode::AutoPlay),
            None => (self.engine.position(), self.is_playing()),
        };
        let snapshot = SessionSnapshot {
            current_track: self.current_track.clone(),
            queue: self.queue.tracks().to_vec(),
            current_index: self.queue.current_index(),
            is_playing,
            is_shuffled: self.shuffle,
            is_repeating: self.repeat,
            current_time: if position.is_finite() && position > 0.0 { position } else { 0.0 },
            timestamp: self.clock.now_ms(),
        };

        let json = snapshot.to_json()?;
        self.store.set(&self.config.storage_key, &json)?;
        tracing::trace!("Saved session at {:.1}s", snapshot.current_time);
        Ok(())
    }

    /// Remove the stored snapshot
    pub fn clear_state(&mut self) -> Result<()> {
        self.store.remove(&self.config.storage_key)?;
        Ok(())
    }

    /// Restore waiting for the engine, if any
    ///
    /// Only the first call returns it.
    pub fn take_pending_resume(&mut self) -> Option<PendingResume> {
        self.pending_resume.take()
    }

    /// Finish a restore once the engine is ready or the fallback fired
    ///
    /// Skipped when another track was loaded in the meantime.
    pub fn complete_resume(&mut self, plan: &ResumePlan, trigger: ResumeTrigger) {
        self.restoring = None;

        if self.engine.source().as_deref() != Some(plan.url.as_str()) {
            tracing::debug!("Resume of {} superseded", plan.url);
            return;
        }

        tracing::debug!("Resuming {} at {:.1}s ({:?})", plan.url, plan.position, trigger);
        self.engine.set_position(plan.position);
        self.render_progress();

        match plan.mode {
            ResumeMode::AutoPlay => {
                tracing::info!("Resuming playback after navigation");
                self.play();
            }
            ResumeMode::Paused => {
                self.view.render_play_state(self.is_playing());
            }
        }
    }

    // ===== Rendering =====

    /// Re-render the queue lists
    pub fn refresh_queue(&mut self) {
        let rows = queue_rows(
            self.queue.tracks(),
            self.queue.current_index(),
            &self.config.unknown_album_label,
        );
        self.view.render_queue(&rows);
    }

    /// Re-render the now-playing details
    pub fn refresh_now_playing(&mut self) {
        if let Some(track) = &self.current_track {
            let now = NowPlaying::from_track(track, &self.config.default_album_label);
            self.view.render_now_playing(&now);
        }
    }

    pub fn view_mut(&mut self) -> &mut dyn PlayerView {
        self.view.as_mut()
    }

    // ===== State Queries =====

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    pub fn current_index(&self) -> usize {
        self.queue.current_index()
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    // ===== Internal =====

    fn start_track(&mut self, track: Track) {
        tracing::info!("Playing {} ({})", track.title, track.url);

        self.engine.set_source(&track.url);
        self.current_track = Some(track);
        self.status = PlaybackStatus::Loaded;
        self.last_checkpoint = None;

        self.refresh_now_playing();
        self.view.set_player_visible(true);
        self.refresh_queue();
        self.play();
    }

    fn clear_playback(&mut self) {
        tracing::info!("Queue emptied, clearing playback");

        self.engine.pause();
        self.current_track = None;
        self.status = PlaybackStatus::Idle;
        self.last_checkpoint = None;

        self.view.render_play_state(false);
        self.view.set_player_visible(false);
    }

    fn navigate_to(&self, path: &str) {
        match &self.navigator {
            Some(navigator) => navigator.navigate(path),
            None => self.location.navigate(path),
        }
    }

    fn pending_restore(&self) -> Option<&ResumePlan> {
        let (plan, _) = self.restoring.as_ref()?;
        (self.engine.source().as_deref() == Some(plan.url.as_str())).then_some(plan)
    }

    fn render_progress(&mut self) {
        let progress = Progress::new(self.engine.position(), self.engine.duration());
        self.view.render_progress(&progress);
    }

    fn persist(&mut self) {
        if let Err(e) = self.save_state() {
            tracing::warn!("Failed to save session: {}", e);
        }
    }

    fn read_snapshot(&self) -> Option<SessionSnapshot> {
        let raw = match self.store.get(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored session: {}", e);
                return None;
            }
        };

        SessionSnapshot::from_json(&raw)
            .map_err(|e| tracing::warn!("Ignoring malformed stored session: {}", e))
            .ok()
    }

    fn load_state(&mut self) {
        let now = self.clock.now_ms();

        let (snapshot, plan) = match restore::evaluate(self.read_snapshot(), now, &self.config) {
            RestoreDecision::Fresh => return,
            RestoreDecision::Stale { age_ms } => {
                tracing::info!("Stored session is {}s old, starting fresh", age_ms / 1000);
                return;
            }
            RestoreDecision::Restore { snapshot, plan } => (snapshot, plan),
        };

        tracing::info!(
            "Restoring session: {} queued, index {}",
            snapshot.queue.len(),
            snapshot.current_index
        );

        self.queue = Queue::restore(snapshot.queue, snapshot.current_index);
        self.shuffle = snapshot.is_shuffled;
        self.repeat = snapshot.is_repeating;
        self.view.render_modes(self.shuffle, self.repeat);

        let (Some(track), Some(plan)) = (snapshot.current_track, plan) else {
            self.refresh_queue();
            return;
        };

        self.engine.set_source(&track.url);
        self.current_track = Some(track);
        self.status = PlaybackStatus::Loaded;

        self.view.set_player_visible(true);
        self.refresh_now_playing();
        self.refresh_queue();
        self.view.render_play_state(false);

        if self.engine.is_ready() {
            self.complete_resume(&plan, ResumeTrigger::Ready);
            return;
        }

        self.engine.load();
        let (resolver, signal) = resume_gate();
        self.restoring = Some((plan.clone(), resolver.clone()));
        self.pending_resume = Some(PendingResume {
            plan,
            resolver,
            signal,
        });
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("status", &self.status)
            .field("current_track", &self.current_track)
            .field("queue_len", &self.queue.len())
            .field("current_index", &self.queue.current_index())
            .field("shuffle", &self.shuffle)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}
