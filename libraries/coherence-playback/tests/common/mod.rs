//! In-memory platform for driving the session manager in tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Once;

use coherence_core::{
    AlbumCatalog, AlbumPage, AudioEngine, Clock, CoreError, Navigator, StateStore, Track,
};
use coherence_playback::panel::{NowPlaying, PanelState, Progress, QueueRow};
use coherence_playback::{PlayerConfig, PlayerView, SessionManager, SessionPlatform};

pub const START_MS: i64 = 1_700_000_000_000;

static INIT: Once = Once::new();

/// Route tracing output through the test harness
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

pub fn track(name: &str) -> Track {
    Track::new(format!("/audio/{name}.mp3"), name)
}

pub fn tracks(names: &[&str]) -> Vec<Track> {
    names.iter().map(|n| track(n)).collect()
}

// ===== Engine =====

#[derive(Debug, Default)]
pub struct EngineState {
    pub source: Option<String>,
    pub position: f64,
    pub duration: Option<f64>,
    pub ready: bool,
    pub playing: bool,
    pub reject_play: bool,
    pub play_calls: usize,
    pub load_calls: usize,
}

#[derive(Clone, Default)]
pub struct FakeEngine(pub Rc<RefCell<EngineState>>);

impl AudioEngine for FakeEngine {
    fn set_source(&mut self, url: &str) {
        let mut state = self.0.borrow_mut();
        state.source = Some(url.to_string());
        state.position = 0.0;
        state.playing = false;
    }

    fn source(&self) -> Option<String> {
        self.0.borrow().source.clone()
    }

    fn load(&mut self) {
        self.0.borrow_mut().load_calls += 1;
    }

    fn play(&mut self) -> coherence_core::Result<()> {
        let mut state = self.0.borrow_mut();
        state.play_calls += 1;
        if state.reject_play {
            return Err(CoreError::engine("autoplay blocked"));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().playing = false;
    }

    fn position(&self) -> f64 {
        self.0.borrow().position
    }

    fn set_position(&mut self, seconds: f64) {
        self.0.borrow_mut().position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.0.borrow().duration
    }

    fn is_ready(&self) -> bool {
        self.0.borrow().ready
    }
}

// ===== Storage & Clock =====

#[derive(Clone, Default)]
pub struct MemoryStore(pub Rc<RefCell<HashMap<String, String>>>);

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> coherence_core::Result<Option<String>> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> coherence_core::Result<()> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> coherence_core::Result<()> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakeClock(pub Rc<Cell<i64>>);

impl FakeClock {
    pub fn advance(&self, ms: i64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> i64 {
        self.0.get()
    }
}

// ===== View =====

#[derive(Debug, Default)]
pub struct ViewLog {
    pub visible: Option<bool>,
    pub now_playing: Option<NowPlaying>,
    pub playing: bool,
    pub progress: Option<Progress>,
    pub modes: (bool, bool),
    pub queue: Vec<QueueRow>,
    pub panels: Option<PanelState>,
    pub notifications: Vec<String>,
}

#[derive(Clone, Default)]
pub struct RecordingView(pub Rc<RefCell<ViewLog>>);

impl PlayerView for RecordingView {
    fn set_player_visible(&mut self, visible: bool) {
        self.0.borrow_mut().visible = Some(visible);
    }

    fn render_now_playing(&mut self, now: &NowPlaying) {
        self.0.borrow_mut().now_playing = Some(now.clone());
    }

    fn render_play_state(&mut self, playing: bool) {
        self.0.borrow_mut().playing = playing;
    }

    fn render_progress(&mut self, progress: &Progress) {
        self.0.borrow_mut().progress = Some(progress.clone());
    }

    fn render_modes(&mut self, shuffle: bool, repeat: bool) {
        self.0.borrow_mut().modes = (shuffle, repeat);
    }

    fn render_queue(&mut self, rows: &[QueueRow]) {
        self.0.borrow_mut().queue = rows.to_vec();
    }

    fn render_panels(&mut self, panels: &PanelState) {
        self.0.borrow_mut().panels = Some(*panels);
    }

    fn notify(&mut self, message: &str) {
        self.0.borrow_mut().notifications.push(message.to_string());
    }
}

// ===== Catalog & Navigation =====

#[derive(Clone, Default)]
pub struct FakeCatalog(pub Rc<RefCell<HashMap<String, AlbumPage>>>);

impl AlbumCatalog for FakeCatalog {
    fn album(&self, album_id: &str) -> Option<AlbumPage> {
        self.0.borrow().get(album_id).cloned()
    }
}

#[derive(Clone, Default)]
pub struct RecordingNavigator(pub Rc<RefCell<Vec<String>>>);

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.0.borrow_mut().push(path.to_string());
    }
}

// ===== Harness =====

/// Shared handles to every fake; `build` may be called repeatedly to
/// simulate a reload against the same storage
pub struct Harness {
    pub config: PlayerConfig,
    pub engine: FakeEngine,
    pub store: MemoryStore,
    pub clock: FakeClock,
    pub view: RecordingView,
    pub catalog: FakeCatalog,
    pub location: RecordingNavigator,
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();

        let engine = FakeEngine::default();
        {
            let mut state = engine.0.borrow_mut();
            state.ready = true;
            state.duration = Some(200.0);
        }

        Self {
            config: PlayerConfig::default(),
            engine,
            store: MemoryStore::default(),
            clock: FakeClock(Rc::new(Cell::new(START_MS))),
            view: RecordingView::default(),
            catalog: FakeCatalog::default(),
            location: RecordingNavigator::default(),
        }
    }

    pub fn build(&self) -> SessionManager {
        SessionManager::new(
            self.config.clone(),
            SessionPlatform {
                engine: Box::new(self.engine.clone()),
                store: Box::new(self.store.clone()),
                clock: Box::new(self.clock.clone()),
                view: Box::new(self.view.clone()),
                catalog: Box::new(self.catalog.clone()),
                location: Box::new(self.location.clone()),
            },
        )
    }

    /// Simulate a fresh page: new engine element, same storage and clock
    pub fn reload(&mut self) -> SessionManager {
        let ready = self.engine.0.borrow().ready;
        self.engine = FakeEngine::default();
        {
            let mut state = self.engine.0.borrow_mut();
            state.ready = ready;
            state.duration = Some(200.0);
        }
        self.view = RecordingView::default();
        self.build()
    }

    /// Manager with `names` queued and the first one playing
    pub fn with_queue(&self, names: &[&str]) -> SessionManager {
        let mut manager = self.build();
        for t in tracks(names) {
            manager.add_to_queue(t, None);
        }
        manager.play_at(0).unwrap();
        manager
    }

    pub fn stored(&self) -> Option<String> {
        self.store.0.borrow().get(&self.config.storage_key).cloned()
    }

    pub fn store_raw(&self, json: &str) {
        self.store
            .0
            .borrow_mut()
            .insert(self.config.storage_key.clone(), json.to_string());
    }

    pub fn playing_url(&self) -> Option<String> {
        self.engine.0.borrow().source.clone()
    }

    pub fn set_position(&self, seconds: f64) {
        self.engine.0.borrow_mut().position = seconds;
    }
}
