//! Browser wiring
//!
//! Builds the router and the one session manager, then connects document,
//! window, and audio events to them. All callbacks look the application up
//! through a thread-local and borrow the session with `try_borrow_mut`, so
//! an event arriving while the session is busy is skipped instead of
//! panicking.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use coherence_core::{SystemClock, Track};
use coherence_playback::wasm::{
    DomAlbumCatalog, DomPlayerView, HtmlAudioEngine, LocalStorage, LocationNavigator,
};
use coherence_playback::{
    PanelController, PendingResume, PlayerIntent, ResumeTrigger, SessionManager, SessionPlatform,
    SessionSlot, SharedSession,
};
use coherence_router::wasm::{
    activated_link, state_path, DomPageParser, DomPageSurface, FetchPageFetcher, RouterHandle,
    WindowHistory,
};
use coherence_router::{Router, RouterPlatform};
use tracing::Level;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlAudioElement, KeyboardEvent, MouseEvent,
    PopStateEvent, VisibilityState, Window,
};

use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::error::{Result, WebError};
use crate::intent::{click_fraction, ClickIntent, INTENT_SELECTOR};
use crate::logging;

thread_local! {
    static SESSION: SessionSlot = const { SessionSlot::new() };
    static APP: OnceCell<Rc<App>> = const { OnceCell::new() };
}

struct App {
    session: SharedSession,
    panels: RefCell<PanelController>,
    router: RouterHandle,
}

fn with_app(f: impl FnOnce(&App)) {
    if let Some(app) = APP.with(|cell| cell.get().cloned()) {
        f(&app);
    }
}

fn with_session(f: impl FnOnce(&mut SessionManager)) {
    with_app(|app| match app.session.try_borrow_mut() {
        Ok(mut session) => f(&mut session),
        Err(_) => tracing::debug!("Session busy, event skipped"),
    });
}

fn dom_error(value: &JsValue) -> WebError {
    WebError::Dom(coherence_playback::wasm::js_message(value))
}

#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let loaded = SiteConfig::load(embedded_config().as_deref());
    let config = loaded.as_ref().ok().cloned().unwrap_or_default();
    logging::init(config.level().unwrap_or(Level::INFO));
    if let Err(e) = &loaded {
        tracing::warn!("Ignoring site configuration: {}", e);
    }

    if APP.with(|cell| cell.get().is_some()) {
        tracing::debug!("Player already running");
        return Ok(());
    }

    boot(&config).map_err(|e| {
        tracing::error!("Player failed to start: {}", e);
        JsValue::from_str(&e.to_string())
    })
}

fn embedded_config() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
}

fn boot(config: &SiteConfig) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| WebError::Dom("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| WebError::Dom("no document".to_string()))?;

    let router = Rc::new(Router::new(
        config.router.clone(),
        RouterPlatform {
            fetcher: Box::new(FetchPageFetcher),
            parser: Box::new(DomPageParser::new(config.router.clone())),
            surface: Box::new(DomPageSurface::new(&config.router)?),
            history: Box::new(WindowHistory),
        },
    ));
    router.setup();
    let router = RouterHandle(router);

    let mut engine = HtmlAudioEngine::new()?;
    engine.set_rejection_handler(Rc::new(|url: String, reason: String| {
        with_session(|session| session.on_play_rejected(&url, &reason));
    }));
    let audio = engine.element().clone();

    let platform = SessionPlatform {
        engine: Box::new(engine),
        store: Box::new(LocalStorage::open()?),
        clock: Box::new(SystemClock),
        view: Box::new(DomPlayerView::get_or_create()?),
        catalog: Box::new(DomAlbumCatalog::new()?),
        location: Box::new(LocationNavigator),
    };
    let player_config = config.player.clone();
    let session = SESSION.with(|slot| slot.get_or_init(|| SessionManager::new(player_config, platform)));

    let pending = {
        let mut session = session.borrow_mut();
        session.set_navigator(Rc::new(router.clone()));
        session.take_pending_resume()
    };

    let app = Rc::new(App {
        session,
        panels: RefCell::new(PanelController::new()),
        router,
    });
    APP.with(|cell| cell.set(app))
        .map_err(|_| WebError::Dom("player started twice".to_string()))?;

    if let Some(pending) = pending {
        schedule_resume(&window, pending, config.player.resume_timeout_ms)?;
    }

    listen_document(&document)?;
    listen_window(&window)?;
    listen_audio(&audio)?;
    start_save_timer(&window, config.player.save_interval_ms)?;

    tracing::info!("Player started");
    Ok(())
}

// ===== Restore =====

fn schedule_resume(window: &Window, pending: PendingResume, timeout_ms: u32) -> Result<()> {
    let PendingResume {
        plan,
        resolver,
        signal,
    } = pending;

    let fallback = Closure::once_into_js(move || {
        if resolver.resolve(ResumeTrigger::TimedOut) {
            tracing::debug!("Engine not ready in time, resuming anyway");
        }
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            fallback.unchecked_ref(),
            i32::try_from(timeout_ms).unwrap_or(i32::MAX),
        )
        .map_err(|e| dom_error(&e))?;

    wasm_bindgen_futures::spawn_local(async move {
        let trigger = signal.await;
        with_session(|session| session.complete_resume(&plan, trigger));
    });
    Ok(())
}

// ===== Listeners =====

fn listen(
    target: &EventTarget,
    event: &str,
    capture: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback_and_bool(event, closure.as_ref().unchecked_ref(), capture)
        .map_err(|e| dom_error(&e))?;
    closure.forget();
    Ok(())
}

fn listen_document(document: &Document) -> Result<()> {
    listen(document, "click", true, |event| {
        if let Some(click) = event.dyn_ref::<MouseEvent>() {
            with_app(|app| handle_click(app, click));
        }
    })?;

    listen(document, "keydown", false, |event| {
        let escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Escape");
        if escape {
            dispatch_player(PlayerIntent::HideNowPlaying);
        }
    })?;

    let visibility_document = document.clone();
    listen(document, "visibilitychange", false, move |_| {
        if visibility_document.visibility_state() == VisibilityState::Hidden {
            with_session(SessionManager::on_page_hide);
        }
    })
}

fn listen_window(window: &Window) -> Result<()> {
    listen(window, "popstate", false, |event| {
        let path = event.dyn_ref::<PopStateEvent>().and_then(state_path);
        with_app(|app| app.router.pop_state(path));
    })?;

    for name in ["pagehide", "beforeunload"] {
        listen(window, name, false, |_| with_session(SessionManager::on_page_hide))?;
    }
    Ok(())
}

fn listen_audio(audio: &HtmlAudioElement) -> Result<()> {
    listen(audio, "ended", false, |_| with_session(SessionManager::on_track_ended))?;
    listen(audio, "timeupdate", false, |_| with_session(SessionManager::on_time_update))?;

    for name in ["loadedmetadata", "canplay"] {
        listen(audio, name, false, |_| with_session(SessionManager::on_engine_ready))?;
    }
    // `playing` fires once audio actually runs, not when it is requested
    for name in ["playing", "pause"] {
        listen(audio, name, false, |_| {
            with_session(SessionManager::on_engine_state_change);
        })?;
    }
    Ok(())
}

fn start_save_timer(window: &Window, interval_ms: u32) -> Result<()> {
    let tick = Closure::<dyn FnMut()>::new(|| with_session(SessionManager::tick));
    window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            i32::try_from(interval_ms).unwrap_or(i32::MAX),
        )
        .map_err(|e| dom_error(&e))?;
    tick.forget();
    Ok(())
}

// ===== Clicks =====

fn handle_click(app: &App, event: &MouseEvent) {
    let control = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|t| t.closest(INTENT_SELECTOR).ok().flatten());

    if let Some(control) = control {
        let rect = control.get_bounding_client_rect();
        let fraction = click_fraction(f64::from(event.client_x()), rect.left(), rect.width());

        if let Some(intent) = ClickIntent::decode(|name| control.get_attribute(name), fraction) {
            event.prevent_default();
            event.stop_propagation();
            apply(app, intent);
            return;
        }
    }

    let Some(path) = activated_link(event).and_then(|href| app.router.0.intercept(&href)) else {
        return;
    };
    event.prevent_default();
    event.stop_propagation();

    // Fresh snapshot in case the in-place load falls back to a full page load
    with_session(|session| {
        if session.is_playing() {
            if let Err(e) = session.save_state() {
                tracing::warn!("Failed to save session before navigation: {}", e);
            }
        }
    });
    coherence_core::Navigator::navigate(&app.router, &path);
}

fn apply(app: &App, intent: ClickIntent) {
    let (Ok(mut session), Ok(mut panels)) = (app.session.try_borrow_mut(), app.panels.try_borrow_mut()) else {
        tracing::debug!("Player busy, click skipped");
        return;
    };
    intent.apply(&mut session, &mut panels);
}

fn dispatch_player(intent: PlayerIntent) {
    with_app(|app| apply(app, ClickIntent::Player(intent)));
}

// ===== Script API =====

fn track_from_js(track: JsValue) -> std::result::Result<Track, JsValue> {
    serde_wasm_bindgen::from_value(track).map_err(|e| JsValue::from_str(&format!("invalid track: {e}")))
}

/// Navigate in place to an internal path
#[wasm_bindgen]
pub fn navigate(path: &str) {
    with_app(|app| coherence_core::Navigator::navigate(&app.router, path));
}

/// Play a track object `{ url, title, album?, coverUrl?, stylePrompt?, lyrics? }`
#[wasm_bindgen(js_name = playTrack)]
pub fn play_track(track: JsValue, album: Option<String>) -> std::result::Result<(), JsValue> {
    let track = track_from_js(track)?;
    with_session(|session| session.play_track(track, album.as_deref()));
    Ok(())
}

/// Replace the queue with an album of the current page and play it
#[wasm_bindgen(js_name = playAlbum)]
pub fn play_album(album_id: &str) {
    with_session(|session| session.play_album(album_id));
}

/// Append a track object to the queue
#[wasm_bindgen(js_name = addToQueue)]
pub fn add_to_queue(track: JsValue, album: Option<String>) -> std::result::Result<(), JsValue> {
    let track = track_from_js(track)?;
    with_session(|session| session.add_to_queue(track, album.as_deref()));
    Ok(())
}

#[wasm_bindgen(js_name = isPlaying)]
pub fn is_playing() -> bool {
    APP.with(|cell| {
        cell.get()
            .and_then(|app| app.session.try_borrow().ok().map(|session| session.is_playing()))
            .unwrap_or(false)
    })
}
