//! `BrowserHistory` over `window.history` and `window.location`

use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;
use web_sys::PopStateEvent;

use super::js_message;
use crate::page::BrowserHistory;

const PATH_KEY: &str = "path";

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHistory;

fn entry(path: &str) -> JsValue {
    let state = Object::new();
    let _ = Reflect::set(&state, &JsValue::from_str(PATH_KEY), &JsValue::from_str(path));
    state.into()
}

/// Path stored in a history entry by this router
pub fn state_path(event: &PopStateEvent) -> Option<String> {
    let state = event.state();
    if state.is_null() || state.is_undefined() {
        return None;
    }
    Reflect::get(&state, &JsValue::from_str(PATH_KEY))
        .ok()?
        .as_string()
        .filter(|p| !p.is_empty())
}

impl BrowserHistory for WindowHistory {
    fn current_url(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }

    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn push_state(&self, path: &str) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        if let Err(e) = history.push_state_with_url(&entry(path), "", Some(path)) {
            tracing::warn!("pushState failed: {}", js_message(&e));
        }
    }

    fn replace_state(&self, path: &str) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        if let Err(e) = history.replace_state_with_url(&entry(path), "", Some(path)) {
            tracing::warn!("replaceState failed: {}", js_message(&e));
        }
    }

    fn assign_location(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(path) {
            tracing::error!("Failed to navigate to {}: {}", path, js_message(&e));
        }
    }
}
