//! Browser implementations of the navigation seams

mod document;
mod fetch;
mod history;

pub use document::{DomPageParser, DomPageSurface};
pub use fetch::FetchPageFetcher;
pub use history::{state_path, WindowHistory};

use std::rc::Rc;

use coherence_core::Navigator;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent};

use crate::error::NavigationError;
use crate::router::Router;

/// Shared router usable as a `Navigator`
///
/// Each navigation runs as its own local task.
#[derive(Clone)]
pub struct RouterHandle(pub Rc<Router>);

impl Navigator for RouterHandle {
    fn navigate(&self, path: &str) {
        let router = Rc::clone(&self.0);
        let path = path.to_string();

        spawn_local(async move {
            if let Err(e) = router.navigate(&path).await {
                tracing::debug!("Navigation to {} ended: {}", path, e);
            }
        });
    }
}

impl RouterHandle {
    /// Replay a history entry
    pub fn pop_state(&self, path: Option<String>) {
        let router = Rc::clone(&self.0);

        spawn_local(async move {
            if let Err(e) = router.handle_pop_state(path.as_deref()).await {
                tracing::debug!("History navigation ended: {}", e);
            }
        });
    }
}

/// `href` of the link a click activated, when the click is a plain
/// left-click that the browser would follow in the same tab
pub fn activated_link(event: &MouseEvent) -> Option<String> {
    if event.default_prevented()
        || event.button() != 0
        || event.ctrl_key()
        || event.meta_key()
        || event.shift_key()
        || event.alt_key()
    {
        return None;
    }

    let target = event.target()?.dyn_into::<Element>().ok()?;
    let link = target.closest("a[href]").ok().flatten()?;

    let opens_elsewhere = link
        .get_attribute("target")
        .is_some_and(|t| !t.is_empty() && t != "_self");
    if opens_elsewhere || link.has_attribute("download") {
        return None;
    }

    link.get_attribute("href")
}

pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub(crate) fn network_error(value: &JsValue) -> NavigationError {
    NavigationError::Network(js_message(value))
}
