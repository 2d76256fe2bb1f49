//! Browser implementations of the playback platform
//!
//! The audio element, local storage, the album markup of the live document,
//! and the player view. Each implements the corresponding trait so the
//! session manager never touches `web_sys` directly.

pub mod catalog;
pub mod engine;
pub mod location;
pub mod storage;
pub mod view;

pub use catalog::{track_attributes, DomAlbumCatalog};
pub use engine::{HtmlAudioEngine, RejectionHandler};
pub use location::LocationNavigator;
pub use storage::LocalStorage;
pub use view::DomPlayerView;

use coherence_core::CoreError;
use wasm_bindgen::{JsCast, JsValue};

/// Turn a thrown JS value into a readable message
pub fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub(crate) fn engine_error(value: &JsValue) -> CoreError {
    CoreError::engine(js_message(value))
}

pub(crate) fn document() -> Result<web_sys::Document, CoreError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| CoreError::invalid_input("no document available"))
}
