//! Full-page navigation

use coherence_core::Navigator;

use super::js_message;

/// Navigates by assigning `window.location`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };

        if let Err(e) = window.location().set_href(path) {
            tracing::error!("Failed to navigate to {}: {}", path, js_message(&e));
        }
    }
}
