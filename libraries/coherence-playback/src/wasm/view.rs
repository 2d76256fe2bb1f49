//! `PlayerView` rendering into the document

use coherence_core::{CoreError, Result};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, HtmlElement};

use super::{document, js_message};
use crate::markup::{self, ids};
use crate::panel::{NowPlaying, PanelState, PanelTab, Progress, QueueRow};
use crate::view::PlayerView;

const FEEDBACK_MS: i32 = 2_000;

/// Player bar and panels, created once under the root element
///
/// The shell is a sibling of `<body>`, so replacing the body or any region
/// inside it leaves the player in place.
pub struct DomPlayerView {
    document: Document,
}

impl DomPlayerView {
    /// Attach to the existing player markup or insert it
    pub fn get_or_create() -> Result<Self> {
        let document = document()?;

        if document.get_element_by_id(ids::ROOT).is_none() {
            tracing::debug!("Creating player markup");
            document
                .document_element()
                .ok_or_else(|| CoreError::invalid_input("document has no root element"))?
                .insert_adjacent_html("beforeend", &markup::player_shell())
                .map_err(|e| CoreError::invalid_input(js_message(&e)))?;
        }

        Ok(Self { document })
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }

    fn set_html(&self, id: &str, html: &str) {
        if let Some(element) = self.element(id) {
            element.set_inner_html(html);
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(element) = self.element(id) {
            let result = if hidden {
                element.set_attribute("hidden", "")
            } else {
                element.remove_attribute("hidden")
            };
            if let Err(e) = result {
                tracing::debug!("Failed to toggle #{}: {}", id, js_message(&e));
            }
        }
    }

    fn set_class(&self, id: &str, class: &str, on: bool) {
        if let Some(element) = self.element(id) {
            let _ = element.class_list().toggle_with_force(class, on);
        }
    }
}

impl PlayerView for DomPlayerView {
    fn set_player_visible(&mut self, visible: bool) {
        self.set_hidden(ids::PLAYER, !visible);
    }

    fn render_now_playing(&mut self, now: &NowPlaying) {
        let cover = markup::cover_markup(now.cover_url.as_deref(), &now.title);

        self.set_text(ids::TITLE, &now.title);
        self.set_text(ids::ALBUM, &now.album);
        self.set_html(ids::ART, &cover);

        self.set_text(ids::NP_TITLE, &now.title);
        self.set_text(ids::NP_ALBUM, &now.album);
        self.set_text(ids::NP_STYLE, &now.style_text);
        self.set_text(ids::NP_LYRICS, &now.lyrics_text);
        self.set_html(ids::NP_COVER, &cover);
        self.set_class(ids::PLAYER, "has-lyrics", now.has_lyrics);
        self.set_hidden(ids::LYRICS_TOGGLE, !now.has_lyrics);
    }

    fn render_play_state(&mut self, playing: bool) {
        self.set_class(ids::PLAY_TOGGLE, "playing", playing);
        self.set_html(ids::PLAY_TOGGLE, if playing { "&#10074;&#10074;" } else { "&#9654;" });
    }

    fn render_progress(&mut self, progress: &Progress) {
        if let Some(fill) = self
            .element(ids::PROGRESS_FILL)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        {
            let _ = fill
                .style()
                .set_property("width", &format!("{:.2}%", progress.percent));
        }

        self.set_text(ids::ELAPSED, &progress.elapsed);
        self.set_text(ids::TOTAL, &progress.total);
    }

    fn render_modes(&mut self, shuffle: bool, repeat: bool) {
        self.set_class(ids::SHUFFLE, "active", shuffle);
        self.set_class(ids::REPEAT, "active", repeat);
    }

    fn render_queue(&mut self, rows: &[QueueRow]) {
        let html = markup::queue_markup(rows);
        self.set_html(ids::QUEUE_LIST, &html);
        self.set_html(ids::NP_QUEUE, &html);
    }

    fn render_panels(&mut self, panels: &PanelState) {
        self.set_hidden(ids::QUEUE_PANEL, !panels.queue_open);
        self.set_hidden(ids::NOW_PLAYING, !panels.now_playing_open);

        let lyrics = panels.active_tab == PanelTab::Lyrics;
        self.set_class(ids::TAB_LYRICS, "active", lyrics);
        self.set_class(ids::TAB_QUEUE, "active", !lyrics);
        self.set_hidden(ids::NP_LYRICS, !lyrics);
        self.set_hidden(ids::NP_QUEUE, lyrics);
    }

    fn notify(&mut self, message: &str) {
        let Ok(toast) = self.document.create_element("div") else {
            return;
        };
        toast.set_class_name("queue-feedback");
        toast.set_text_content(Some(message));

        let Some(root) = self.element(ids::ROOT) else {
            return;
        };
        if root.append_child(&toast).is_err() {
            return;
        }

        let remove = Closure::once_into_js(move || toast.remove());
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.unchecked_ref(),
                FEEDBACK_MS,
            );
        }
    }
}
