//! `AlbumCatalog` reading album markup from the live document

use coherence_core::{AlbumCatalog, AlbumPage, TrackAttributes};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::document;

/// Intent of the per-track play controls on album pages
pub const PLAY_TRACK_INTENT: &str = "play-track";

/// Reads `[data-album-slug]` elements and the track controls inside them
pub struct DomAlbumCatalog {
    document: Document,
}

impl DomAlbumCatalog {
    pub fn new() -> coherence_core::Result<Self> {
        Ok(Self {
            document: document()?,
        })
    }
}

/// Track controls inside one album element, in document order
fn track_controls(album: &Element) -> Vec<TrackAttributes> {
    let selector = format!(r#"[data-intent="{PLAY_TRACK_INTENT}"]"#);
    let Ok(nodes) = album.query_selector_all(&selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(|element| track_attributes(&element))
        .collect()
}

impl AlbumCatalog for DomAlbumCatalog {
    fn album(&self, album_id: &str) -> Option<AlbumPage> {
        let selector = format!(r#"[data-album-slug="{}"]"#, escape_selector_value(album_id));
        let element = self.document.query_selector(&selector).ok().flatten()?;

        Some(AlbumPage {
            title: element.get_attribute("data-album-title"),
            embedded_tracks: element.get_attribute("data-album-tracks"),
            track_controls: track_controls(&element),
        })
    }
}

/// Track fields from the discrete `data-*` attributes of a control
pub fn track_attributes(element: &Element) -> TrackAttributes {
    TrackAttributes::from_lookup(|name| element.get_attribute(name))
}

fn escape_selector_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
