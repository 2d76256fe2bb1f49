//! `AudioEngine` backed by a detached `<audio>` element

use std::rc::Rc;

use coherence_core::{AudioEngine, Result};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

use super::{engine_error, js_message};

/// Called with the source URL and the reason when the browser rejects a
/// play request
pub type RejectionHandler = Rc<dyn Fn(String, String)>;

// HTMLMediaElement.HAVE_METADATA
const HAVE_METADATA: u16 = 1;

/// Audio engine over a detached `Audio` element
///
/// The element is never inserted into the document, so no content swap can
/// remove it and playback keeps running across page loads.
pub struct HtmlAudioEngine {
    audio: HtmlAudioElement,
    on_rejected: Option<RejectionHandler>,
}

impl HtmlAudioEngine {
    pub fn new() -> Result<Self> {
        let audio = HtmlAudioElement::new().map_err(|e| engine_error(&e))?;
        audio.set_preload("metadata");
        Ok(Self::from_element(audio))
    }

    pub fn from_element(audio: HtmlAudioElement) -> Self {
        Self {
            audio,
            on_rejected: None,
        }
    }

    /// Underlying element, for attaching event listeners
    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }

    /// Report asynchronous play rejections (autoplay policy) to `handler`
    pub fn set_rejection_handler(&mut self, handler: RejectionHandler) {
        self.on_rejected = Some(handler);
    }
}

impl AudioEngine for HtmlAudioEngine {
    fn set_source(&mut self, url: &str) {
        self.audio.set_src(url);
    }

    fn source(&self) -> Option<String> {
        // The attribute, not the resolved `src` property, so it compares
        // equal to the URL it was set from
        self.audio.get_attribute("src").filter(|s| !s.is_empty())
    }

    fn load(&mut self) {
        self.audio.load();
    }

    fn play(&mut self) -> Result<()> {
        let promise = self.audio.play().map_err(|e| engine_error(&e))?;
        let on_rejected = self.on_rejected.clone();
        let url = self.source().unwrap_or_default();

        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                let reason = js_message(&e);
                match on_rejected {
                    Some(handler) => handler(url, reason),
                    None => tracing::warn!("Playback rejected: {}", reason),
                }
            }
        });

        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            tracing::warn!("Pause failed: {}", js_message(&e));
        }
    }

    fn position(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_position(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.audio.duration();
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }

    fn is_ready(&self) -> bool {
        self.audio.ready_state() >= HAVE_METADATA
    }
}
