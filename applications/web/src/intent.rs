//! Click intents on page content and player controls
//!
//! Page builds mark album and track controls with `data-intent`, the player
//! renders its own controls the same way. A click resolves to the innermost
//! element carrying an intent, so a play button inside an album card plays
//! the album instead of opening it.

use coherence_core::{Track, TrackAttributes};
use coherence_playback::intent::{INDEX_ATTR, INTENT_ATTR, TAB_ATTR};
use coherence_playback::{IntentArgs, PanelController, PlayerIntent, SessionManager};

/// Attribute holding an album id
pub const ALBUM_SLUG_ATTR: &str = "data-album-slug";

pub const PLAY_ALBUM_INTENT: &str = "play-album";
pub const OPEN_ALBUM_INTENT: &str = "open-album";
pub const PLAY_TRACK_INTENT: &str = "play-track";
pub const QUEUE_TRACK_INTENT: &str = "queue-track";

/// Selector matching any control with an intent
pub const INTENT_SELECTOR: &str = "[data-intent]";

#[derive(Debug, Clone, PartialEq)]
pub enum ClickIntent {
    /// Replace the queue with an album and play it
    PlayAlbum(String),

    /// Open an album's detail page
    OpenAlbum(String),

    /// Play a single track without touching the queue
    PlayTrack(TrackAttributes),

    /// Append a track to the queue
    QueueTrack(TrackAttributes),

    /// A player control
    Player(PlayerIntent),
}

impl ClickIntent {
    /// Decode the intent of a control from its attributes
    ///
    /// `fraction` is the horizontal click position within the control,
    /// used by seek controls.
    pub fn decode(lookup: impl Fn(&str) -> Option<String>, fraction: Option<f64>) -> Option<Self> {
        let name = lookup(INTENT_ATTR)?;

        let intent = match name.as_str() {
            PLAY_ALBUM_INTENT => Self::PlayAlbum(album_slug(&lookup)?),
            OPEN_ALBUM_INTENT => Self::OpenAlbum(album_slug(&lookup)?),
            PLAY_TRACK_INTENT => Self::PlayTrack(TrackAttributes::from_lookup(&lookup)),
            QUEUE_TRACK_INTENT => Self::QueueTrack(TrackAttributes::from_lookup(&lookup)),
            other => {
                let args = IntentArgs {
                    index: lookup(INDEX_ATTR).and_then(|i| i.trim().parse().ok()),
                    tab: lookup(TAB_ATTR),
                    fraction,
                };
                Self::Player(PlayerIntent::parse(other, &args)?)
            }
        };
        Some(intent)
    }

    /// Carry out the intent
    pub fn apply(self, session: &mut SessionManager, panels: &mut PanelController) {
        match self {
            Self::PlayAlbum(album_id) => session.play_album(&album_id),
            Self::OpenAlbum(album_id) => session.open_album(&album_id),
            Self::PlayTrack(attrs) => match Track::from_attributes(&attrs, None) {
                Some(track) => session.play_track(track, None),
                None => tracing::warn!("Track control without a URL"),
            },
            Self::QueueTrack(attrs) => match Track::from_attributes(&attrs, None) {
                Some(track) => session.add_to_queue(track, None),
                None => tracing::warn!("Queue control without a URL"),
            },
            Self::Player(intent) => panels.dispatch(session, intent),
        }
    }
}

fn album_slug(lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    lookup(ALBUM_SLUG_ATTR).filter(|s| !s.trim().is_empty())
}

/// Click position within a control of `width` starting at `left`, 0.0 - 1.0
pub fn click_fraction(client_x: f64, left: f64, width: f64) -> Option<f64> {
    (width > 0.0 && client_x.is_finite()).then(|| ((client_x - left) / width).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn album_intents_need_a_slug() {
        assert_eq!(
            ClickIntent::decode(attrs(&[("data-intent", "play-album"), ("data-album-slug", "dusk")]), None),
            Some(ClickIntent::PlayAlbum("dusk".to_string()))
        );
        assert_eq!(
            ClickIntent::decode(attrs(&[("data-intent", "open-album"), ("data-album-slug", "dusk")]), None),
            Some(ClickIntent::OpenAlbum("dusk".to_string()))
        );
        assert_eq!(ClickIntent::decode(attrs(&[("data-intent", "play-album")]), None), None);
    }

    #[test]
    fn track_intents_carry_attributes() {
        let lookup = attrs(&[
            ("data-intent", "queue-track"),
            ("data-track-url", "dusk/02.mp3"),
            ("data-track-title", "Second"),
        ]);

        let Some(ClickIntent::QueueTrack(track)) = ClickIntent::decode(lookup, None) else {
            panic!("expected a queue intent");
        };
        assert_eq!(track.url.as_deref(), Some("dusk/02.mp3"));
        assert_eq!(track.title.as_deref(), Some("Second"));
    }

    #[test]
    fn player_controls_decode_with_arguments() {
        assert_eq!(
            ClickIntent::decode(attrs(&[("data-intent", "queue-remove"), ("data-index", "2")]), None),
            Some(ClickIntent::Player(PlayerIntent::Remove(2)))
        );
        assert_eq!(
            ClickIntent::decode(attrs(&[("data-intent", "seek")]), Some(0.5)),
            Some(ClickIntent::Player(PlayerIntent::Seek(0.5)))
        );
        assert_eq!(ClickIntent::decode(attrs(&[("data-intent", "dance")]), None), None);
        assert_eq!(ClickIntent::decode(attrs(&[]), None), None);
    }

    #[test]
    fn click_fraction_is_clamped() {
        assert_eq!(click_fraction(150.0, 100.0, 200.0), Some(0.25));
        assert_eq!(click_fraction(50.0, 100.0, 200.0), Some(0.0));
        assert_eq!(click_fraction(400.0, 100.0, 200.0), Some(1.0));
        assert_eq!(click_fraction(150.0, 100.0, 0.0), None);
    }
}
