//! Queue and now-playing panels
//!
//! Pure projection of session state into display models, plus the controller
//! that routes player intents into the session manager. The controller owns
//! nothing but panel visibility and the active tab.

use coherence_core::Track;
use serde::{Deserialize, Serialize};

use crate::intent::PlayerIntent;
use crate::manager::SessionManager;

const NO_STYLE: &str = "No style information available";
const NO_LYRICS: &str = "No lyrics available";

/// Tabs of the expanded now-playing panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelTab {
    #[default]
    Lyrics,
    Queue,
}

impl PanelTab {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lyrics => "lyrics",
            Self::Queue => "queue",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "lyrics" => Some(Self::Lyrics),
            "queue" => Some(Self::Queue),
            _ => None,
        }
    }
}

/// Panel visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    pub queue_open: bool,
    pub now_playing_open: bool,
    pub active_tab: PanelTab,
}

/// One queue entry as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRow {
    pub index: usize,
    pub title: String,
    pub album: String,
    pub is_current: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

/// Project the queue into display rows
pub fn queue_rows(tracks: &[Track], current: usize, unknown_album: &str) -> Vec<QueueRow> {
    let last = tracks.len().saturating_sub(1);

    tracks
        .iter()
        .enumerate()
        .map(|(index, track)| QueueRow {
            index,
            title: track.title.clone(),
            album: track
                .album
                .clone()
                .unwrap_or_else(|| unknown_album.to_string()),
            is_current: index == current,
            can_move_up: index > 0,
            can_move_down: index < last,
        })
        .collect()
}

/// Details of the current track as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub album: String,
    pub cover_url: Option<String>,
    pub style_text: String,
    pub lyrics_text: String,
    /// Whether the lyrics button is shown at all
    pub has_lyrics: bool,
}

impl NowPlaying {
    pub fn from_track(track: &Track, default_album: &str) -> Self {
        Self {
            title: track.title.clone(),
            album: track
                .album
                .clone()
                .unwrap_or_else(|| default_album.to_string()),
            cover_url: track.cover_url.clone(),
            style_text: track
                .style_prompt
                .clone()
                .unwrap_or_else(|| NO_STYLE.to_string()),
            lyrics_text: track.lyrics.clone().unwrap_or_else(|| NO_LYRICS.to_string()),
            has_lyrics: track.has_lyrics(),
        }
    }
}

/// Playback progress as displayed
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// 0.0 - 100.0
    pub percent: f64,
    pub elapsed: String,
    pub total: String,
}

impl Progress {
    pub fn new(position: f64, duration: Option<f64>) -> Self {
        let percent = match duration {
            Some(d) if d.is_finite() && d > 0.0 && position.is_finite() => {
                (position / d * 100.0).clamp(0.0, 100.0)
            }
            _ => 0.0,
        };

        Self {
            percent,
            elapsed: format_time(position),
            total: format_time(duration.unwrap_or(f64::NAN)),
        }
    }
}

/// Format seconds as `m:ss`; non-finite or negative input shows `0:00`
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Routes player intents and tracks panel visibility
#[derive(Debug, Clone, Default)]
pub struct PanelController {
    state: PanelState,
}

impl PanelController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Apply an intent, then re-render the panels
    pub fn dispatch(&mut self, session: &mut SessionManager, intent: PlayerIntent) {
        tracing::debug!("Player intent: {:?}", intent);

        match intent {
            PlayerIntent::TogglePlay => session.toggle_play(),
            PlayerIntent::Previous => {
                if let Err(e) = session.previous_track() {
                    tracing::debug!("Previous ignored: {}", e);
                }
            }
            PlayerIntent::Next => {
                if let Err(e) = session.next_track() {
                    tracing::debug!("Next ignored: {}", e);
                }
            }
            PlayerIntent::ToggleShuffle => session.toggle_shuffle(),
            PlayerIntent::ToggleRepeat => session.toggle_repeat(),
            PlayerIntent::Seek(fraction) => session.seek(fraction),
            PlayerIntent::ToggleQueue => {
                self.state.queue_open = !self.state.queue_open;
                session.refresh_queue();
            }
            PlayerIntent::HideQueue => self.state.queue_open = false,
            PlayerIntent::ToggleNowPlaying => {
                if self.state.now_playing_open {
                    self.state.now_playing_open = false;
                } else {
                    self.open_now_playing(session);
                }
            }
            PlayerIntent::HideNowPlaying => self.state.now_playing_open = false,
            PlayerIntent::SelectTab(tab) => {
                self.state.active_tab = tab;
                if tab == PanelTab::Queue {
                    session.refresh_queue();
                }
            }
            PlayerIntent::PlayAt(index) => {
                if let Err(e) = session.play_at(index) {
                    tracing::debug!("Play-at ignored: {}", e);
                }
            }
            PlayerIntent::Remove(index) => {
                if let Err(e) = session.remove_from_queue(index) {
                    tracing::debug!("Remove ignored: {}", e);
                }
            }
            PlayerIntent::MoveUp(index) => {
                if let Some(to) = index.checked_sub(1) {
                    self.move_item(session, index, to);
                }
            }
            PlayerIntent::MoveDown(index) => {
                if let Some(to) = index.checked_add(1) {
                    self.move_item(session, index, to);
                }
            }
        }

        session.view_mut().render_panels(&self.state);
    }

    fn open_now_playing(&mut self, session: &mut SessionManager) {
        if session.current_track().is_none() {
            tracing::debug!("No track currently playing, panel stays closed");
            return;
        }

        session.refresh_now_playing();
        session.refresh_queue();
        self.state.now_playing_open = true;
    }

    fn move_item(&mut self, session: &mut SessionManager, from: usize, to: usize) {
        if let Err(e) = session.move_queue_item(from, to) {
            tracing::debug!("Move ignored: {}", e);
        }
    }
}
