//! Rendering seam between the session manager and the page
//!
//! The manager and the panel controller push ready-to-display models through
//! `PlayerView`; the browser implementation turns them into markup.

use crate::panel::{NowPlaying, PanelState, Progress, QueueRow};

/// Sink for everything the player shows
pub trait PlayerView {
    /// Show or hide the player bar
    fn set_player_visible(&mut self, visible: bool);

    /// Now-playing details (bar and expanded panel)
    fn render_now_playing(&mut self, now: &NowPlaying);

    /// Play/pause button state
    fn render_play_state(&mut self, playing: bool);

    /// Progress bar and time labels
    fn render_progress(&mut self, progress: &Progress);

    /// Shuffle and repeat button states
    fn render_modes(&mut self, shuffle: bool, repeat: bool);

    /// Queue lists (queue panel and the expanded panel's queue tab)
    fn render_queue(&mut self, rows: &[QueueRow]);

    /// Which panels are open and which tab is active
    fn render_panels(&mut self, panels: &PanelState);

    /// Transient notification
    fn notify(&mut self, message: &str);
}

/// View that renders nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl PlayerView for NullView {
    fn set_player_visible(&mut self, _visible: bool) {}
    fn render_now_playing(&mut self, _now: &NowPlaying) {}
    fn render_play_state(&mut self, _playing: bool) {}
    fn render_progress(&mut self, _progress: &Progress) {}
    fn render_modes(&mut self, _shuffle: bool, _repeat: bool) {}
    fn render_queue(&mut self, _rows: &[QueueRow]) {}
    fn render_panels(&mut self, _panels: &PanelState) {}
    fn notify(&mut self, _message: &str) {}
}
