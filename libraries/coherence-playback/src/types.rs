//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Playback status
///
/// ```text
/// Idle --load--> Loaded --play--> Playing <--toggle--> Paused
/// ```
/// Track end moves to `Playing` (repeat), `Loaded` next track, or pauses when
/// the queue is exhausted. Emptying the queue returns to `Idle` from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// No current track
    #[default]
    Idle,

    /// Source assigned, not started
    Loaded,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

impl PlaybackStatus {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loaded => "loaded",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for the session manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Storage key of the persisted snapshot
    pub storage_key: String,

    /// Snapshots older than this are never restored (default: 1 hour)
    pub stale_after_ms: u64,

    /// Snapshots younger than this count as a just-completed navigation
    /// and resume automatically (default: 2 seconds)
    pub recent_navigation_ms: u64,

    /// Periodic save interval while playing (default: 2 seconds)
    pub save_interval_ms: u32,

    /// Playback position checkpoint granularity (default: 10 seconds)
    pub checkpoint_secs: u32,

    /// Restore fallback when the engine never signals readiness (default: 1 second)
    pub resume_timeout_ms: u32,

    /// Album detail page path is `prefix + album id + suffix`
    pub album_path_prefix: String,
    pub album_path_suffix: String,

    /// Shown in place of a missing album on the now-playing surfaces
    pub default_album_label: String,

    /// Shown in place of a missing album in queue rows
    pub unknown_album_label: String,

    /// Transient message after adding to the queue
    pub feedback_message: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            storage_key: "coherenceism-player-state".to_string(),
            stale_after_ms: 60 * 60 * 1000,
            recent_navigation_ms: 2_000,
            save_interval_ms: 2_000,
            checkpoint_secs: 10,
            resume_timeout_ms: 1_000,
            album_path_prefix: "/albums/".to_string(),
            album_path_suffix: ".html".to_string(),
            default_album_label: "Coherenceism Music".to_string(),
            unknown_album_label: "Unknown Album".to_string(),
            feedback_message: "Added to queue".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Detail page path for an album
    pub fn album_path(&self, album_id: &str) -> String {
        format!("{}{}{}", self.album_path_prefix, album_id, self.album_path_suffix)
    }
}
