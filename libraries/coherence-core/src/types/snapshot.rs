/// Persisted playback session snapshot
use serde::{Deserialize, Serialize};

use super::Track;
use crate::error::{CoreError, Result};

/// Serializable snapshot of playback progress and queue
///
/// Written on every meaningful mutation and read once when the session
/// manager is constructed. Keys are camelCase so snapshots written by earlier
/// versions of the site keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Track loaded in the engine when the snapshot was taken
    #[serde(default)]
    pub current_track: Option<Track>,

    /// Play queue in order
    pub queue: Vec<Track>,

    /// Index of the current entry in `queue`
    pub current_index: usize,

    /// Whether audio was playing
    #[serde(default)]
    pub is_playing: bool,

    /// Shuffle flag
    #[serde(default)]
    pub is_shuffled: bool,

    /// Repeat flag
    #[serde(default)]
    pub is_repeating: bool,

    /// Seconds into `current_track`
    #[serde(default)]
    pub current_time: f64,

    /// Snapshot creation time (Unix epoch milliseconds)
    pub timestamp: i64,
}

impl SessionSnapshot {
    /// Parse and validate a stored snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check structural invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if !self.queue.is_empty() && self.current_index >= self.queue.len() {
            return Err(CoreError::invalid_snapshot(format!(
                "current index {} outside queue of {}",
                self.current_index,
                self.queue.len()
            )));
        }

        if !self.current_time.is_finite() || self.current_time < 0.0 {
            return Err(CoreError::invalid_snapshot(format!(
                "invalid position {}",
                self.current_time
            )));
        }

        Ok(())
    }

    /// Milliseconds elapsed between the snapshot and `now_ms`
    ///
    /// Snapshots from the future (clock skew) count as age zero.
    pub fn age_ms(&self, now_ms: i64) -> u64 {
        u64::try_from(now_ms.saturating_sub(self.timestamp)).unwrap_or(0)
    }
}
