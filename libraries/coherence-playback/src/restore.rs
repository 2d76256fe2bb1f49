//! Restore policy for persisted sessions
//!
//! ```text
//! age >= stale_after_ms                      -> Stale (ignored)
//! age <  recent_navigation_ms && was playing -> restore position, resume
//! otherwise                                  -> restore position, paused
//! ```

use coherence_core::SessionSnapshot;

use crate::types::PlayerConfig;

/// How playback continues once the engine is ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeMode {
    /// Start playing again (snapshot follows a just-completed navigation)
    AutoPlay,

    /// Leave paused until the visitor presses play
    Paused,
}

/// Work deferred until the engine can seek
#[derive(Debug, Clone, PartialEq)]
pub struct ResumePlan {
    /// Source the plan applies to
    pub url: String,

    /// Seconds into the track
    pub position: f64,

    pub mode: ResumeMode,
}

/// Outcome of evaluating a stored snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreDecision {
    /// Nothing stored
    Fresh,

    /// Stored snapshot is too old
    Stale { age_ms: u64 },

    /// Seed state from the snapshot; `plan` is set when a track was loaded
    Restore {
        snapshot: SessionSnapshot,
        plan: Option<ResumePlan>,
    },
}

/// Decide what to do with a stored snapshot
pub fn evaluate(snapshot: Option<SessionSnapshot>, now_ms: i64, config: &PlayerConfig) -> RestoreDecision {
    let Some(snapshot) = snapshot else {
        return RestoreDecision::Fresh;
    };

    let age_ms = snapshot.age_ms(now_ms);
    if age_ms >= config.stale_after_ms {
        return RestoreDecision::Stale { age_ms };
    }

    let plan = snapshot.current_track.as_ref().map(|track| {
        let mode = if snapshot.is_playing && age_ms < config.recent_navigation_ms {
            ResumeMode::AutoPlay
        } else {
            ResumeMode::Paused
        };

        ResumePlan {
            url: track.url.clone(),
            position: snapshot.current_time,
            mode,
        }
    });

    RestoreDecision::Restore { snapshot, plan }
}
