//! Coherence Player - Playback Session
//!
//! Continuous playback for the Coherenceism Music site: one audio engine per
//! browsing context, a play queue, and a persisted session that survives
//! in-place navigation and reloads.
//!
//! This crate provides:
//! - Session manager (play, pause, next/previous with wraparound, seek)
//! - Play queue with index-preserving remove and move
//! - Session snapshots with staleness and auto-resume rules
//! - Single-resolution resume gate (engine readiness vs. fallback timer)
//! - Queue and now-playing panel projection, dispatched through typed intents
//!
//! # Architecture
//!
//! `coherence-playback` is platform-agnostic:
//! - The engine, storage, clock, catalog and view are traits from
//!   `coherence-core` or [`view::PlayerView`]
//! - Browser implementations live in [`wasm`] behind the `wasm` feature
//! - Everything else runs (and is tested) natively
//!
//! # Example
//!
//! ```rust
//! use coherence_playback::{PlaybackStatus, Queue};
//! use coherence_core::Track;
//!
//! let mut queue = Queue::new();
//! queue.push(Track::new("/audio/a.mp3", "A"));
//! queue.push(Track::new("/audio/b.mp3", "B"));
//!
//! assert_eq!(queue.advance().map(|t| t.title.as_str()), Some("B"));
//! assert_eq!(queue.advance().map(|t| t.title.as_str()), Some("A"));
//! assert_eq!(PlaybackStatus::default(), PlaybackStatus::Idle);
//! ```

mod error;
pub mod intent;
mod manager;
pub mod markup;
pub mod panel;
mod queue;
pub mod restore;
pub mod resume;
mod slot;
pub mod types;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use error::{PlaybackError, Result};
pub use intent::{IntentArgs, PlayerIntent};
pub use manager::{PendingResume, SessionManager, SessionPlatform};
pub use panel::{PanelController, PanelState, PanelTab};
pub use queue::{Queue, Removal};
pub use restore::{ResumeMode, ResumePlan};
pub use resume::{resume_gate, ResumeResolver, ResumeSignal, ResumeTrigger};
pub use slot::{SessionSlot, SharedSession};
pub use types::{PlaybackStatus, PlayerConfig};
pub use view::{NullView, PlayerView};
