//! Coherence Player Core
//!
//! Platform-agnostic types, traits, and error handling for the continuous
//! playback layer of the Coherenceism Music site.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackAttributes`, `SessionSnapshot`
//! - **Core Traits**: `AudioEngine`, `StateStore`, `Clock`, `Navigator`, `AlbumCatalog`
//! - **Page Data**: decoding of the track lists the page build embeds into album markup
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! Browser implementations of the traits live behind the `wasm` features of
//! the playback and router crates; tests use in-memory fakes.
//!
//! # Example
//!
//! ```rust
//! use coherence_core::types::{Track, TrackAttributes};
//!
//! let attrs = TrackAttributes {
//!     url: Some("https://cdn.example.com/one.mp3".to_string()),
//!     title: Some("One".to_string()),
//!     album: Some("First Light".to_string()),
//!     ..Default::default()
//! };
//!
//! let track = Track::from_attributes(&attrs, None).expect("playable track");
//! assert_eq!(track.album.as_deref(), Some("First Light"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod page_data;
pub mod traits;
pub mod types;

pub use error::{CoreError, Result};
pub use traits::{AlbumCatalog, AlbumPage, AudioEngine, Clock, Navigator, StateStore, SystemClock};
pub use types::{SessionSnapshot, Track, TrackAttributes};
