//! Core domain types

pub mod snapshot;
pub mod track;

pub use snapshot::SessionSnapshot;
pub use track::{Track, TrackAttributes};
