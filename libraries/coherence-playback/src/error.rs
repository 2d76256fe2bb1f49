//! Error types for playback management

use coherence_core::CoreError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Move with an invalid or identical pair of indices
    #[error("Invalid move from {from} to {to}")]
    InvalidMove { from: usize, to: usize },

    /// Platform error (engine, storage, serialization)
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
