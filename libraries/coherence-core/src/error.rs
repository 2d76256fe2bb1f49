/// Core error types for the Coherence player
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for the Coherence player
#[derive(Error, Debug)]
pub enum CoreError {
    /// The audio engine refused an operation (typically autoplay policy)
    #[error("Audio engine error: {0}")]
    Engine(String),

    /// Persistent key-value storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// A persisted snapshot was readable JSON but not a usable session
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid snapshot error
    pub fn invalid_snapshot(msg: impl Into<String>) -> Self {
        Self::InvalidSnapshot(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
