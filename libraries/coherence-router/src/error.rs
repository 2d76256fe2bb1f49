//! Error types for page navigation

use thiserror::Error;

/// Navigation errors
///
/// Every variant except `Superseded` ends in a full-page navigation.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// Server answered with a non-success status
    #[error("Failed to load {path}: HTTP {status}")]
    Status { path: String, status: u16 },

    /// Request never completed
    #[error("Network error: {0}")]
    Network(String),

    /// Link or page URL could not be resolved
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Fetched document could not be parsed
    #[error("Failed to parse page: {0}")]
    Parse(String),

    /// A newer navigation started before this one finished
    #[error("Navigation superseded")]
    Superseded,
}

/// Result type for navigation
pub type Result<T> = std::result::Result<T, NavigationError>;
