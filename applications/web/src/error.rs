//! Error types for the browser entry point

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebError>;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document error: {0}")]
    Dom(String),

    #[error("Platform error: {0}")]
    Platform(#[from] coherence_core::CoreError),

    #[error("Router error: {0}")]
    Router(#[from] coherence_router::NavigationError),
}

impl From<config::ConfigError> for WebError {
    fn from(err: config::ConfigError) -> Self {
        WebError::Config(err.to_string())
    }
}
