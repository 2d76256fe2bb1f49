//! Coherence Player - Browser Entry Point
//!
//! Loads the site configuration, installs console logging, and wires the
//! playback session and the navigation interceptor into the page.
//!
//! Built as a `cdylib` with the `wasm` feature; the configuration, logging
//! and click-intent layers also build natively for testing.

pub mod config;
pub mod error;
pub mod intent;
pub mod logging;

#[cfg(feature = "wasm")]
mod app;

pub use config::SiteConfig;
pub use error::{Result, WebError};
pub use intent::ClickIntent;
