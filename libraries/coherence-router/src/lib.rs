//! Coherence Player - Navigation
//!
//! Replaces page content in place instead of reloading the document, so the
//! audio element and player outside the content region keep running.
//!
//! This crate provides:
//! - Link classification (internal, fragment, external)
//! - The [`Router`]: history entries, fetch, partial replacement, fallback
//! - Seams for fetching, parsing, and the live document
//!
//! Browser implementations live in [`wasm`] behind the `wasm` feature.
//!
//! # Example
//!
//! ```rust
//! use coherence_router::link::{classify_link, LinkTarget};
//! use url::Url;
//!
//! let page = Url::parse("https://music.example.org/index.html").unwrap();
//!
//! assert_eq!(
//!     classify_link("/albums/dusk.html", &page),
//!     LinkTarget::Internal("/albums/dusk.html".to_string())
//! );
//! assert_eq!(classify_link("mailto:hi@example.org", &page), LinkTarget::External);
//! ```

mod config;
mod error;
pub mod link;
pub mod page;
mod router;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use config::RouterConfig;
pub use error::{NavigationError, Result};
pub use page::{BrowserHistory, PageFetcher, PageParser, PageSurface, ParsedPage};
pub use router::{Router, RouterPlatform};
