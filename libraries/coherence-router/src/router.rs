//! In-place navigation
//!
//! ```text
//! click on internal link -> navigate(path) -> push {path} -> load_page
//! popstate {path}                          -> load_page (no push)
//! load_page: fetch -> parse -> replace nav + content, title, scroll
//!            any failure -> full navigation to path
//! ```
//!
//! Each load takes a generation number. A load that finishes after a newer
//! one started is discarded instead of applied.

use std::cell::Cell;

use url::Url;

use crate::config::RouterConfig;
use crate::error::{NavigationError, Result};
use crate::link::{classify_link, LinkTarget};
use crate::page::{BrowserHistory, PageFetcher, PageParser, PageSurface, ParsedPage};

/// Document services the router drives
pub struct RouterPlatform {
    pub fetcher: Box<dyn PageFetcher>,
    pub parser: Box<dyn PageParser>,
    pub surface: Box<dyn PageSurface>,
    pub history: Box<dyn BrowserHistory>,
}

/// Navigation interceptor
pub struct Router {
    config: RouterConfig,
    fetcher: Box<dyn PageFetcher>,
    parser: Box<dyn PageParser>,
    surface: Box<dyn PageSurface>,
    history: Box<dyn BrowserHistory>,
    generation: Cell<u64>,
}

impl Router {
    pub fn new(config: RouterConfig, platform: RouterPlatform) -> Self {
        Self {
            config,
            fetcher: platform.fetcher,
            parser: platform.parser,
            surface: platform.surface,
            history: platform.history,
            generation: Cell::new(0),
        }
    }

    /// Record the initial page as a history entry
    pub fn setup(&self) {
        let path = self.history.current_path();
        tracing::debug!("Router ready at {}", path);
        self.history.replace_state(&path);
    }

    /// Path to load in place for an activated link, if any
    ///
    /// `None` means the browser should handle the link itself.
    pub fn intercept(&self, href: &str) -> Option<String> {
        let base = match Url::parse(&self.history.current_url()) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!("Cannot resolve links against current page: {}", e);
                return None;
            }
        };

        match classify_link(href, &base) {
            LinkTarget::Internal(path) => {
                tracing::debug!("Intercepting link to {}", path);
                Some(path)
            }
            _ => None,
        }
    }

    /// Navigate to `path` in place, adding a history entry
    pub async fn navigate(&self, path: &str) -> Result<()> {
        self.load_page(path, true).await
    }

    /// Back/forward to an entry; entries without a path are ignored
    pub async fn handle_pop_state(&self, path: Option<&str>) -> Result<()> {
        match path {
            Some(path) => self.load_page(path, false).await,
            None => Ok(()),
        }
    }

    /// Replace the current document's regions with the page at `path`
    ///
    /// Pushes a history entry first when `update_history` is set. On failure
    /// the browser is sent to `path` with a full navigation, unless a newer
    /// load has taken over.
    pub async fn load_page(&self, path: &str, update_history: bool) -> Result<()> {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        if update_history {
            self.history.push_state(path);
        }

        tracing::debug!("Loading page {} (generation {})", path, generation);
        self.surface.set_loading(true);

        let result = self.retrieve(path).await;

        if self.generation.get() != generation {
            tracing::debug!("Discarding stale load of {}", path);
            return Err(NavigationError::Superseded);
        }

        match result {
            Ok(page) => {
                self.apply(&page);
                tracing::info!("Navigated to {}", path);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Navigation to {} failed ({}), falling back to full load", path, e);
                self.surface.set_loading(false);
                self.history.assign_location(path);
                Err(e)
            }
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    async fn retrieve(&self, path: &str) -> Result<ParsedPage> {
        let html = self.fetcher.fetch(path).await?;
        self.parser.parse(&html)
    }

    fn apply(&self, page: &ParsedPage) {
        self.surface.set_title(page.title_or(&self.config.default_title));

        if let Some(nav) = &page.nav_html {
            self.surface.replace_nav(nav);
        }

        self.surface.replace_content(page.content());
        self.surface.set_loading(false);
        self.surface.scroll_to_top();
    }
}
