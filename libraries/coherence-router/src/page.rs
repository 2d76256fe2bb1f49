//! Page retrieval and document seams
//!
//! The router only sees fetched HTML as a [`ParsedPage`] and the live
//! document through [`PageSurface`] and [`BrowserHistory`].

use async_trait::async_trait;

use crate::error::Result;

/// Regions extracted from a fetched document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// `<title>` text
    pub title: Option<String>,

    /// Inner markup of the navigation region
    pub nav_html: Option<String>,

    /// Inner markup of the primary content region
    pub content_html: Option<String>,

    /// Outer markup of the fallback container, kept whole
    pub fallback_html: Option<String>,

    /// Inner markup of the body
    pub body_html: String,
}

impl ParsedPage {
    /// Markup that replaces the current content region
    ///
    /// Primary region, else the fallback container, else the whole body.
    pub fn content(&self) -> &str {
        self.content_html
            .as_deref()
            .or(self.fallback_html.as_deref())
            .unwrap_or(&self.body_html)
    }

    /// Page title, or `default` when the page has none
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(default)
    }
}

/// Retrieves documents by path
#[async_trait(?Send)]
pub trait PageFetcher {
    /// Fetch the HTML at `path`
    ///
    /// # Errors
    /// `Status` for non-success responses, `Network` when the request fails.
    async fn fetch(&self, path: &str) -> Result<String>;
}

/// Parses fetched HTML into its regions
pub trait PageParser {
    fn parse(&self, html: &str) -> Result<ParsedPage>;
}

/// The live document's replaceable regions
pub trait PageSurface {
    fn set_title(&self, title: &str);

    /// Replace the navigation region's markup
    fn replace_nav(&self, html: &str);

    /// Replace the content region's markup
    fn replace_content(&self, html: &str);

    fn scroll_to_top(&self);

    /// Dim the content region while a page loads
    fn set_loading(&self, loading: bool);
}

/// Session history and location
pub trait BrowserHistory {
    /// Full URL of the current page
    fn current_url(&self) -> String;

    /// Path of the current page
    fn current_path(&self) -> String;

    /// Add an entry `{path}`
    fn push_state(&self, path: &str);

    /// Replace the current entry with `{path}`
    fn replace_state(&self, path: &str);

    /// Full browser navigation
    fn assign_location(&self, path: &str);
}
