//! Parsing fetched pages and replacing regions of the live document

use wasm_bindgen::JsCast;
use web_sys::{Document, DomParser, Element, HtmlElement, SupportedType};

use super::js_message;
use crate::config::RouterConfig;
use crate::error::{NavigationError, Result};
use crate::page::{PageParser, PageSurface, ParsedPage};

fn select(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// `PageParser` over `DOMParser`
pub struct DomPageParser {
    config: RouterConfig,
}

impl DomPageParser {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }
}

impl PageParser for DomPageParser {
    fn parse(&self, html: &str) -> Result<ParsedPage> {
        let parser = DomParser::new().map_err(|e| NavigationError::Parse(js_message(&e)))?;
        let document = parser
            .parse_from_string(html, SupportedType::TextHtml)
            .map_err(|e| NavigationError::Parse(js_message(&e)))?;

        let title = document.title();

        Ok(ParsedPage {
            title: (!title.trim().is_empty()).then_some(title),
            nav_html: select(&document, &self.config.nav_selector).map(|e| e.inner_html()),
            content_html: select(&document, &self.config.content_selector).map(|e| e.inner_html()),
            fallback_html: select(&document, &self.config.fallback_selector)
                .map(|e| e.outer_html()),
            body_html: document.body().map(|b| b.inner_html()).unwrap_or_default(),
        })
    }
}

/// `PageSurface` over the current document
///
/// The content container is resolved once, when the surface is created:
/// primary region, else fallback container, else body.
pub struct DomPageSurface {
    document: Document,
    content: Option<HtmlElement>,
    nav: Option<Element>,
}

impl DomPageSurface {
    pub fn new(config: &RouterConfig) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| NavigationError::Parse("no document available".to_string()))?;

        let content = select(&document, &config.content_selector)
            .or_else(|| select(&document, &config.fallback_selector))
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            .or_else(|| document.body());
        let nav = select(&document, &config.nav_selector);

        if content.is_none() {
            tracing::warn!("No content container found");
        }

        Ok(Self {
            document,
            content,
            nav,
        })
    }
}

impl PageSurface for DomPageSurface {
    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn replace_nav(&self, html: &str) {
        if let Some(nav) = &self.nav {
            nav.set_inner_html(html);
        }
    }

    fn replace_content(&self, html: &str) {
        if let Some(content) = &self.content {
            content.set_inner_html(html);
        }
    }

    fn scroll_to_top(&self) {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    fn set_loading(&self, loading: bool) {
        if let Some(content) = &self.content {
            let opacity = if loading { "0.5" } else { "1" };
            let _ = content.style().set_property("opacity", opacity);
        }
    }
}
