//! Link classification
//!
//! Decides which activated links are handled in place. Only same-origin
//! http(s) targets qualify; fragments, other origins, and other schemes
//! (`mailto:`, `tel:`, `javascript:`) are left to the browser.

use url::{Position, Url};

/// What an `href` points at, relative to the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Same-origin page; holds path, query, and fragment
    Internal(String),

    /// In-page anchor
    Fragment,

    /// Another origin or a non-web scheme
    External,

    /// Blank `href`
    Empty,
}

impl LinkTarget {
    /// Path to navigate to, for internal links
    pub fn internal_path(&self) -> Option<&str> {
        match self {
            Self::Internal(path) => Some(path),
            _ => None,
        }
    }
}

/// Classify `href` as found on a page located at `base`
pub fn classify_link(href: &str, base: &Url) -> LinkTarget {
    let href = href.trim();
    if href.is_empty() {
        return LinkTarget::Empty;
    }
    if href.starts_with('#') {
        return LinkTarget::Fragment;
    }

    let Ok(target) = base.join(href) else {
        return LinkTarget::External;
    };

    if !matches!(target.scheme(), "http" | "https") || target.origin() != base.origin() {
        return LinkTarget::External;
    }

    LinkTarget::Internal(target[Position::BeforePath..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://music.example.org/albums/first-light.html").unwrap()
    }

    fn classify(href: &str) -> LinkTarget {
        classify_link(href, &base())
    }

    #[test]
    fn site_paths_are_internal() {
        assert_eq!(classify("/"), LinkTarget::Internal("/".to_string()));
        assert_eq!(
            classify("/albums/dusk.html?from=home"),
            LinkTarget::Internal("/albums/dusk.html?from=home".to_string())
        );
        assert_eq!(
            classify("dusk.html"),
            LinkTarget::Internal("/albums/dusk.html".to_string())
        );
        assert_eq!(
            classify("https://music.example.org/about.html"),
            LinkTarget::Internal("/about.html".to_string())
        );
    }

    #[test]
    fn anchors_and_blanks_pass_through() {
        assert_eq!(classify("#lyrics"), LinkTarget::Fragment);
        assert_eq!(classify("   "), LinkTarget::Empty);
    }

    #[test]
    fn other_origins_and_schemes_are_external() {
        assert_eq!(classify("https://other.example.com/"), LinkTarget::External);
        assert_eq!(classify("http://music.example.org/"), LinkTarget::External);
        assert_eq!(classify("//cdn.example.com/a.mp3"), LinkTarget::External);
        assert_eq!(classify("mailto:hello@example.org"), LinkTarget::External);
        assert_eq!(classify("javascript:void(0)"), LinkTarget::External);
    }
}
