//! Router configuration

use serde::{Deserialize, Serialize};

/// Where content lives in the site's pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Primary content region
    pub content_selector: String,

    /// Content container on pages without a primary region (the home page grid)
    pub fallback_selector: String,

    /// Navigation region, replaced alongside the content
    pub nav_selector: String,

    /// Title used when a fetched page has none
    pub default_title: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            content_selector: "main".to_string(),
            fallback_selector: ".album-grid-container".to_string(),
            nav_selector: "nav".to_string(),
            default_title: "Coherenceism Music".to_string(),
        }
    }
}
