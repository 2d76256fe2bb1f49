//! Site configuration
//!
//! The page build may embed a JSON document in
//! `<script id="coherence-config" type="application/json">`. Every key is
//! optional; anything missing keeps its default.
//!
//! ```json
//! {
//!   "log_level": "debug",
//!   "player": { "album_path_prefix": "/music/albums/" },
//!   "router": { "default_title": "Coherenceism" }
//! }
//! ```

use coherence_playback::PlayerConfig;
use coherence_router::RouterConfig;
use serde::Deserialize;
use tracing::Level;

use crate::error::{Result, WebError};

/// Id of the element holding the embedded configuration
pub const CONFIG_ELEMENT_ID: &str = "coherence-config";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Session manager settings
    pub player: PlayerConfig,

    /// Navigation interceptor settings
    pub router: RouterConfig,

    /// Console log level (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            router: RouterConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from embedded JSON, or defaults when there is none
    pub fn load(embedded: Option<&str>) -> Result<Self> {
        let Some(json) = embedded.filter(|j| !j.trim().is_empty()) else {
            return Ok(Self::default());
        };

        let settings = config::Config::builder()
            .add_source(config::File::from_str(json, config::FileFormat::Json))
            .build()?;

        let config: SiteConfig = settings.try_deserialize()?;
        config.level()?;
        Ok(config)
    }

    /// Parsed log level
    pub fn level(&self) -> Result<Level> {
        self.log_level
            .trim()
            .parse::<Level>()
            .map_err(|_| WebError::Config(format!("unknown log level: {}", self.log_level)))
    }
}
