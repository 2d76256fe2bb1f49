/// Track types shared by the page data, the queue, and persisted sessions
use serde::{Deserialize, Deserializer, Serialize};

/// One playable audio item with its display metadata
///
/// Immutable once constructed. The queue holds owned copies, never references
/// into page markup, so a track survives the content region being replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Audio resource locator
    pub url: String,

    /// Track title
    #[serde(default)]
    pub title: String,

    /// Album name (optional)
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Cover image locator (optional)
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,

    /// Style prompt text (optional)
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub style_prompt: Option<String>,

    /// Lyrics text (optional)
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
}

impl Track {
    /// Create a track with only the required fields
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            album: None,
            cover_url: None,
            style_prompt: None,
            lyrics: None,
        }
    }

    /// Builder-style album setter
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = non_empty(Some(album.into()));
        self
    }

    /// Copy of this track with `album` merged in
    ///
    /// A supplied, non-blank album name wins over the track's own one.
    #[must_use]
    pub fn merged_album(&self, album: Option<&str>) -> Self {
        let mut track = self.clone();
        if let Some(name) = non_empty(album.map(str::to_string)) {
            track.album = Some(name);
        }
        track
    }

    /// Build a track from discrete page attributes
    ///
    /// Returns `None` when the attributes carry no playable URL.
    pub fn from_attributes(attrs: &TrackAttributes, album: Option<&str>) -> Option<Self> {
        let url = non_empty(attrs.url.clone())?;

        let track = Self {
            url,
            title: attrs.title.clone().unwrap_or_default(),
            album: non_empty(attrs.album.clone()),
            cover_url: non_empty(attrs.cover_url.clone()),
            style_prompt: non_empty(attrs.style_prompt.clone()),
            lyrics: non_empty(attrs.lyrics.clone()),
        };

        Some(track.merged_album(album))
    }

    /// Whether the track has lyrics worth showing
    pub fn has_lyrics(&self) -> bool {
        self.lyrics.as_deref().is_some_and(|l| !l.trim().is_empty())
    }
}

/// Raw track fields as the page build exposes them
///
/// Used both for the discrete `data-track-*` attributes on a track control and
/// for the entries of an album's embedded JSON track list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackAttributes {
    /// `data-track-url` / `url`
    pub url: Option<String>,

    /// `data-track-title` / `title`
    pub title: Option<String>,

    /// `data-album-title`
    pub album: Option<String>,

    /// `data-cover-url` / `coverUrl`
    pub cover_url: Option<String>,

    /// `data-style-prompt` / `stylePrompt`
    pub style_prompt: Option<String>,

    /// `data-lyrics` / `lyrics`
    pub lyrics: Option<String>,
}

impl TrackAttributes {
    /// Read the discrete `data-*` attributes through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: lookup("data-track-url"),
            title: lookup("data-track-title"),
            album: lookup("data-album-title"),
            cover_url: lookup("data-cover-url"),
            style_prompt: lookup("data-style-prompt"),
            lyrics: lookup("data-lyrics"),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_empty(value))
}
