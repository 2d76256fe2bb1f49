//! Page data decoding
//!
//! The page build embeds each album's track list as a JSON array inside a
//! quoted attribute and HTML-entity-encodes it to keep the attribute valid.
//! Browsers decode attribute entities on read, but copies taken from raw
//! markup still carry them, so decoding is applied only when the payload does
//! not parse as-is.

use std::borrow::Cow;

use crate::error::Result;
use crate::traits::AlbumPage;
use crate::types::{Track, TrackAttributes};

/// Decode the HTML character references the page build emits
///
/// Handles the named references `&amp; &lt; &gt; &quot; &apos;` and decimal or
/// hexadecimal numeric references. Unknown references are left untouched.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match tail.find(';').and_then(|end| decode_reference(&tail[1..end]).map(|c| (c, end))) {
            Some((decoded, end)) => {
                out.push(decoded);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Parse an embedded album track list
pub fn parse_track_list(raw: &str) -> Result<Vec<TrackAttributes>> {
    match serde_json::from_str(raw) {
        Ok(tracks) => Ok(tracks),
        Err(err) if raw.contains('&') => {
            tracing::debug!("Track list did not parse as-is ({}), decoding entities", err);
            Ok(serde_json::from_str(&decode_entities(raw))?)
        }
        Err(err) => Err(err.into()),
    }
}

/// Resolve the playable tracks of an album page
///
/// Prefers the embedded track list and falls back to the per-track controls.
/// Entries without a playable URL are dropped. The album title is attached
/// to every track that does not name its own album.
pub fn resolve_album_tracks(page: &AlbumPage) -> Result<Vec<Track>> {
    let album = page.title.as_deref();

    if let Some(raw) = page.embedded_tracks.as_deref() {
        let tracks = parse_track_list(raw)?
            .iter()
            .filter_map(|attrs| Track::from_attributes(attrs, album))
            .collect();
        return Ok(tracks);
    }

    Ok(page
        .track_controls
        .iter()
        .filter_map(|attrs| {
            let own_album = attrs.album.as_deref().filter(|a| !a.trim().is_empty());
            Track::from_attributes(attrs, own_album.or(album))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(
            decode_entities("[{&quot;title&quot;:&quot;Rock &amp; Roll&#39;s &#x263A;&quot;}]"),
            "[{\"title\":\"Rock & Roll's \u{263A}\"}]"
        );
    }

    #[test]
    fn leaves_plain_and_unknown_text_alone() {
        assert!(matches!(decode_entities("no refs"), Cow::Borrowed("no refs")));
        assert_eq!(decode_entities("a & b &nbsp; c"), "a & b &nbsp; c");
        assert_eq!(decode_entities("dangling &amp"), "dangling &amp");
    }

    #[test]
    fn parses_encoded_track_list() {
        let raw = "[{&quot;title&quot;:&quot;One&quot;,&quot;url&quot;:&quot;1.mp3&quot;}]";
        let tracks = parse_track_list(raw).unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].url.as_deref(), Some("1.mp3"));
    }

    #[test]
    fn literal_ampersands_in_decoded_json_survive() {
        let raw = r#"[{"title":"Salt &amp; Light","url":"1.mp3"}]"#;
        let tracks = parse_track_list(raw).unwrap();

        // Already-valid JSON is taken as-is.
        assert_eq!(tracks[0].title.as_deref(), Some("Salt &amp; Light"));
    }

    #[test]
    fn embedded_list_drops_unplayable_entries_and_sets_album() {
        let page = AlbumPage {
            title: Some("First Light".to_string()),
            embedded_tracks: Some(
                r#"[{"title":"One","url":"1.mp3"},{"title":"Draft","url":""},{"title":"Two","url":"2.mp3","lyrics":"la"}]"#
                    .to_string(),
            ),
            track_controls: Vec::new(),
        };

        let tracks = resolve_album_tracks(&page).unwrap();
        assert_eq!(tracks.len(), 2);
        assert!(tracks.iter().all(|t| t.album.as_deref() == Some("First Light")));
        assert_eq!(tracks[1].lyrics.as_deref(), Some("la"));
    }

    #[test]
    fn falls_back_to_track_controls() {
        let page = AlbumPage {
            title: Some("Page Album".to_string()),
            embedded_tracks: None,
            track_controls: vec![
                TrackAttributes {
                    url: Some("1.mp3".to_string()),
                    title: Some("One".to_string()),
                    album: Some("Control Album".to_string()),
                    ..Default::default()
                },
                TrackAttributes {
                    url: Some("2.mp3".to_string()),
                    title: Some("Two".to_string()),
                    ..Default::default()
                },
            ],
        };

        let tracks = resolve_album_tracks(&page).unwrap();
        assert_eq!(tracks[0].album.as_deref(), Some("Control Album"));
        assert_eq!(tracks[1].album.as_deref(), Some("Page Album"));
    }

    #[test]
    fn corrupt_embedded_list_is_an_error() {
        let page = AlbumPage {
            embedded_tracks: Some("[{".to_string()),
            ..Default::default()
        };
        assert!(resolve_album_tracks(&page).is_err());
    }
}
