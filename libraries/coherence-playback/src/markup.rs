//! Player markup
//!
//! Every interactive control carries its `data-intent` so the document-level
//! click handler can decode it without looking at class names.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::intent::{PlayerIntent, INDEX_ATTR, INTENT_ATTR, TAB_ATTR};
use crate::panel::{PanelTab, QueueRow};

/// Element ids used by the browser view
pub mod ids {
    pub const ROOT: &str = "coherence-player-root";
    pub const PLAYER: &str = "coherence-player";
    pub const ART: &str = "coherence-player-art";
    pub const TITLE: &str = "coherence-player-title";
    pub const ALBUM: &str = "coherence-player-album";
    pub const PLAY_TOGGLE: &str = "coherence-play-toggle";
    pub const PROGRESS_FILL: &str = "coherence-progress-fill";
    pub const ELAPSED: &str = "coherence-elapsed";
    pub const TOTAL: &str = "coherence-total";
    pub const SHUFFLE: &str = "coherence-shuffle";
    pub const REPEAT: &str = "coherence-repeat";
    pub const LYRICS_TOGGLE: &str = "coherence-lyrics-toggle";
    pub const QUEUE_PANEL: &str = "coherence-queue-panel";
    pub const QUEUE_LIST: &str = "coherence-queue-list";
    pub const NOW_PLAYING: &str = "coherence-now-playing";
    pub const NP_COVER: &str = "coherence-np-cover";
    pub const NP_TITLE: &str = "coherence-np-title";
    pub const NP_ALBUM: &str = "coherence-np-album";
    pub const NP_STYLE: &str = "coherence-np-style";
    pub const NP_LYRICS: &str = "coherence-np-lyrics";
    pub const NP_QUEUE: &str = "coherence-np-queue";
    pub const TAB_LYRICS: &str = "coherence-tab-lyrics";
    pub const TAB_QUEUE: &str = "coherence-tab-queue";
}

/// Escape text for use inside element content or a quoted attribute
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn button(intent: &PlayerIntent, extra: &str, label: &str, content: &str) -> String {
    format!(
        r#"<button type="button" class="global-player-btn" {INTENT_ATTR}="{}"{extra} aria-label="{label}">{content}</button>"#,
        intent.name()
    )
}

fn tab_button(tab: PanelTab, id: &str, label: &str) -> String {
    format!(
        r#"<button type="button" class="now-playing-tab" id="{id}" {INTENT_ATTR}="{}" {TAB_ATTR}="{}">{label}</button>"#,
        PlayerIntent::SelectTab(tab).name(),
        tab.as_str()
    )
}

/// Player bar, queue panel, and now-playing panel under one root element
///
/// Inserted once per browsing context, outside the replaced content region.
/// The lyrics button starts hidden and is shown for tracks with lyrics.
pub fn player_shell() -> String {
    let toggle_np = PlayerIntent::ToggleNowPlaying.name();
    let seek = PlayerIntent::Seek(0.0).name();

    format!(
        r#"<div id="{root}" class="coherence-player-root">
<div id="{player}" class="global-player" hidden>
  <div class="global-player-content">
    <div class="global-player-album-art" id="{art}" {INTENT_ATTR}="{toggle_np}"><div class="global-player-album-art-placeholder">&#9834;</div></div>
    <div class="global-player-info" {INTENT_ATTR}="{toggle_np}">
      <div class="global-player-title" id="{title}">No track selected</div>
      <div class="global-player-artist" id="{album}">Choose a song to play</div>
    </div>
    <div class="global-player-controls">
      {prev}
      <button type="button" class="global-player-btn primary" id="{play}" {INTENT_ATTR}="{toggle_play}" aria-label="Play/Pause">&#9654;</button>
      {next}
    </div>
    <div class="global-progress-container">
      <span class="global-time" id="{elapsed}">0:00</span>
      <div class="global-progress-bar" {INTENT_ATTR}="{seek}"><div class="global-progress-fill" id="{fill}"></div></div>
      <span class="global-time" id="{total}">0:00</span>
    </div>
    <div class="global-player-extra">
      <button type="button" class="global-player-btn" id="{shuffle}" {INTENT_ATTR}="{shuffle_intent}" aria-label="Shuffle">&#8644;</button>
      <button type="button" class="global-player-btn" id="{repeat}" {INTENT_ATTR}="{repeat_intent}" aria-label="Repeat">&#8635;</button>
      <button type="button" class="global-player-btn" id="{lyrics_toggle}" {INTENT_ATTR}="{toggle_np}" aria-label="Lyrics" hidden>&#9998;</button>
      {queue}
    </div>
  </div>
</div>
<div id="{queue_panel}" class="queue-panel" hidden>
  <div class="queue-header"><h3>Queue</h3>{close_queue}</div>
  <div class="queue-list" id="{queue_list}"></div>
</div>
<div id="{now_playing}" class="now-playing-panel" hidden>
  <div class="now-playing-header">{close_np}</div>
  <div class="now-playing-cover" id="{np_cover}"></div>
  <h2 class="now-playing-title" id="{np_title}"></h2>
  <p class="now-playing-album" id="{np_album}"></p>
  <p class="now-playing-style" id="{np_style}"></p>
  <div class="now-playing-tabs">{tab_lyrics}{tab_queue}</div>
  <pre class="now-playing-lyrics" id="{np_lyrics}"></pre>
  <div class="queue-list" id="{np_queue}" hidden></div>
</div>
</div>"#,
        root = ids::ROOT,
        player = ids::PLAYER,
        art = ids::ART,
        title = ids::TITLE,
        album = ids::ALBUM,
        prev = button(&PlayerIntent::Previous, "", "Previous track", "&#9198;"),
        play = ids::PLAY_TOGGLE,
        toggle_play = PlayerIntent::TogglePlay.name(),
        next = button(&PlayerIntent::Next, "", "Next track", "&#9197;"),
        elapsed = ids::ELAPSED,
        fill = ids::PROGRESS_FILL,
        total = ids::TOTAL,
        shuffle = ids::SHUFFLE,
        shuffle_intent = PlayerIntent::ToggleShuffle.name(),
        repeat = ids::REPEAT,
        repeat_intent = PlayerIntent::ToggleRepeat.name(),
        lyrics_toggle = ids::LYRICS_TOGGLE,
        queue = button(&PlayerIntent::ToggleQueue, "", "Queue", "&#9776;"),
        queue_panel = ids::QUEUE_PANEL,
        close_queue = button(&PlayerIntent::HideQueue, "", "Close queue", "&times;"),
        queue_list = ids::QUEUE_LIST,
        now_playing = ids::NOW_PLAYING,
        close_np = button(&PlayerIntent::HideNowPlaying, "", "Close", "&times;"),
        np_cover = ids::NP_COVER,
        np_title = ids::NP_TITLE,
        np_album = ids::NP_ALBUM,
        np_style = ids::NP_STYLE,
        tab_lyrics = tab_button(PanelTab::Lyrics, ids::TAB_LYRICS, "Lyrics"),
        tab_queue = tab_button(PanelTab::Queue, ids::TAB_QUEUE, "Queue"),
        np_lyrics = ids::NP_LYRICS,
        np_queue = ids::NP_QUEUE,
    )
}

/// Cover image, or the placeholder note when there is none
pub fn cover_markup(cover_url: Option<&str>, alt: &str) -> String {
    match cover_url {
        Some(url) => format!(
            r#"<img src="{}" alt="{}">"#,
            escape_html(url),
            escape_html(alt)
        ),
        None => r#"<div class="global-player-album-art-placeholder">&#9834;</div>"#.to_string(),
    }
}

/// Queue rows with their per-row controls
///
/// Move buttons only appear where a neighbour exists.
pub fn queue_markup(rows: &[QueueRow]) -> String {
    if rows.is_empty() {
        return r#"<div class="queue-empty">Queue is empty</div>"#.to_string();
    }

    let mut html = String::new();
    for row in rows {
        let index = format!(r#" {INDEX_ATTR}="{}""#, row.index);
        let class = if row.is_current {
            "queue-item current"
        } else {
            "queue-item"
        };

        let _ = write!(
            html,
            r#"<div class="{class}" {INDEX_ATTR}="{}"><div class="queue-item-info"><div class="queue-item-title">{}</div><div class="queue-item-album">{}</div></div><div class="queue-item-actions">"#,
            row.index,
            escape_html(&row.title),
            escape_html(&row.album),
        );

        if row.can_move_up {
            html.push_str(&button(&PlayerIntent::MoveUp(row.index), &index, "Move up", "&#8593;"));
        }
        if row.can_move_down {
            html.push_str(&button(&PlayerIntent::MoveDown(row.index), &index, "Move down", "&#8595;"));
        }
        html.push_str(&button(&PlayerIntent::PlayAt(row.index), &index, "Play", "&#9654;"));
        html.push_str(&button(&PlayerIntent::Remove(row.index), &index, "Remove", "&times;"));
        html.push_str("</div></div>");
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, can_move_up: bool, can_move_down: bool) -> QueueRow {
        QueueRow {
            index,
            title: format!("Track {index}"),
            album: "Album".to_string(),
            is_current: index == 0,
            can_move_up,
            can_move_down,
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html(r#"<b>"Rock" & 'Roll'</b>"#),
            "&lt;b&gt;&quot;Rock&quot; &amp; &#39;Roll&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn rows_only_offer_available_moves() {
        let html = queue_markup(&[row(0, false, true), row(1, true, false)]);

        assert_eq!(html.matches(r#"data-intent="queue-move-up""#).count(), 1);
        assert_eq!(html.matches(r#"data-intent="queue-move-down""#).count(), 1);
        assert_eq!(html.matches(r#"data-intent="queue-remove""#).count(), 2);
        assert!(html.contains(r#"class="queue-item current" data-index="0""#));
    }

    #[test]
    fn row_text_is_escaped() {
        let mut entry = row(0, false, false);
        entry.title = "<script>".to_string();

        let html = queue_markup(&[entry]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn shell_controls_carry_intents() {
        let html = player_shell();

        for intent in ["toggle-play", "previous", "next", "seek", "toggle-queue", "close-queue"] {
            assert!(html.contains(&format!(r#"data-intent="{intent}""#)), "missing {intent}");
        }
        assert!(html.contains(r#"data-tab="lyrics""#));
        assert!(html.contains(r#"id="coherence-player""#));
    }

    #[test]
    fn shell_is_one_root_holding_every_panel() {
        let html = player_shell();
        let root_open = format!(r#"<div id="{}""#, ids::ROOT);

        assert!(html.starts_with(&root_open));
        assert!(html.ends_with("</div>"));
        assert_eq!(html.matches("<div").count(), html.matches("</div>").count());

        let root_close = html.len() - "</div>".len();
        for id in [ids::PLAYER, ids::QUEUE_PANEL, ids::NOW_PLAYING] {
            let at = html.find(&format!(r#"id="{id}""#)).unwrap();
            assert!(at > root_open.len() && at < root_close, "{id} outside the root");
        }
    }

    #[test]
    fn lyrics_button_starts_hidden() {
        let html = player_shell();
        let id = format!(r#"id="{}""#, ids::LYRICS_TOGGLE);
        let start = html.find(&id).unwrap();
        let tag_start = html[..start].rfind("<button").unwrap();
        let tag_end = start + html[start..].find('>').unwrap();
        let tag = &html[tag_start..=tag_end];

        assert!(tag.contains(r#"data-intent="toggle-now-playing""#));
        assert!(tag.contains(" hidden>"));
    }

    #[test]
    fn cover_falls_back_to_placeholder() {
        assert!(cover_markup(None, "A").contains("placeholder"));
        assert!(cover_markup(Some("/c.jpg?a=1&b=2"), "A").contains("/c.jpg?a=1&amp;b=2"));
    }
}
