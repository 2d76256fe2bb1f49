//! Typed intents for player controls
//!
//! Every interactive control the player renders carries a `data-intent`
//! identifier (plus `data-index` / `data-tab` where needed). Click handling
//! decodes those attributes back into a `PlayerIntent` instead of inferring
//! intent from class names or layout.

use crate::panel::PanelTab;

/// Attribute holding the intent identifier
pub const INTENT_ATTR: &str = "data-intent";

/// Attribute holding a queue index
pub const INDEX_ATTR: &str = "data-index";

/// Attribute holding a panel tab name
pub const TAB_ATTR: &str = "data-tab";

/// Arguments decoded alongside an intent identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentArgs {
    /// Queue index (`data-index`)
    pub index: Option<usize>,

    /// Panel tab (`data-tab`)
    pub tab: Option<String>,

    /// Horizontal click position within the control, 0.0 - 1.0
    pub fraction: Option<f64>,
}

/// A user action on the player surfaces
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerIntent {
    TogglePlay,
    Previous,
    Next,
    ToggleShuffle,
    ToggleRepeat,
    /// Seek to a fraction of the track
    Seek(f64),
    ToggleQueue,
    HideQueue,
    ToggleNowPlaying,
    HideNowPlaying,
    SelectTab(PanelTab),
    /// Play the queue entry at index now
    PlayAt(usize),
    Remove(usize),
    MoveUp(usize),
    MoveDown(usize),
}

impl PlayerIntent {
    /// Identifier written to `data-intent`
    pub fn name(&self) -> &'static str {
        match self {
            Self::TogglePlay => "toggle-play",
            Self::Previous => "previous",
            Self::Next => "next",
            Self::ToggleShuffle => "toggle-shuffle",
            Self::ToggleRepeat => "toggle-repeat",
            Self::Seek(_) => "seek",
            Self::ToggleQueue => "toggle-queue",
            Self::HideQueue => "close-queue",
            Self::ToggleNowPlaying => "toggle-now-playing",
            Self::HideNowPlaying => "close-now-playing",
            Self::SelectTab(_) => "select-tab",
            Self::PlayAt(_) => "queue-play",
            Self::Remove(_) => "queue-remove",
            Self::MoveUp(_) => "queue-move-up",
            Self::MoveDown(_) => "queue-move-down",
        }
    }

    /// Decode an identifier and its arguments
    ///
    /// Returns `None` for unknown identifiers and for identifiers whose
    /// required argument is missing.
    pub fn parse(name: &str, args: &IntentArgs) -> Option<Self> {
        let intent = match name {
            "toggle-play" => Self::TogglePlay,
            "previous" => Self::Previous,
            "next" => Self::Next,
            "toggle-shuffle" => Self::ToggleShuffle,
            "toggle-repeat" => Self::ToggleRepeat,
            "seek" => Self::Seek(args.fraction?),
            "toggle-queue" => Self::ToggleQueue,
            "close-queue" => Self::HideQueue,
            "toggle-now-playing" => Self::ToggleNowPlaying,
            "close-now-playing" => Self::HideNowPlaying,
            "select-tab" => Self::SelectTab(PanelTab::from_str(args.tab.as_deref()?)?),
            "queue-play" => Self::PlayAt(args.index?),
            "queue-remove" => Self::Remove(args.index?),
            "queue-move-up" => Self::MoveUp(args.index?),
            "queue-move-down" => Self::MoveDown(args.index?),
            _ => return None,
        };
        Some(intent)
    }
}
