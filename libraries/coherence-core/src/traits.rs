/// Core traits for the Coherence player
///
/// Everything the playback layer needs from the browser is expressed here so
/// the state machine can be driven by fakes in tests. None of the traits
/// require `Send`: the browser runs the whole layer on one thread.
use crate::error::Result;
use crate::types::TrackAttributes;

/// Audio playback engine
///
/// One instance exists per browsing context and lives outside the content
/// region the navigation interceptor replaces. Only the session manager
/// writes to it.
pub trait AudioEngine {
    /// Assign the audio resource to play
    fn set_source(&mut self, url: &str);

    /// Currently assigned resource, if any
    fn source(&self) -> Option<String>;

    /// Ask the engine to start fetching the current source
    fn load(&mut self);

    /// Start or resume playback
    ///
    /// # Errors
    /// Returns an error when the engine refuses to start, e.g. because the
    /// browser requires a user gesture first.
    fn play(&mut self) -> Result<()>;

    /// Stop playback, keeping the position
    fn pause(&mut self);

    /// Current position in seconds
    fn position(&self) -> f64;

    /// Move the playback position (seconds)
    fn set_position(&mut self, seconds: f64);

    /// Duration of the current source in seconds, once known
    fn duration(&self) -> Option<f64>;

    /// Whether enough of the source is loaded to seek and play
    fn is_ready(&self) -> bool;
}

/// Client-local persistent key-value storage
pub trait StateStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Wall clock in Unix epoch milliseconds
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// `Clock` backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Something that can take the visitor to another page
///
/// The navigation interceptor implements this with in-place content
/// replacement; a plain location assignment is the full-page fallback.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Album data as currently present in the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumPage {
    /// Album title attribute
    pub title: Option<String>,

    /// Raw embedded track list (JSON, possibly entity-encoded)
    pub embedded_tracks: Option<String>,

    /// Per-track controls visible on an album detail page
    pub track_controls: Vec<TrackAttributes>,
}

/// Lookup of album data in the live document
pub trait AlbumCatalog {
    /// Album data for `album_id`, or `None` if the page has no such album
    fn album(&self, album_id: &str) -> Option<AlbumPage>;
}
