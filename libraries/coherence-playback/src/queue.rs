//! Play queue with a tracked current position
//!
//! A single ordered list. Every edit keeps `current` pointing at the same
//! logical track; only removing that track moves it (to the following entry,
//! or the preceding one when the last entry is removed).

use coherence_core::Track;

/// Outcome of removing an entry
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    /// The removed track
    pub track: Track,

    /// Whether it was the current entry
    pub was_current: bool,
}

/// Ordered play queue
///
/// Invariant: `current < tracks.len()` whenever the queue is non-empty.
/// When the queue is empty `current` is 0 and meaningless.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    current: usize,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a queue from persisted parts
    ///
    /// An out-of-range index is clamped to the last entry.
    pub fn restore(tracks: Vec<Track>, current: usize) -> Self {
        let current = current.min(tracks.len().saturating_sub(1));
        Self { tracks, current }
    }

    /// Replace the whole queue and point at the first entry
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.current = 0;
    }

    /// Append to the end; the current position is unchanged
    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove the entry at `index`
    ///
    /// Returns `None` (and changes nothing) when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Option<Removal> {
        if index >= self.tracks.len() {
            return None;
        }

        let track = self.tracks.remove(index);
        let was_current = index == self.current;

        if self.tracks.is_empty() {
            self.current = 0;
        } else if was_current {
            // The following entry slid into `index`; fall back to the
            // preceding one when the removed entry was last.
            self.current = index.min(self.tracks.len() - 1);
        } else if index < self.current {
            self.current -= 1;
        }

        Some(Removal { track, was_current })
    }

    /// Move the entry at `from` so it ends up at `to`
    ///
    /// Returns `false` (and changes nothing) when either index is out of
    /// range or both are equal.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.tracks.len();
        if from >= len || to >= len || from == to {
            return false;
        }

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);

        if self.current == from {
            self.current = to;
        } else if from < self.current && to >= self.current {
            self.current -= 1;
        } else if from > self.current && to <= self.current {
            self.current += 1;
        }

        true
    }

    /// Point at `index`
    pub fn set_current(&mut self, index: usize) -> Option<&Track> {
        if index >= self.tracks.len() {
            return None;
        }
        self.current = index;
        self.tracks.get(index)
    }

    /// Step forward, wrapping from the last entry to the first
    pub fn advance(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = if self.current + 1 < self.tracks.len() {
            self.current + 1
        } else {
            0
        };
        self.tracks.get(self.current)
    }

    /// Step back, wrapping from the first entry to the last
    pub fn retreat(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = if self.current > 0 {
            self.current - 1
        } else {
            self.tracks.len() - 1
        };
        self.tracks.get(self.current)
    }

    /// Current entry
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    /// Current index (meaningless when empty)
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Whether entries follow the current one
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.tracks.len()
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(ids: &[&str], current: usize) -> Queue {
        let tracks = ids
            .iter()
            .map(|id| Track::new(format!("/audio/{id}.mp3"), *id))
            .collect();
        Queue::restore(tracks, current)
    }

    fn titles(queue: &Queue) -> Vec<&str> {
        queue.tracks().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn create_empty_queue() {
        let queue = Queue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
    }

    #[test]
    fn push_keeps_current() {
        let mut queue = queue_of(&["A", "B"], 1);
        queue.push(Track::new("/audio/C.mp3", "C"));

        assert_eq!(queue.current_index(), 1);
        assert_eq!(titles(&queue), ["A", "B", "C"]);
    }

    #[test]
    fn advance_and_retreat_wrap() {
        let mut queue = queue_of(&["A", "B", "C"], 0);

        assert_eq!(queue.advance().unwrap().title, "B");
        assert_eq!(queue.advance().unwrap().title, "C");
        assert_eq!(queue.advance().unwrap().title, "A");
        assert_eq!(queue.retreat().unwrap().title, "C");
    }

    #[test]
    fn remove_before_current_shifts_index_down() {
        let mut queue = queue_of(&["A", "B", "C"], 2);
        let removal = queue.remove(1).unwrap();

        assert_eq!(removal.track.title, "B");
        assert!(!removal.was_current);
        assert_eq!(queue.current_index(), 1);
        assert_eq!(queue.current().unwrap().title, "C");
    }

    #[test]
    fn remove_after_current_keeps_index() {
        let mut queue = queue_of(&["A", "B", "C"], 0);
        queue.remove(2).unwrap();
        assert_eq!(queue.current_index(), 0);
    }

    #[test]
    fn remove_current_selects_following() {
        let mut queue = queue_of(&["A", "B", "C"], 1);
        let removal = queue.remove(1).unwrap();

        assert!(removal.was_current);
        assert_eq!(queue.current().unwrap().title, "C");
    }

    #[test]
    fn remove_current_last_selects_new_last() {
        let mut queue = queue_of(&["A", "B", "C"], 2);
        queue.remove(2).unwrap();

        assert_eq!(queue.current_index(), 1);
        assert_eq!(queue.current().unwrap().title, "B");
    }

    #[test]
    fn remove_only_entry_empties_queue() {
        let mut queue = queue_of(&["A"], 0);
        assert!(queue.remove(0).unwrap().was_current);
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), 0);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut queue = queue_of(&["A", "B"], 1);
        assert!(queue.remove(2).is_none());
        assert_eq!(titles(&queue), ["A", "B"]);
        assert_eq!(queue.current_index(), 1);
    }

    #[test]
    fn move_current_follows_track() {
        let mut queue = queue_of(&["A", "B", "C", "D"], 1);
        assert!(queue.move_item(1, 3));

        assert_eq!(titles(&queue), ["A", "C", "D", "B"]);
        assert_eq!(queue.current_index(), 3);
    }

    #[test]
    fn move_across_current_shifts_index() {
        let mut queue = queue_of(&["A", "B", "C", "D"], 2);

        // From before to after current: current shifts down
        assert!(queue.move_item(0, 3));
        assert_eq!(queue.current().unwrap().title, "C");
        assert_eq!(queue.current_index(), 1);

        // From after to before current: current shifts up
        assert!(queue.move_item(3, 0));
        assert_eq!(queue.current().unwrap().title, "C");
        assert_eq!(queue.current_index(), 2);
    }

    #[test]
    fn move_not_crossing_current_keeps_index() {
        let mut queue = queue_of(&["A", "B", "C", "D"], 0);
        assert!(queue.move_item(3, 1));
        assert_eq!(queue.current_index(), 0);
        assert_eq!(titles(&queue), ["A", "D", "B", "C"]);
    }

    #[test]
    fn invalid_moves_are_rejected() {
        let mut queue = queue_of(&["A", "B"], 0);
        assert!(!queue.move_item(0, 0));
        assert!(!queue.move_item(0, 2));
        assert!(!queue.move_item(5, 1));
        assert_eq!(titles(&queue), ["A", "B"]);
    }

    #[test]
    fn restore_clamps_index() {
        let queue = queue_of(&["A", "B"], 7);
        assert_eq!(queue.current_index(), 1);
    }
}
