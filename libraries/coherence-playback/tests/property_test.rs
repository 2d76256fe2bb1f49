//! Property-based tests for the play queue
//!
//! For any sequence of add/remove/move operations the current index keeps
//! pointing at the same track unless that track was removed, and stays in
//! range whenever the queue is non-empty.

use coherence_core::Track;
use coherence_playback::Queue;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push,
    Remove(usize),
    Move(usize, usize),
    Select(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Push),
        2 => (0usize..12).prop_map(Op::Remove),
        3 => (0usize..12, 0usize..12).prop_map(|(from, to)| Op::Move(from, to)),
        1 => (0usize..12).prop_map(Op::Select),
    ]
}

proptest! {
    #[test]
    fn current_follows_its_track(initial in 0usize..8, ops in prop::collection::vec(op(), 1..60)) {
        let mut next_id = 0usize;
        let mut fresh = || {
            next_id += 1;
            Track::new(format!("/audio/{next_id}.mp3"), format!("T{next_id}"))
        };

        let mut queue = Queue::restore((0..initial).map(|_| fresh()).collect(), 0);

        for op in ops {
            let before = queue.current().map(|t| t.url.clone());
            let len_before = queue.len();

            match op {
                Op::Push => {
                    queue.push(fresh());
                    prop_assert_eq!(queue.current().map(|t| t.url.clone()), before);
                }
                Op::Remove(index) => match queue.remove(index) {
                    Some(removal) if removal.was_current => {
                        prop_assert_eq!(Some(removal.track.url), before);
                        if !queue.is_empty() {
                            prop_assert_eq!(queue.current_index(), index.min(queue.len() - 1));
                        }
                    }
                    Some(_) => {
                        prop_assert_eq!(queue.current().map(|t| t.url.clone()), before);
                    }
                    None => {
                        prop_assert!(index >= len_before);
                        prop_assert_eq!(queue.len(), len_before);
                    }
                },
                Op::Move(from, to) => {
                    let moved = queue.move_item(from, to);
                    prop_assert_eq!(moved, from < len_before && to < len_before && from != to);
                    prop_assert_eq!(queue.current().map(|t| t.url.clone()), before);
                }
                Op::Select(index) => {
                    let selected = queue.set_current(index).is_some();
                    prop_assert_eq!(selected, index < len_before);
                }
            }

            if !queue.is_empty() {
                prop_assert!(queue.current_index() < queue.len());
            }
        }
    }

    #[test]
    fn advance_visits_every_entry_then_wraps(len in 1usize..20) {
        let tracks: Vec<Track> = (0..len)
            .map(|i| Track::new(format!("/audio/{i}.mp3"), format!("T{i}")))
            .collect();
        let mut queue = Queue::restore(tracks, 0);

        for step in 1..=len {
            let track = queue.advance().cloned();
            prop_assert_eq!(track.map(|t| t.title), Some(format!("T{}", step % len)));
        }
        prop_assert_eq!(queue.current_index(), 0);

        queue.retreat();
        prop_assert_eq!(queue.current_index(), len - 1);
    }
}
