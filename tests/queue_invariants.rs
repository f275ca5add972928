//! Randomized invariant checks
//!
//! Feeds long seeded operation sequences through the public facade and
//! asserts the cross-structure invariants between every call: queue
//! coherence (size, cursor, circular traversal), heap order and id
//! uniqueness, history bookkeeping, and clone-isolation of the
//! recommendation reads.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use playqueue::QueueEngine;

const SEEDS: [u64; 4] = [7, 42, 1001, 987654321];
const STEPS: usize = 400;
const ID_SPACE: i64 = 24;

/// Multiset of queued ids, tracked independently of the engine
#[derive(Default)]
struct QueueModel {
    counts: std::collections::HashMap<i64, usize>,
    len: usize,
}

impl QueueModel {
    fn add(&mut self, id: i64) {
        *self.counts.entry(id).or_insert(0) += 1;
        self.len += 1;
    }

    fn remove(&mut self, id: i64) {
        if let Some(n) = self.counts.get_mut(&id) {
            *n -= 1;
            if *n == 0 {
                self.counts.remove(&id);
            }
            self.len -= 1;
        }
    }

    fn contains(&self, id: i64) -> bool {
        self.counts.contains_key(&id)
    }
}

fn assert_engine_coherent(engine: &QueueEngine, model: &QueueModel) {
    // Queue size and snapshot agree with the model multiset
    let snapshot = engine.queue_snapshot();
    assert_eq!(snapshot.len(), engine.queue_len());
    assert_eq!(snapshot.len(), model.len);

    let mut counts = std::collections::HashMap::new();
    for id in &snapshot {
        *counts.entry(*id).or_insert(0usize) += 1;
    }
    assert_eq!(counts, model.counts);

    // Cursor: set exactly when non-empty, marked on exactly one view row,
    // and that row agrees with current_song()
    let view = engine.queue_view();
    assert_eq!(view.len(), snapshot.len());
    match engine.current_song() {
        Some(current) => {
            let marked: Vec<_> = view.iter().filter(|r| r.is_current).collect();
            assert_eq!(marked.len(), 1);
            assert_eq!(marked[0].song_id, current);
        }
        None => {
            assert!(engine.queue_is_empty());
            assert!(view.iter().all(|r| !r.is_current));
        }
    }

    // View rows are positioned 0..len in snapshot order
    for (i, row) in view.iter().enumerate() {
        assert_eq!(row.position, i);
        assert_eq!(row.song_id, snapshot[i]);
    }

    // Popularity index: descending priorities, distinct ids, and the
    // read drains nothing
    let top = engine.top_songs(usize::MAX);
    assert_eq!(top.len(), engine.heap_len());
    for pair in top.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
    let mut ids: Vec<_> = top.iter().map(|r| r.song_id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), top.len());
    assert_eq!(engine.top_songs(usize::MAX).len(), engine.heap_len());
}

#[test]
fn random_call_sequences_hold_invariants() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut engine = QueueEngine::with_heap_capacity(ID_SPACE as usize);
        let mut model = QueueModel::default();

        for _ in 0..STEPS {
            let id = rng.gen_range(0..ID_SPACE);
            let undo_before = engine.undo_depth();

            match rng.gen_range(0..10) {
                0 | 1 | 2 => {
                    engine
                        .add_song(id, &format!("Track {id}"), &format!("Artist {id}"), 0, 0)
                        .unwrap();
                    model.add(id);
                    assert_eq!(engine.undo_depth(), undo_before + 1);
                    assert_eq!(engine.redo_depth(), 0);
                }
                3 => {
                    let found = model.contains(id);
                    match engine.remove_song(id) {
                        Ok(()) => {
                            assert!(found);
                            model.remove(id);
                            assert_eq!(engine.undo_depth(), undo_before + 1);
                            assert_eq!(engine.redo_depth(), 0);
                        }
                        Err(_) => {
                            assert!(!found);
                            assert_eq!(engine.undo_depth(), undo_before);
                        }
                    }
                }
                4 => {
                    let forward = rng.gen_bool(0.5);
                    let result = if forward {
                        engine.skip_next()
                    } else {
                        engine.skip_prev()
                    };
                    assert_eq!(result.is_ok(), !engine.queue_is_empty());
                }
                5 => {
                    // Reordering succeeds iff the id is queued alongside
                    // at least one other entry
                    let up = rng.gen_bool(0.5);
                    let result = if up {
                        engine.move_up(id)
                    } else {
                        engine.move_down(id)
                    };
                    let expected = model.contains(id) && model.len >= 2;
                    assert_eq!(result.is_ok(), expected);
                }
                6 => {
                    engine.rotate_queue(rng.gen_bool(0.5));
                    // Rotation records nothing
                    assert_eq!(engine.undo_depth(), undo_before);
                }
                7 => {
                    let likes = rng.gen_range(0..50);
                    let plays = rng.gen_range(0..100);
                    engine.update_priority(id, likes, plays).unwrap();
                    assert_eq!(
                        engine.tracked_priority(id),
                        Some((2 * likes + plays) as f64)
                    );
                }
                8 => {
                    let redo_before = engine.redo_depth();
                    match engine.undo() {
                        Ok(op) => {
                            use playqueue::playback::history::Operation;
                            assert_eq!(engine.undo_depth(), undo_before - 1);
                            assert_eq!(engine.redo_depth(), redo_before + 1);
                            match op {
                                Operation::Add { song_id, .. } => model.remove(song_id),
                                Operation::Remove { song_id, .. } => model.add(song_id),
                                _ => {}
                            }
                        }
                        Err(_) => assert_eq!(undo_before, 0),
                    }
                }
                _ => {
                    match engine.redo() {
                        Ok(op) => {
                            use playqueue::playback::history::Operation;
                            match op {
                                Operation::Add { song_id, .. } => model.add(song_id),
                                Operation::Remove { song_id, .. } => {
                                    if model.contains(song_id) {
                                        model.remove(song_id);
                                    }
                                }
                                _ => {}
                            }
                        }
                        Err(_) => assert_eq!(engine.redo_depth(), 0),
                    }
                }
            }

            assert_engine_coherent(&engine, &model);
        }
    }
}

#[test]
fn full_ring_walk_returns_to_start() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut engine = QueueEngine::with_heap_capacity(64);

    let n = 17i64;
    for id in 0..n {
        engine
            .add_song(id, &format!("Track {id}"), "Artist", 0, 0)
            .unwrap();
    }

    // Wander the cursor, then walk exactly n forward links: the ring
    // must close on the same song
    for _ in 0..rng.gen_range(1..20) {
        engine.skip_next().unwrap();
    }
    let start = engine.current_song().unwrap();
    for _ in 0..n {
        engine.skip_next().unwrap();
    }
    assert_eq!(engine.current_song(), Some(start));

    // And the same backwards
    for _ in 0..n {
        engine.skip_prev().unwrap();
    }
    assert_eq!(engine.current_song(), Some(start));
}

#[test]
fn rotation_preserves_relative_order() {
    let mut engine = QueueEngine::with_heap_capacity(16);
    for id in [1, 2, 3, 4, 5] {
        engine
            .add_song(id, &format!("Track {id}"), "Artist", 0, 0)
            .unwrap();
    }

    let original = engine.queue_snapshot();
    for step in 1..=5usize {
        engine.rotate_queue(true);
        let rotated = engine.queue_snapshot();
        let mut expected = original.clone();
        expected.rotate_left(step % original.len());
        assert_eq!(rotated, expected);
    }
    // Five forward rotations on five entries is a full cycle
    assert_eq!(engine.queue_snapshot(), original);
}
