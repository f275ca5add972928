//! Read-only views
//!
//! Queries consult exactly one substructure each and return primitive
//! views; none of them records history or mutates engine state. The
//! recommendation reads run against a clone of the popularity index, so
//! repeated calls always observe the same live state.

use super::core::QueueEngine;
use crate::playback::types::{QueueSlotView, Recommendation, SongId};

impl QueueEngine {
    /// Song ids in play order, starting at the queue head
    pub fn queue_snapshot(&self) -> Vec<SongId> {
        self.queue.snapshot()
    }

    /// Queue rows with position and cursor marker, for display surfaces
    pub fn queue_view(&self) -> Vec<QueueSlotView> {
        let mut rows = Vec::with_capacity(self.queue.len());
        self.queue.for_each_slot(|position, song_id, is_current| {
            rows.push(QueueSlotView {
                position,
                song_id,
                is_current,
            });
        });
        rows
    }

    /// Up to `limit` song ids in descending priority order
    ///
    /// Ties break by popularity-index array position at extraction time.
    pub fn recommendations(&self, limit: usize) -> Vec<SongId> {
        self.popularity
            .top_n(limit)
            .into_iter()
            .map(|e| e.song_id)
            .collect()
    }

    /// Up to `limit` recommendations with the priorities that ranked them
    pub fn top_songs(&self, limit: usize) -> Vec<Recommendation> {
        self.popularity
            .top_n(limit)
            .into_iter()
            .map(|e| Recommendation {
                song_id: e.song_id,
                priority: e.priority,
            })
            .collect()
    }

    /// Song ids whose indexed title equals the folded prefix exactly
    pub fn search_songs(&self, prefix: &str) -> Vec<SongId> {
        self.titles.search_prefix(prefix)
    }

    /// Song ids whose indexed artist equals the folded prefix exactly
    pub fn search_artists(&self, prefix: &str) -> Vec<SongId> {
        self.artists.search_prefix(prefix)
    }

    /// Song ids whose indexed title starts with the folded prefix,
    /// longer titles included
    pub fn search_songs_deep(&self, prefix: &str) -> Vec<SongId> {
        self.titles.collect_prefix(prefix)
    }

    /// Song ids whose indexed artist starts with the folded prefix,
    /// longer names included
    pub fn search_artists_deep(&self, prefix: &str) -> Vec<SongId> {
        self.artists.collect_prefix(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_and_view_agree() {
        let mut engine = QueueEngine::with_heap_capacity(16);
        for id in [1, 2, 3] {
            engine.add_song(id, "T", "A", 0, 0).unwrap();
        }
        engine.skip_next().unwrap();

        assert_eq!(engine.queue_snapshot(), vec![1, 2, 3]);
        let view = engine.queue_view();
        assert_eq!(view.len(), 3);
        assert_eq!(
            view.iter().map(|r| r.song_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            view.iter().map(|r| r.is_current).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert_eq!(
            view.iter().map(|r| r.position).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_recommendations_descending() {
        let mut engine = QueueEngine::with_heap_capacity(16);
        engine.update_priority(10, 3, 4).unwrap(); // 10
        engine.update_priority(11, 1, 2).unwrap(); // 4
        engine.update_priority(12, 10, 0).unwrap(); // 20

        assert_eq!(engine.recommendations(3), vec![12, 10, 11]);

        let top = engine.top_songs(2);
        assert_eq!(top[0].song_id, 12);
        assert_eq!(top[0].priority, 20.0);
        assert_eq!(top[1].song_id, 10);
    }

    #[test]
    fn test_recommendations_leave_index_intact() {
        let mut engine = QueueEngine::with_heap_capacity(16);
        engine.update_priority(1, 1, 0).unwrap();
        engine.update_priority(2, 2, 0).unwrap();

        for _ in 0..5 {
            assert_eq!(engine.recommendations(10), vec![2, 1]);
        }
        assert_eq!(engine.heap_len(), 2);
    }

    #[test]
    fn test_searches_consult_their_own_trie() {
        let mut engine = QueueEngine::with_heap_capacity(16);
        engine.add_song(1, "Hello", "World", 0, 0).unwrap();

        assert_eq!(engine.search_songs("hello"), vec![1]);
        assert_eq!(engine.search_songs("world"), Vec::<SongId>::new());
        assert_eq!(engine.search_artists("world"), vec![1]);
        assert_eq!(engine.search_artists("hello"), Vec::<SongId>::new());
    }

    #[test]
    fn test_queries_record_no_history() {
        let mut engine = QueueEngine::with_heap_capacity(16);
        engine.add_song(1, "T", "A", 0, 0).unwrap();
        let depth = engine.undo_depth();

        engine.queue_snapshot();
        engine.queue_view();
        engine.recommendations(5);
        engine.search_songs("t");
        engine.search_artists("a");

        assert_eq!(engine.undo_depth(), depth);
        assert_eq!(engine.redo_depth(), 0);
    }
}
