//! Popularity index
//!
//! Array-backed binary max-heap of `(song_id, priority)` pairs with
//! in-place priority updates. The heap is an index over distinct song ids,
//! not a queue mirror: each id appears at most once, and queue removals
//! never touch it.
//!
//! **Design:**
//! - Fixed capacity for the heap's lifetime; insertion at capacity fails.
//! - A side map of `song_id -> array position` is kept coherent through
//!   every sift, so updates locate their entry in O(1) and re-heapify in
//!   O(log n).
//! - Sift-up swaps only on strictly greater priority, and sift-down
//!   prefers the left child on ties, so equal-priority entries keep their
//!   arrival order.

use std::collections::HashMap;

use tracing::trace;

use crate::error::{Error, Result};
use crate::playback::types::{Priority, SongId};

/// One tracked song with its ranking score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeapEntry {
    pub song_id: SongId,
    pub priority: Priority,
}

/// Fixed-capacity binary max-heap keyed by priority
#[derive(Debug, Clone)]
pub struct PopularityHeap {
    nodes: Vec<HeapEntry>,
    positions: HashMap<SongId, usize>,
    capacity: usize,
}

impl PopularityHeap {
    /// Create a heap with room for `capacity` distinct song ids
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of tracked song ids
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Fixed capacity set at creation
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check whether a song id is tracked
    pub fn contains(&self, song_id: SongId) -> bool {
        self.positions.contains_key(&song_id)
    }

    /// Current priority of a tracked song id
    pub fn priority_of(&self, song_id: SongId) -> Option<Priority> {
        self.positions
            .get(&song_id)
            .map(|&i| self.nodes[i].priority)
    }

    /// Highest-priority entry without removing it
    pub fn peek(&self) -> Option<HeapEntry> {
        self.nodes.first().copied()
    }

    /// Track a new song id
    ///
    /// Fails when the heap is at capacity. Callers wanting
    /// insert-or-update semantics go through [`update_priority`].
    ///
    /// [`update_priority`]: PopularityHeap::update_priority
    pub fn insert(&mut self, song_id: SongId, priority: Priority) -> Result<()> {
        if self.nodes.len() >= self.capacity {
            return Err(Error::HeapCapacityExhausted {
                capacity: self.capacity,
            });
        }

        let idx = self.nodes.len();
        self.nodes.push(HeapEntry { song_id, priority });
        self.positions.insert(song_id, idx);
        self.sift_up(idx);

        trace!(song_id, priority, "popularity: insert");
        Ok(())
    }

    /// Remove and return the highest-priority entry
    pub fn extract_max(&mut self) -> Option<HeapEntry> {
        if self.nodes.is_empty() {
            return None;
        }

        let last = self.nodes.len() - 1;
        self.swap_entries(0, last);
        let max = self.nodes.pop()?;
        self.positions.remove(&max.song_id);

        if !self.nodes.is_empty() {
            self.sift_down(0);
        }

        Some(max)
    }

    /// Assign a new priority to a song id, inserting it if unseen
    ///
    /// Sifts up when the priority rose, down when it fell; an unchanged
    /// value is a no-op. The only failure is capacity exhaustion on the
    /// insert path.
    pub fn update_priority(&mut self, song_id: SongId, new_priority: Priority) -> Result<()> {
        let idx = match self.positions.get(&song_id) {
            Some(&i) => i,
            None => return self.insert(song_id, new_priority),
        };

        let old_priority = self.nodes[idx].priority;
        self.nodes[idx].priority = new_priority;

        if new_priority > old_priority {
            self.sift_up(idx);
        } else if new_priority < old_priority {
            self.sift_down(idx);
        }

        trace!(song_id, new_priority, "popularity: update");
        Ok(())
    }

    /// Top `limit` entries in descending priority order
    ///
    /// Extraction is destructive, so it runs on a clone; the live index
    /// is untouched. Ties break by array position at extraction time
    /// (left child first).
    pub fn top_n(&self, limit: usize) -> Vec<HeapEntry> {
        let mut scratch = self.clone();
        let mut out = Vec::with_capacity(limit.min(scratch.len()));
        while out.len() < limit {
            match scratch.extract_max() {
                Some(entry) => out.push(entry),
                None => break,
            }
        }
        out
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            // Strict comparison: equal priorities do not swap
            if self.nodes[idx].priority > self.nodes[parent].priority {
                self.swap_entries(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut largest = idx;

            if left < self.nodes.len()
                && self.nodes[left].priority > self.nodes[largest].priority
            {
                largest = left;
            }
            if right < self.nodes.len()
                && self.nodes[right].priority > self.nodes[largest].priority
            {
                largest = right;
            }

            if largest == idx {
                break;
            }
            self.swap_entries(idx, largest);
            idx = largest;
        }
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.nodes.swap(a, b);
        self.positions.insert(self.nodes[a].song_id, a);
        self.positions.insert(self.nodes[b].song_id, b);
    }
}
