//! Engine composition and lifecycle

use crate::config::EngineConfig;
use crate::playback::heap::PopularityHeap;
use crate::playback::history::{Operation, OperationStack};
use crate::playback::queue::PlaybackQueue;
use crate::playback::trie::SearchTrie;
use crate::playback::types::{Priority, SongId};
use crate::playback::upcoming::UpcomingBuffer;

/// Facade over the queue engine's composite state
///
/// Owns exactly one playback queue, one popularity index, two search
/// tries (titles, artists), two operation stacks (undo, redo), and one
/// prefetch buffer. Nothing inside is shared with the outside world;
/// dropping the engine tears everything down.
///
/// The engine has no state beyond its owned substructures, is fully
/// synchronous, and presumes exclusive access for the span of each call.
pub struct QueueEngine {
    pub(super) queue: PlaybackQueue,
    pub(super) popularity: PopularityHeap,
    pub(super) titles: SearchTrie,
    pub(super) artists: SearchTrie,
    pub(super) undo_stack: OperationStack,
    pub(super) redo_stack: OperationStack,
    pub(super) upcoming: UpcomingBuffer,
}

impl QueueEngine {
    /// Create an engine from configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            queue: PlaybackQueue::new(),
            popularity: PopularityHeap::new(config.heap_capacity),
            titles: SearchTrie::new(),
            artists: SearchTrie::new(),
            undo_stack: OperationStack::new(),
            redo_stack: OperationStack::new(),
            upcoming: UpcomingBuffer::new(),
        }
    }

    /// Create an engine tracking at most `heap_capacity` distinct song
    /// ids in its popularity index
    pub fn with_heap_capacity(heap_capacity: usize) -> Self {
        Self::new(EngineConfig { heap_capacity })
    }

    /// Song under the "now playing" cursor, None when the queue is empty
    pub fn current_song(&self) -> Option<SongId> {
        self.queue.current_song()
    }

    /// Number of entries in the playback queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Check if the playback queue is empty
    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Check whether any queue entry carries the given song id
    pub fn contains_song(&self, song_id: SongId) -> bool {
        self.queue.find_by_id(song_id).is_some()
    }

    /// Number of song ids tracked by the popularity index
    pub fn heap_len(&self) -> usize {
        self.popularity.len()
    }

    /// Priority currently ranked for a song id, if tracked
    pub fn tracked_priority(&self, song_id: SongId) -> Option<Priority> {
        self.popularity.priority_of(song_id)
    }

    /// Number of operations available to undo
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of operations available to redo
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Append a prefetch hint
    pub fn upcoming_push(&mut self, song_id: SongId) {
        self.upcoming.enqueue(song_id);
    }

    /// Consume the oldest prefetch hint
    pub fn upcoming_pop(&mut self) -> Option<SongId> {
        self.upcoming.dequeue()
    }

    /// Oldest prefetch hint without consuming it
    pub fn upcoming_peek(&self) -> Option<SongId> {
        self.upcoming.peek()
    }

    /// Number of pending prefetch hints
    pub fn upcoming_len(&self) -> usize {
        self.upcoming.len()
    }

    /// Drop all pending prefetch hints
    pub fn upcoming_clear(&mut self) {
        self.upcoming.clear();
    }

    /// Commit an operation to history: push onto the undo stack and
    /// invalidate everything redoable
    pub(super) fn record(&mut self, op: Operation) {
        self.undo_stack.push(op);
        self.redo_stack.clear();
    }
}

impl Default for QueueEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
