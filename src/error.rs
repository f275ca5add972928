//! Error types for the queue engine
//!
//! Defines engine-specific error types using thiserror for clear error
//! propagation. Every failure is locally recovered: the failing operation
//! leaves the engine in its previous state.

use thiserror::Error;

use crate::playback::types::SongId;

/// Convenience Result type using the engine Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the queue engine
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Operation requires a non-empty playback queue
    #[error("playback queue is empty")]
    EmptyQueue,

    /// No queue entry carries the requested song id
    #[error("song {0} not found in queue")]
    SongNotFound(SongId),

    /// Popularity index is at fixed capacity; new ids cannot be tracked
    #[error("popularity index full: capacity {capacity} reached")]
    HeapCapacityExhausted { capacity: usize },

    /// Reordering needs at least two queue entries
    #[error("queue has fewer than two entries; nothing to reorder")]
    QueueTooSmall,

    /// Undo history is empty
    #[error("nothing to undo")]
    NothingToUndo,

    /// Redo history is empty
    #[error("nothing to redo")]
    NothingToRedo,
}
