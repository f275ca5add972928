//! Shared primitive types and external view types
//!
//! View types are what the engine hands back to embedding adapters (HTTP,
//! application shell); they derive serde so the adapter can marshal them
//! directly.

use serde::{Deserialize, Serialize};

/// Song identifier assigned by the external catalog.
///
/// Not unique across queue entries: the same song may be queued twice.
pub type SongId = i64;

/// Derived popularity score; larger is more prominent.
///
/// The engine computes it from likes and play counts, the popularity index
/// treats it as opaque. Must be finite; NaN is the caller's responsibility
/// to avoid.
pub type Priority = f64;

/// Compute a song's popularity score from its counters.
///
/// Likes weigh double relative to plays.
pub fn compute_priority(likes: i64, play_count: i64) -> Priority {
    (2 * likes + play_count) as Priority
}

/// One row of the queue view: position in play order plus cursor marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSlotView {
    /// 0-based position in play order, starting at the queue head
    pub position: usize,

    /// Song occupying this slot
    pub song_id: SongId,

    /// True for the slot under the "now playing" cursor
    pub is_current: bool,
}

/// One recommendation: a song id with the priority that ranked it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub song_id: SongId,
    pub priority: Priority,
}
