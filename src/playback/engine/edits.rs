//! Structural mutations
//!
//! Each public edit touches every structure it concerns, then commits one
//! operation record to history. A failed precondition returns before any
//! structure is touched, so the engine never holds a partial edit.
//!
//! The `*_unrecorded` primitives apply the same structural changes
//! without touching history; undo and redo are built on them so that
//! reversals never double-count.

use tracing::{debug, warn};

use super::core::QueueEngine;
use crate::error::{Error, Result};
use crate::playback::history::Operation;
use crate::playback::types::{compute_priority, Priority, SongId};

impl QueueEngine {
    /// Add a song to the playback queue and every index
    ///
    /// Appends to the queue tail, indexes the title and artist for prefix
    /// search, and ranks the song in the popularity index at
    /// `2·likes + play_count`. Duplicate song ids are allowed in the
    /// queue; the popularity index keeps one entry per id and is updated
    /// in place.
    ///
    /// A popularity index at capacity does not fail the add: the song is
    /// queued and searchable, just unranked.
    pub fn add_song(
        &mut self,
        song_id: SongId,
        title: &str,
        artist: &str,
        likes: i64,
        play_count: i64,
    ) -> Result<()> {
        self.queue.insert_end(song_id);
        let position = self.queue.len() - 1;

        self.titles.insert(title, song_id);
        self.artists.insert(artist, song_id);

        let priority = compute_priority(likes, play_count);
        if let Err(err) = self.popularity.update_priority(song_id, priority) {
            warn!(song_id, %err, "song queued but not ranked");
        }

        self.record(Operation::Add {
            song_id,
            position,
            priority,
        });
        debug!(song_id, position, "engine: add song");
        Ok(())
    }

    /// Remove the first queue entry carrying the given song id
    ///
    /// The search tries and the popularity index are left alone: both are
    /// historical indices that outlive queue membership.
    pub fn remove_song(&mut self, song_id: SongId) -> Result<()> {
        let node = self
            .queue
            .find_by_id(song_id)
            .ok_or(Error::SongNotFound(song_id))?;
        let position = self.queue.position_of(node).unwrap_or(0);

        self.queue.remove(node);
        self.record(Operation::Remove { song_id, position });
        debug!(song_id, position, "engine: remove song");
        Ok(())
    }

    /// Advance the cursor to the next song
    ///
    /// Returns the new current song. Fails only on an empty queue; on a
    /// singleton queue the cursor wraps onto itself.
    pub fn skip_next(&mut self) -> Result<SongId> {
        self.skip(true)
    }

    /// Retreat the cursor to the previous song
    pub fn skip_prev(&mut self) -> Result<SongId> {
        self.skip(false)
    }

    fn skip(&mut self, forward: bool) -> Result<SongId> {
        let (previous, new) = self
            .queue
            .advance_cursor(forward)
            .ok_or(Error::EmptyQueue)?;
        self.record(Operation::Skip { previous, forward });
        Ok(new)
    }

    /// Swap the first entry carrying `song_id` with its predecessor
    pub fn move_up(&mut self, song_id: SongId) -> Result<()> {
        let node = self
            .queue
            .find_by_id(song_id)
            .ok_or(Error::SongNotFound(song_id))?;
        if !self.queue.move_up(node) {
            return Err(Error::QueueTooSmall);
        }
        self.record(Operation::MoveUp { song_id });
        Ok(())
    }

    /// Swap the first entry carrying `song_id` with its successor
    pub fn move_down(&mut self, song_id: SongId) -> Result<()> {
        let node = self
            .queue
            .find_by_id(song_id)
            .ok_or(Error::SongNotFound(song_id))?;
        if !self.queue.move_down(node) {
            return Err(Error::QueueTooSmall);
        }
        self.record(Operation::MoveDown { song_id });
        Ok(())
    }

    /// Rotate the queue window by one entry
    ///
    /// The ring and the cursor are unchanged; only which entry counts as
    /// head shifts. Rotation is not recorded for undo.
    pub fn rotate_queue(&mut self, forward: bool) {
        self.queue.rotate(forward);
    }

    /// Re-rank a song in the popularity index from fresh counters
    ///
    /// Computes `2·likes + play_count` and updates in place, inserting
    /// the id if it was never ranked. Fails when the index is at capacity
    /// and the id is new; nothing is recorded in that case.
    pub fn update_priority(
        &mut self,
        song_id: SongId,
        likes: i64,
        play_count: i64,
    ) -> Result<()> {
        let priority = compute_priority(likes, play_count);
        self.popularity.update_priority(song_id, priority)?;
        self.record(Operation::UpdatePriority { song_id, priority });
        debug!(song_id, priority, "engine: update priority");
        Ok(())
    }

    // ========== Unrecorded primitives (history replay) ==========

    /// Unlink the first occurrence of a song without recording history
    ///
    /// Returns false when no entry carries the id (already gone).
    pub(super) fn remove_first_unrecorded(&mut self, song_id: SongId) -> bool {
        match self.queue.find_by_id(song_id) {
            Some(node) => {
                self.queue.remove(node);
                true
            }
            None => false,
        }
    }

    /// Re-append a song at the tail without recording history
    pub(super) fn insert_end_unrecorded(&mut self, song_id: SongId) {
        self.queue.insert_end(song_id);
    }

    /// Swap a song with its predecessor without recording history
    pub(super) fn move_up_unrecorded(&mut self, song_id: SongId) -> bool {
        match self.queue.find_by_id(song_id) {
            Some(node) => self.queue.move_up(node),
            None => false,
        }
    }

    /// Swap a song with its successor without recording history
    pub(super) fn move_down_unrecorded(&mut self, song_id: SongId) -> bool {
        match self.queue.find_by_id(song_id) {
            Some(node) => self.queue.move_down(node),
            None => false,
        }
    }

    /// Move the cursor without recording history
    pub(super) fn skip_unrecorded(&mut self, forward: bool) -> bool {
        self.queue.advance_cursor(forward).is_some()
    }

    /// Apply a priority without recording history
    ///
    /// Capacity exhaustion is tolerated here: replaying history must not
    /// fail the replay itself.
    pub(super) fn set_priority_unrecorded(&mut self, song_id: SongId, priority: Priority) {
        if let Err(err) = self.popularity.update_priority(song_id, priority) {
            warn!(song_id, %err, "priority replay dropped");
        }
    }
}
