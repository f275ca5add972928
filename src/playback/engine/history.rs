//! Undo / redo
//!
//! History replays through the unrecorded primitives in `edits`, so a
//! reversal never pushes a nested record: after `undo`, the undo stack is
//! exactly one shorter and the undone operation sits alone atop the redo
//! stack, ready for `redo` to re-execute verbatim.

use tracing::{debug, warn};

use super::core::QueueEngine;
use crate::error::{Error, Result};
use crate::playback::history::Operation;

impl QueueEngine {
    /// Reverse the most recent recorded operation
    ///
    /// The popped record is echoed onto the redo stack before its reverse
    /// is applied:
    /// - `Add`: the song's first occurrence is unlinked (indices keep it)
    /// - `Remove`: the song is re-appended at the tail; its original
    ///   position is not restored
    /// - `MoveUp` / `MoveDown`: the opposite move
    /// - `Skip` / `UpdatePriority`: no structural reverse
    ///
    /// Returns the undone operation.
    pub fn undo(&mut self) -> Result<Operation> {
        let op = self.undo_stack.pop().ok_or(Error::NothingToUndo)?;
        self.redo_stack.push(op);

        match op {
            Operation::Add { song_id, .. } => {
                if !self.remove_first_unrecorded(song_id) {
                    warn!(song_id, "undo add: song no longer queued");
                }
            }
            Operation::Remove { song_id, .. } => {
                self.insert_end_unrecorded(song_id);
            }
            Operation::MoveUp { song_id } => {
                if !self.move_down_unrecorded(song_id) {
                    warn!(song_id, "undo move up: nothing to reorder");
                }
            }
            Operation::MoveDown { song_id } => {
                if !self.move_up_unrecorded(song_id) {
                    warn!(song_id, "undo move down: nothing to reorder");
                }
            }
            // Cursor motion and priority changes are not reversed
            Operation::Skip { .. } | Operation::UpdatePriority { .. } => {}
        }

        debug!(?op, "engine: undo");
        Ok(op)
    }

    /// Re-execute the most recently undone operation
    ///
    /// Replays the record as originally performed, without re-recording
    /// it; once redone, the record is consumed. Returns the replayed
    /// operation.
    pub fn redo(&mut self) -> Result<Operation> {
        let op = self.redo_stack.pop().ok_or(Error::NothingToRedo)?;

        match op {
            Operation::Add {
                song_id, priority, ..
            } => {
                self.insert_end_unrecorded(song_id);
                self.set_priority_unrecorded(song_id, priority);
            }
            Operation::Remove { song_id, .. } => {
                if !self.remove_first_unrecorded(song_id) {
                    warn!(song_id, "redo remove: song no longer queued");
                }
            }
            Operation::MoveUp { song_id } => {
                if !self.move_up_unrecorded(song_id) {
                    warn!(song_id, "redo move up: nothing to reorder");
                }
            }
            Operation::MoveDown { song_id } => {
                if !self.move_down_unrecorded(song_id) {
                    warn!(song_id, "redo move down: nothing to reorder");
                }
            }
            Operation::Skip { forward, .. } => {
                if !self.skip_unrecorded(forward) {
                    warn!("redo skip: queue empty");
                }
            }
            Operation::UpdatePriority { song_id, priority } => {
                self.set_priority_unrecorded(song_id, priority);
            }
        }

        debug!(?op, "engine: redo");
        Ok(op)
    }
}
