//! Circular playback queue
//!
//! An ordered, circular sequence of queue entries with a "now playing"
//! cursor. Entries link to their circular neighbors in both directions, so
//! skipping, reordering, and rotation are all O(1) once an entry is in
//! hand.
//!
//! **Design:**
//! - Entries live in a slot arena (`Vec` plus a free list); the arena owns
//!   every node, and `next`/`prev` are navigational slot indices, never
//!   owning references. There is no cyclic ownership to tear down.
//! - [`NodeId`] handles are positional: they are produced by a lookup and
//!   consumed within the same engine call, before any other mutation can
//!   recycle the slot.
//! - `head`, `tail`, and `current` are slot indices with `NIL` standing in
//!   for "empty". `tail` is always `head`'s circular predecessor.

use tracing::debug;

use crate::playback::types::SongId;

/// Sentinel slot index for unset links
const NIL: usize = usize::MAX;

/// Opaque handle to a queue entry
///
/// Valid until the entry it names is removed. Handles are engine-internal
/// currency; the public surface exposes song ids and positions only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
struct Slot {
    song_id: SongId,
    next: usize,
    prev: usize,
    occupied: bool,
}

/// Circular doubly-linked playback queue with a cursor
#[derive(Debug, Clone)]
pub struct PlaybackQueue {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    current: usize,
    len: usize,
}

impl PlaybackQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            current: NIL,
            len: 0,
        }
    }

    /// Number of entries in the queue
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Song id carried by an entry
    pub fn song_of(&self, node: NodeId) -> SongId {
        debug_assert!(self.slots[node.0].occupied, "stale queue handle");
        self.slots[node.0].song_id
    }

    /// Entry under the "now playing" cursor
    pub fn current_node(&self) -> Option<NodeId> {
        (self.current != NIL).then(|| NodeId(self.current))
    }

    /// Song under the "now playing" cursor
    pub fn current_song(&self) -> Option<SongId> {
        self.current_node().map(|n| self.song_of(n))
    }

    /// Circular successor of an entry
    ///
    /// Stable even for a singleton queue, where an entry is its own
    /// neighbor in both directions.
    pub fn next_of(&self, node: NodeId) -> NodeId {
        NodeId(self.slots[node.0].next)
    }

    /// Circular predecessor of an entry
    pub fn prev_of(&self, node: NodeId) -> NodeId {
        NodeId(self.slots[node.0].prev)
    }

    /// Append a song after the tail
    ///
    /// The first entry of an empty queue becomes head, tail, and current
    /// simultaneously, linked to itself in both directions.
    pub fn insert_end(&mut self, song_id: SongId) -> NodeId {
        let idx = self.alloc(song_id);

        if self.head == NIL {
            self.slots[idx].next = idx;
            self.slots[idx].prev = idx;
            self.head = idx;
            self.tail = idx;
            self.current = idx;
        } else {
            let head = self.head;
            let tail = self.tail;
            self.slots[idx].prev = tail;
            self.slots[idx].next = head;
            self.slots[tail].next = idx;
            self.slots[head].prev = idx;
            self.tail = idx;
        }

        self.len += 1;
        debug!(song_id, "queue: enqueue");
        NodeId(idx)
    }

    /// Unlink an entry and return its song id
    ///
    /// Head, tail, and cursor are re-aimed when they pointed at the
    /// removed entry: head and cursor advance to the successor, tail
    /// retreats to the predecessor. Removing the final entry leaves all
    /// three unset.
    pub fn remove(&mut self, node: NodeId) -> SongId {
        let idx = node.0;
        debug_assert!(self.slots[idx].occupied, "stale queue handle");
        let song_id = self.slots[idx].song_id;

        if self.len == 1 {
            self.head = NIL;
            self.tail = NIL;
            self.current = NIL;
        } else {
            let prev = self.slots[idx].prev;
            let next = self.slots[idx].next;
            self.slots[prev].next = next;
            self.slots[next].prev = prev;

            if self.head == idx {
                self.head = next;
            }
            if self.tail == idx {
                self.tail = prev;
            }
            if self.current == idx {
                self.current = next;
            }
        }

        self.release(idx);
        self.len -= 1;
        debug!(song_id, "queue: remove");
        song_id
    }

    /// Swap an entry with its circular predecessor by re-linking
    ///
    /// Returns false (no re-link) when the queue holds fewer than two
    /// entries. On a two-entry ring the physical links are already
    /// symmetric, so the swap degenerates to exchanging the head and tail
    /// labels.
    pub fn move_up(&mut self, node: NodeId) -> bool {
        if self.len < 2 {
            return false;
        }

        let n = node.0;

        if self.len == 2 {
            std::mem::swap(&mut self.head, &mut self.tail);
            debug!(song_id = self.slots[n].song_id, "queue: move up");
            return true;
        }

        let p = self.slots[n].prev;
        let pp = self.slots[p].prev;
        let nn = self.slots[n].next;

        // Re-link so the ring reads pp -> n -> p -> nn
        self.slots[pp].next = n;
        self.slots[n].prev = pp;
        self.slots[n].next = p;
        self.slots[p].prev = n;
        self.slots[p].next = nn;
        self.slots[nn].prev = p;

        if self.head == p {
            self.head = n;
        } else if self.head == n {
            self.head = p;
        }
        if self.tail == n {
            self.tail = p;
        } else if self.tail == p {
            self.tail = n;
        }

        debug!(song_id = self.slots[n].song_id, "queue: move up");
        true
    }

    /// Swap an entry with its circular successor
    ///
    /// Defined as moving the successor up. Because the ring is circular,
    /// moving the tail down relocates it before the head.
    pub fn move_down(&mut self, node: NodeId) -> bool {
        if self.len < 2 {
            return false;
        }
        let next = self.next_of(node);
        debug!(song_id = self.slots[node.0].song_id, "queue: move down");
        self.move_up(next)
    }

    /// Rotate the window onto the ring by one entry
    ///
    /// Head and tail advance (forward) or retreat together; the physical
    /// ring and the cursor are untouched. No-op for fewer than two
    /// entries.
    pub fn rotate(&mut self, forward: bool) {
        if self.len < 2 {
            return;
        }

        if forward {
            self.head = self.slots[self.head].next;
            self.tail = self.slots[self.tail].next;
        } else {
            self.head = self.slots[self.head].prev;
            self.tail = self.slots[self.tail].prev;
        }
        debug!(forward, "queue: rotate");
    }

    /// Advance or retreat the cursor by one entry
    ///
    /// Returns `(previous, new)` song ids, or None on an empty queue.
    pub fn advance_cursor(&mut self, forward: bool) -> Option<(SongId, SongId)> {
        if self.current == NIL {
            return None;
        }

        let old = self.slots[self.current].song_id;
        self.current = if forward {
            self.slots[self.current].next
        } else {
            self.slots[self.current].prev
        };
        let new = self.slots[self.current].song_id;

        debug!(from = old, to = new, forward, "queue: skip");
        Some((old, new))
    }

    /// First entry carrying the given song id, in traversal order from
    /// the head
    ///
    /// O(n) linear scan. Duplicates are not disambiguated; callers get
    /// the first match.
    pub fn find_by_id(&self, song_id: SongId) -> Option<NodeId> {
        let mut idx = self.head;
        for _ in 0..self.len {
            if self.slots[idx].song_id == song_id {
                return Some(NodeId(idx));
            }
            idx = self.slots[idx].next;
        }
        None
    }

    /// 0-based position of an entry in play order
    pub fn position_of(&self, node: NodeId) -> Option<usize> {
        let mut idx = self.head;
        for pos in 0..self.len {
            if idx == node.0 {
                return Some(pos);
            }
            idx = self.slots[idx].next;
        }
        None
    }

    /// Song ids in play order, starting at the head
    ///
    /// Iterates exactly `len` links; the ring has no terminator.
    pub fn snapshot(&self) -> Vec<SongId> {
        let mut out = Vec::with_capacity(self.len);
        let mut idx = self.head;
        for _ in 0..self.len {
            out.push(self.slots[idx].song_id);
            idx = self.slots[idx].next;
        }
        out
    }

    /// Visit `(position, song_id, is_current)` for every entry in play
    /// order
    pub fn for_each_slot(&self, mut f: impl FnMut(usize, SongId, bool)) {
        let mut idx = self.head;
        for pos in 0..self.len {
            f(pos, self.slots[idx].song_id, idx == self.current);
            idx = self.slots[idx].next;
        }
    }

    fn alloc(&mut self, song_id: SongId) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Slot {
                    song_id,
                    next: NIL,
                    prev: NIL,
                    occupied: true,
                };
                idx
            }
            None => {
                self.slots.push(Slot {
                    song_id,
                    next: NIL,
                    prev: NIL,
                    occupied: true,
                });
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) {
        self.slots[idx].occupied = false;
        self.free.push(idx);
    }
}

impl Default for PlaybackQueue {
    fn default() -> Self {
        Self::new()
    }
}
