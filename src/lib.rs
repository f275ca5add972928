//! # playqueue
//!
//! In-memory music queue engine.
//!
//! **Purpose:** Maintain a user's active playback queue together with the
//! auxiliary indices that drive recommendations, prefix search, and
//! reversible editing. The engine owns no I/O, no database, and no network
//! surface; callers feed it pre-validated primitive inputs and receive
//! primitive views back.
//!
//! **Architecture:** Five composable structures (circular playback queue,
//! popularity max-heap, title/artist search tries, undo/redo stacks, and a
//! prefetch FIFO) coordinated by a single mutating facade,
//! [`QueueEngine`](playback::engine::QueueEngine).
//!
//! The engine is synchronous and single-threaded; an embedding
//! application serializes access across the span of each public call.

pub mod config;
pub mod error;
pub mod playback;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use playback::engine::QueueEngine;
