//! Engine configuration

/// Default number of distinct song ids tracked by the popularity index
pub const DEFAULT_HEAP_CAPACITY: usize = 128;

/// Queue engine configuration
///
/// The popularity index has fixed capacity for the engine's lifetime;
/// once `heap_capacity` distinct song ids are tracked, further ids are
/// rejected until the index drains.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub heap_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            heap_capacity: DEFAULT_HEAP_CAPACITY,
        }
    }
}
