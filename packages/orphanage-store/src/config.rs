//! Store configuration.

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of pending requests queued for the store worker
    pub queue_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1000,
        }
    }
}
