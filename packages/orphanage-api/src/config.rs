//! API configuration.

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Largest accepted JSON request body in bytes
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 100 * 1024, // 100 KiB
        }
    }
}
