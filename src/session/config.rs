use serde::{Deserialize, Serialize};

/// Configuration for a collection session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "session-6f1c...")
    pub session_id: String,

    /// Advance past a script even when its dataset write failed.
    /// Default: false (a failed write keeps the cursor in place)
    pub advance_on_write_failure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            advance_on_write_failure: false,
        }
    }
}
