use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::SessionState;

/// Statistics about a collection session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Session identifier
    pub session_id: String,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// Where the session currently is
    pub state: SessionState,

    /// Number of scripts loaded
    pub scripts_total: usize,

    /// Scripts the cursor has moved past
    pub answered: usize,

    /// Scripts still waiting for a transcript
    pub remaining: usize,

    /// Entries successfully appended to the dataset
    pub entries_saved: usize,

    /// Dataset writes that failed
    pub failed_writes: usize,
}
