use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::script::Script;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// No scripts are available yet
    Loading,
    /// Waiting for the transcript of the script at `index`
    Active { index: usize },
    /// Every script has been answered
    Complete,
}

/// Ordered traversal over the prompt scripts for one run
///
/// The cursor only moves forward, one script at a time, and never past
/// the end of the script list.
#[derive(Debug, Clone, Default)]
pub struct Session {
    scripts: Vec<Script>,
    index: usize,
}

impl Session {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self { scripts, index: 0 }
    }

    /// The script awaiting a transcript, or `None` once the session is complete
    pub fn current_script(&self) -> Option<&Script> {
        self.scripts.get(self.index)
    }

    /// Move the cursor to the next script
    pub fn advance(&mut self) {
        if self.is_complete() {
            warn!("Advance requested on a complete session; ignoring");
            return;
        }

        self.index += 1;
        debug!("Session advanced to {}/{}", self.index, self.scripts.len());
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.scripts.len()
    }

    pub fn remaining(&self) -> usize {
        self.scripts.len().saturating_sub(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    /// True when the cursor sits on the final script
    pub fn is_last(&self) -> bool {
        !self.scripts.is_empty() && self.index + 1 == self.scripts.len()
    }

    pub fn state(&self) -> SessionState {
        if self.scripts.is_empty() {
            SessionState::Loading
        } else if self.is_complete() {
            SessionState::Complete
        } else {
            SessionState::Active { index: self.index }
        }
    }
}
