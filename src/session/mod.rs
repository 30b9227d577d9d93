//! Collection session management
//!
//! This module provides the `Session` value that tracks:
//! - The ordered prompt scripts for one run
//! - The cursor pointing at the next unanswered script
//! - Session statistics reported to presentation layers

mod config;
mod session;
mod stats;

pub use config::SessionConfig;
pub use session::{Session, SessionState};
pub use stats::SessionStats;
