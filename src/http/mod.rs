//! HTTP API for driving a collection session from an external UI
//!
//! This module provides a small REST API:
//! - GET /session - Session statistics
//! - GET /session/script - Script awaiting a transcript
//! - POST /session/transcripts - Submit a transcript for the current script
//! - POST /session/export - Export the finished dataset
//! - GET /dataset - Entries recorded so far
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
