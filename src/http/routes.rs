use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session progress
        .route("/session", get(handlers::get_session))
        .route("/session/script", get(handlers::get_current_script))
        .route("/session/transcripts", post(handlers::submit_transcript))
        .route("/session/export", post(handlers::export_dataset))
        // Recorded data
        .route("/dataset", get(handlers::get_dataset))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
