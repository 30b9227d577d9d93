use super::state::AppState;
use crate::error::CollectorError;
use crate::script::Script;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitTranscriptRequest {
    /// Free-text response to the current script
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentScriptResponse {
    pub index: usize,
    pub script: Script,
    pub remaining: usize,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub status: String,
    pub recipient: String,
    pub subject: String,
    pub file_path: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: CollectorError) -> Response {
    let status = match &err {
        CollectorError::EmptyTranscript => StatusCode::BAD_REQUEST,
        CollectorError::Busy
        | CollectorError::NoScripts
        | CollectorError::SessionComplete
        | CollectorError::NotComplete
        | CollectorError::ExportAlreadyDone => StatusCode::CONFLICT,
        CollectorError::Write { .. } | CollectorError::Read { .. } | CollectorError::Export(_) => {
            error!("Request failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /session
/// Get statistics for the running session
pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.collector.stats().await;
    (StatusCode::OK, Json(stats))
}

/// GET /session/script
/// Get the script awaiting a transcript
pub async fn get_current_script(State(state): State<AppState>) -> Response {
    let remaining = state.collector.remaining().await;

    match state.collector.current_script().await {
        Some((index, script)) => (
            StatusCode::OK,
            Json(CurrentScriptResponse {
                index,
                script,
                remaining,
            }),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No script awaiting a transcript".to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /session/transcripts
/// Record a transcript for the current script
pub async fn submit_transcript(
    State(state): State<AppState>,
    Json(req): Json<SubmitTranscriptRequest>,
) -> Response {
    match state.collector.submit(&req.transcript).await {
        Ok(outcome) => {
            info!("Transcript accepted (complete={})", outcome.is_complete());
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST /session/export
/// Export the finished dataset (once per session)
pub async fn export_dataset(State(state): State<AppState>) -> Response {
    match state.collector.export().await {
        Ok(request) => (
            StatusCode::OK,
            Json(ExportResponse {
                status: "exported".to_string(),
                recipient: request.recipient,
                subject: request.subject,
                file_path: request.file_path.display().to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /dataset
/// Get every entry recorded so far
pub async fn get_dataset(State(state): State<AppState>) -> Response {
    match state.collector.recorder().entries().await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
