// Integration tests for the HTTP API
//
// Requests are sent straight to the router with `tower::ServiceExt::oneshot`.

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use susu_collector::script::parse_scripts;
use susu_collector::{create_router, AppState, Collector, DatasetRecorder, SessionConfig};
use tempfile::TempDir;
use tower::ServiceExt;

fn app(dataset: &Path, resource: &str) -> Result<Router> {
    let collector = Collector::new(
        SessionConfig::default(),
        parse_scripts(resource),
        DatasetRecorder::new(dataset)?,
    );
    Ok(create_router(AppState::new(Arc::new(collector))))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    Ok((status, value))
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let app = app(&temp_dir.path().join("dataset.txt"), "a")?;

    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_full_session_over_http() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("dataset.txt");
    let app = app(&path, "Hello there\nHow are you?\n")?;

    let (status, body) = send(&app, "GET", "/session/script", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["index"], 0);
    assert_eq!(body["script"], "Hello there");
    assert_eq!(body["remaining"], 2);

    let (status, body) = send(
        &app,
        "POST",
        "/session/transcripts",
        Some(json!({ "transcript": "Hi" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "saved");
    assert_eq!(body["remaining"], 1);

    let (status, body) = send(
        &app,
        "POST",
        "/session/transcripts",
        Some(json!({ "transcript": "Good" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["entry"]["transcript"], "Good");

    let (status, _) = send(&app, "GET", "/session/script", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/session", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["state"], "complete");
    assert_eq!(body["entries_saved"], 2);

    let (status, body) = send(&app, "GET", "/dataset", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    assert_eq!(
        fs::read_to_string(&path)?,
        "Hi<|>Hello there\nGood<|>How are you?\n"
    );

    Ok(())
}

#[tokio::test]
async fn test_empty_transcript_is_bad_request() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let app = app(&temp_dir.path().join("dataset.txt"), "a")?;

    let (status, body) = send(
        &app,
        "POST",
        "/session/transcripts",
        Some(json!({ "transcript": "   " })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "transcript is empty");

    Ok(())
}

#[tokio::test]
async fn test_write_failure_is_server_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("dataset.txt");
    fs::create_dir(&path)?;
    let app = app(&path, "a")?;

    let (status, _) = send(
        &app,
        "POST",
        "/session/transcripts",
        Some(json!({ "transcript": "answer" })),
    )
    .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, body) = send(&app, "GET", "/session", None).await?;
    assert_eq!(body["remaining"], 1);
    assert_eq!(body["failed_writes"], 1);

    Ok(())
}

#[tokio::test]
async fn test_export_before_and_after_completion() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let app = app(&temp_dir.path().join("dataset.txt"), "a")?;

    let (status, _) = send(&app, "POST", "/session/export", None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    send(
        &app,
        "POST",
        "/session/transcripts",
        Some(json!({ "transcript": "answer" })),
    )
    .await?;

    let (status, body) = send(&app, "POST", "/session/export", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "exported");

    let (status, _) = send(&app, "POST", "/session/export", None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn test_session_without_scripts() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let app = app(&temp_dir.path().join("dataset.txt"), "")?;

    let (_, body) = send(&app, "GET", "/session", None).await?;
    assert_eq!(body["state"]["state"], "loading");

    let (status, _) = send(
        &app,
        "POST",
        "/session/transcripts",
        Some(json!({ "transcript": "answer" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn test_multiline_transcript_keeps_dataset_line_per_entry() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("dataset.txt");
    let app = app(&path, "Hello there\nHow are you?\n")?;

    let (status, body) = send(
        &app,
        "POST",
        "/session/transcripts",
        Some(json!({ "transcript": "line one\nline two" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["transcript"], "line one line two");

    let (_, body) = send(&app, "GET", "/dataset", None).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["transcript"], "line one line two");

    assert_eq!(
        fs::read_to_string(&path)?,
        "line one line two<|>Hello there\n"
    );

    Ok(())
}
