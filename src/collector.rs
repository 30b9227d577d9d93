use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::config::ExportConfig;
use crate::dataset::{DatasetEntry, DatasetRecorder};
use crate::error::{CollectorError, Result};
use crate::export::{ExportRequest, Exporter, NoopExporter, SystemInfo};
use crate::script::Script;
use crate::session::{Session, SessionConfig, SessionState, SessionStats};

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Entry written, more scripts remain
    Saved { entry: DatasetEntry, remaining: usize },
    /// Entry written for the final script
    Completed { entry: DatasetEntry },
    /// Write failed but the session moved on anyway
    SkippedAfterWriteFailure {
        script: Script,
        error: String,
        remaining: usize,
    },
}

impl SubmitOutcome {
    pub fn is_complete(&self) -> bool {
        match self {
            SubmitOutcome::Completed { .. } => true,
            SubmitOutcome::SkippedAfterWriteFailure { remaining, .. } => *remaining == 0,
            SubmitOutcome::Saved { .. } => false,
        }
    }
}

/// Clears the busy flag when a submission finishes or its future is dropped
struct SavingGuard<'a>(&'a AtomicBool);

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Trim a transcript and join its lines with single spaces
fn single_line(transcript: &str) -> String {
    transcript
        .split(&['\r', '\n'][..])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drives a session: each accepted transcript is recorded against the
/// current script and the cursor advances.
pub struct Collector {
    /// Session configuration
    config: SessionConfig,

    /// When the session started
    started_at: DateTime<Utc>,

    /// Scripts and cursor
    session: Mutex<Session>,

    /// Dataset writer
    recorder: DatasetRecorder,

    /// Set while a submission is being processed
    is_saving: AtomicBool,

    /// Number of entries written
    entries_saved: AtomicUsize,

    /// Number of failed dataset writes
    failed_writes: AtomicUsize,

    /// Set once the dataset has been handed to the exporter
    exported: AtomicBool,

    /// Export destination
    exporter: Box<dyn Exporter>,

    /// Recipient and subject for the export message
    export_config: ExportConfig,
}

impl Collector {
    pub fn new(config: SessionConfig, scripts: Vec<Script>, recorder: DatasetRecorder) -> Self {
        info!(
            "Creating collection session {} with {} scripts",
            config.session_id,
            scripts.len()
        );

        Self {
            config,
            started_at: Utc::now(),
            session: Mutex::new(Session::new(scripts)),
            recorder,
            is_saving: AtomicBool::new(false),
            entries_saved: AtomicUsize::new(0),
            failed_writes: AtomicUsize::new(0),
            exported: AtomicBool::new(false),
            exporter: Box::new(NoopExporter),
            export_config: ExportConfig::default(),
        }
    }

    /// Replace the exporter used once the session completes
    pub fn with_exporter(
        mut self,
        exporter: Box<dyn Exporter>,
        export_config: ExportConfig,
    ) -> Self {
        info!("Using {} exporter", exporter.name());
        self.exporter = exporter;
        self.export_config = export_config;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub fn dataset_path(&self) -> &Path {
        self.recorder.path()
    }

    pub fn recorder(&self) -> &DatasetRecorder {
        &self.recorder
    }

    /// Record a transcript for the current script and move to the next one
    ///
    /// Surrounding whitespace is trimmed and embedded line breaks become
    /// spaces, so every entry stays on one dataset line. Overlapping calls
    /// are rejected with [`CollectorError::Busy`].
    pub async fn submit(&self, transcript: &str) -> Result<SubmitOutcome> {
        if self
            .is_saving
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Submission already in progress");
            return Err(CollectorError::Busy);
        }

        let _guard = SavingGuard(&self.is_saving);
        self.submit_inner(transcript).await
    }

    async fn submit_inner(&self, transcript: &str) -> Result<SubmitOutcome> {
        let transcript = single_line(transcript);
        if transcript.is_empty() {
            return Err(CollectorError::EmptyTranscript);
        }

        let mut session = self.session.lock().await;

        let script = match session.state() {
            SessionState::Loading => return Err(CollectorError::NoScripts),
            SessionState::Complete => {
                error!("Attempted to save with no script remaining");
                return Err(CollectorError::SessionComplete);
            }
            SessionState::Active { .. } => match session.current_script() {
                Some(script) => script.clone(),
                None => return Err(CollectorError::SessionComplete),
            },
        };

        let is_last = session.is_last();

        match self.recorder.record(&transcript, script.text()).await {
            Ok(entry) => {
                self.entries_saved.fetch_add(1, Ordering::SeqCst);
                session.advance();

                if is_last {
                    info!("All scripts completed for session {}", self.config.session_id);
                    Ok(SubmitOutcome::Completed { entry })
                } else {
                    Ok(SubmitOutcome::Saved {
                        entry,
                        remaining: session.remaining(),
                    })
                }
            }
            Err(e) => {
                self.failed_writes.fetch_add(1, Ordering::SeqCst);

                if !self.config.advance_on_write_failure {
                    return Err(e);
                }

                warn!("Advancing past script despite write failure: {}", e);
                session.advance();

                Ok(SubmitOutcome::SkippedAfterWriteFailure {
                    script,
                    error: format!("{:#}", anyhow::Error::new(e)),
                    remaining: session.remaining(),
                })
            }
        }
    }

    /// The script awaiting a transcript, with its position
    pub async fn current_script(&self) -> Option<(usize, Script)> {
        let session = self.session.lock().await;
        session
            .current_script()
            .cloned()
            .map(|script| (session.index(), script))
    }

    pub async fn remaining(&self) -> usize {
        self.session.lock().await.remaining()
    }

    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state()
    }

    pub async fn is_complete(&self) -> bool {
        self.session.lock().await.is_complete()
    }

    /// Get current session statistics
    pub async fn stats(&self) -> SessionStats {
        let session = self.session.lock().await;

        SessionStats {
            session_id: self.config.session_id.clone(),
            started_at: self.started_at,
            state: session.state(),
            scripts_total: session.len(),
            answered: session.index(),
            remaining: session.remaining(),
            entries_saved: self.entries_saved.load(Ordering::SeqCst),
            failed_writes: self.failed_writes.load(Ordering::SeqCst),
        }
    }

    pub fn is_exported(&self) -> bool {
        self.exported.load(Ordering::SeqCst)
    }

    /// Hand the finished dataset to the exporter
    ///
    /// Only allowed once the session is complete, and only once per session.
    /// A failed export may be retried.
    pub async fn export(&self) -> Result<ExportRequest> {
        let state = self.state().await;
        if state != SessionState::Complete {
            return Err(CollectorError::NotComplete);
        }

        if self
            .exported
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CollectorError::ExportAlreadyDone);
        }

        let request = ExportRequest::for_dataset(
            self.recorder.path(),
            &self.export_config,
            &SystemInfo::collect(),
        );

        info!(
            "Exporting {} via {}",
            request.file_path.display(),
            self.exporter.name()
        );

        if let Err(e) = self.exporter.export(&request).await {
            error!("Export failed: {:#}", e);
            self.exported.store(false, Ordering::SeqCst);
            return Err(CollectorError::Export(e));
        }

        Ok(request)
    }
}
