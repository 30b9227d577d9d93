use std::path::PathBuf;
use thiserror::Error;

/// Reasons a submission or export can be refused
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("transcript is empty")]
    EmptyTranscript,

    #[error("a submission is already in progress")]
    Busy,

    #[error("no scripts loaded")]
    NoScripts,

    #[error("all scripts have been completed")]
    SessionComplete,

    #[error("session is not complete yet")]
    NotComplete,

    #[error("dataset has already been exported")]
    ExportAlreadyDone,

    #[error("failed to write dataset {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read dataset {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("export failed: {0:#}")]
    Export(anyhow::Error),
}

pub type Result<T, E = CollectorError> = std::result::Result<T, E>;
