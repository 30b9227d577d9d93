use anyhow::Context;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::entry::DatasetEntry;
use crate::error::{CollectorError, Result};

/// Append-only dataset writer
///
/// Each recorded entry becomes one `transcript<|>script` line. The file is
/// created on first write and never rewritten afterwards. Appends go through
/// a single-writer lock so concurrent callers cannot interleave bytes.
#[derive(Debug)]
pub struct DatasetRecorder {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DatasetRecorder {
    /// Create a recorder for `path`, creating its parent directory if needed
    pub fn new(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create dataset directory {}", parent.display())
            })?;
        }

        info!("Dataset recorder initialized: {}", path.display());

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry to the dataset file
    pub async fn record(&self, transcript: &str, script: &str) -> Result<DatasetEntry> {
        let entry = DatasetEntry::new(transcript, script);
        let line = entry.to_line();

        let _guard = self.write_lock.lock().await;

        if let Err(source) = self.append(line.as_bytes()).await {
            error!("Error saving dataset to {}: {}", self.path.display(), source);
            return Err(CollectorError::Write {
                path: self.path.clone(),
                source,
            });
        }

        info!("Recorded dataset entry for script: {}", script);

        Ok(entry)
    }

    async fn append(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(bytes).await?;
        file.flush().await?;

        Ok(())
    }

    /// Read every entry back, in file order
    ///
    /// A missing file has no entries. Lines without a delimiter are skipped.
    pub async fn entries(&self) -> Result<Vec<DatasetEntry>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(CollectorError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let entries = contents
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let entry = DatasetEntry::parse(line);
                if entry.is_none() {
                    warn!("Skipping malformed dataset line {}", i + 1);
                }
                entry
            })
            .collect();

        Ok(entries)
    }
}
