use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use super::backend::Exporter;
use super::request::ExportRequest;

/// Stages each export as a directory holding the dataset and its message
///
/// Layout: `<outbox>/submission-<timestamp>/{<dataset file>, message.txt}`
#[derive(Debug, Clone)]
pub struct OutboxExporter {
    outbox_dir: PathBuf,
}

impl OutboxExporter {
    pub fn new(outbox_dir: impl Into<PathBuf>) -> Self {
        Self {
            outbox_dir: outbox_dir.into(),
        }
    }

    pub fn outbox_dir(&self) -> &Path {
        &self.outbox_dir
    }

    /// Write the bundle and return its directory
    pub async fn stage(&self, request: &ExportRequest) -> Result<PathBuf> {
        if !fs::try_exists(&request.file_path).await? {
            anyhow::bail!("Dataset file not found: {}", request.file_path.display());
        }

        let bundle_dir = self
            .outbox_dir
            .join(format!("submission-{}", Utc::now().format("%Y%m%d-%H%M%S%.3f")));

        fs::create_dir_all(&bundle_dir)
            .await
            .context("Failed to create outbox directory")?;

        let file_name = request
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "dataset.txt".into());
        let attachment = bundle_dir.join(&file_name);

        fs::copy(&request.file_path, &attachment)
            .await
            .context("Failed to copy dataset into outbox")?;

        let message = format!(
            "To: {}\nSubject: {}\nAttachment: {}\n\n{}\n",
            request.recipient,
            request.subject,
            Path::new(&file_name).display(),
            request.body
        );

        fs::write(bundle_dir.join("message.txt"), message)
            .await
            .context("Failed to write outbox message")?;

        info!("Export staged at {}", bundle_dir.display());

        Ok(bundle_dir)
    }
}

#[async_trait::async_trait]
impl Exporter for OutboxExporter {
    async fn export(&self, request: &ExportRequest) -> Result<()> {
        self.stage(request).await.map(|_| ())
    }

    fn name(&self) -> &str {
        "outbox"
    }
}
