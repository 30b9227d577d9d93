use anyhow::{Context, Result};
use tracing::info;

use super::backend::Exporter;
use super::request::ExportRequest;

/// Opens a pre-filled draft in the default mail client
///
/// `mailto:` links cannot carry attachments, so the body names the
/// dataset path for the user to attach by hand.
#[derive(Debug, Default)]
pub struct MailtoExporter;

impl MailtoExporter {
    pub fn new() -> Self {
        Self
    }

    /// Build the `mailto:` URL for a request
    pub fn mailto_url(request: &ExportRequest) -> String {
        let body = format!(
            "{}\n\nDataset file: {}",
            request.body,
            request.file_path.display()
        );

        format!(
            "mailto:{}?subject={}&body={}",
            request.recipient,
            urlencoding::encode(&request.subject),
            urlencoding::encode(&body)
        )
    }
}

#[async_trait::async_trait]
impl Exporter for MailtoExporter {
    async fn export(&self, request: &ExportRequest) -> Result<()> {
        if !tokio::fs::try_exists(&request.file_path).await? {
            anyhow::bail!("Dataset file not found: {}", request.file_path.display());
        }

        let url = Self::mailto_url(request);
        info!("Opening mail draft to {}", request.recipient);

        tokio::task::spawn_blocking(move || open::that(url))
            .await
            .context("Mail opener task panicked")?
            .context("Failed to open mail client")?;

        Ok(())
    }

    fn name(&self) -> &str {
        "mailto"
    }
}
