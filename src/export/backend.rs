use anyhow::Result;
use tracing::info;

use super::mailto::MailtoExporter;
use super::outbox::OutboxExporter;
use super::request::ExportRequest;
use crate::config::{ExportConfig, ExportMethod};

/// Hands a finished dataset to something outside the collector
///
/// Implementations:
/// - Outbox: stage dataset and message in a local directory
/// - Mailto: open a pre-filled draft in the platform mail client
/// - Noop: log only (export disabled)
#[async_trait::async_trait]
pub trait Exporter: Send + Sync {
    /// Export the dataset described by `request`
    async fn export(&self, request: &ExportRequest) -> Result<()>;

    /// Get exporter name for logging
    fn name(&self) -> &str;
}

/// Exporter factory
pub struct ExporterFactory;

impl ExporterFactory {
    /// Create the exporter selected in configuration
    pub fn create(config: &ExportConfig) -> Box<dyn Exporter> {
        match config.method {
            ExportMethod::Outbox => Box::new(OutboxExporter::new(config.outbox_dir.clone())),
            ExportMethod::Mailto => Box::new(MailtoExporter::new()),
            ExportMethod::None => Box::new(NoopExporter),
        }
    }
}

/// Exporter used when export is disabled
pub struct NoopExporter;

#[async_trait::async_trait]
impl Exporter for NoopExporter {
    async fn export(&self, request: &ExportRequest) -> Result<()> {
        info!(
            "Export disabled; dataset left at {}",
            request.file_path.display()
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "noop"
    }
}
