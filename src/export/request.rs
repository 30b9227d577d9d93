use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ExportConfig;

/// Everything an exporter needs to send the dataset on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Dataset file to attach
    pub file_path: PathBuf,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl ExportRequest {
    /// Build the submission message for a finished dataset
    pub fn for_dataset(file_path: &Path, config: &ExportConfig, system: &SystemInfo) -> Self {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());

        let body = format!(
            "Thank you for your contribution! Please find the {} file attached.\n\n{}",
            file_name, system
        );

        Self {
            file_path: file_path.to_path_buf(),
            recipient: config.recipient.clone(),
            subject: config.subject.clone(),
            body,
        }
    }
}

/// Basic host diagnostics included in the export message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub family: String,
    pub arch: String,
    pub cpus: usize,
}

impl SystemInfo {
    pub fn collect() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            family: std::env::consts::FAMILY.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpus: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- System Information ---")?;
        writeln!(f, "OS: {} ({})", self.os, self.family)?;
        writeln!(f, "Architecture: {}", self.arch)?;
        writeln!(f, "CPUs: {}", self.cpus)?;
        write!(f, "--------------------------")
    }
}
