use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub collector: CollectorConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    /// Newline-delimited prompt scripts
    pub scripts_path: PathBuf,
    /// Append-only dataset file
    pub dataset_path: PathBuf,
    /// Advance to the next script even when the dataset write fails
    pub advance_on_write_failure: bool,
}

/// How the finished dataset leaves the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMethod {
    /// Stage the dataset and message in an outbox directory
    Outbox,
    /// Open a pre-filled mail draft via a mailto: link
    Mailto,
    /// Skip the export step
    None,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub method: ExportMethod,
    pub recipient: String,
    pub subject: String,
    pub outbox_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            method: ExportMethod::Outbox,
            recipient: DEFAULT_RECIPIENT.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            outbox_dir: PathBuf::from("outbox"),
        }
    }
}

pub const DEFAULT_RECIPIENT: &str = "tennyson.mccalla@superbuilders.school";
pub const DEFAULT_SUBJECT: &str = "Susu Data Collector Submission";

/// `~/Documents/dataset.txt`, or `./dataset.txt` when there is no home directory
pub fn default_dataset_path() -> PathBuf {
    match home::home_dir() {
        Some(home) => home.join("Documents").join("dataset.txt"),
        None => PathBuf::from("dataset.txt"),
    }
}

impl Config {
    /// Load configuration from an optional file plus `SUSU__*` environment overrides.
    ///
    /// Every key has a default, so a missing file yields a usable config.
    pub fn load(path: &str) -> Result<Self> {
        let dataset_path = default_dataset_path();

        let settings = config::Config::builder()
            .set_default("service.name", "susu-collector")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8087)?
            .set_default("collector.scripts_path", "scripts.txt")?
            .set_default("collector.dataset_path", dataset_path.display().to_string())?
            .set_default("collector.advance_on_write_failure", false)?
            .set_default("export.method", "outbox")?
            .set_default("export.recipient", DEFAULT_RECIPIENT)?
            .set_default("export.subject", DEFAULT_SUBJECT)?
            .set_default("export.outbox_dir", "outbox")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SUSU").separator("__"))
            .build()
            .with_context(|| format!("Failed to build config from {}", path))?;

        Ok(settings.try_deserialize()?)
    }
}
