pub mod collector;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod http;
pub mod script;
pub mod session;
pub mod terminal;

pub use collector::{Collector, SubmitOutcome};
pub use config::Config;
pub use dataset::{DatasetEntry, DatasetRecorder};
pub use error::CollectorError;
pub use export::{ExportRequest, Exporter, ExporterFactory, SystemInfo};
pub use http::{create_router, AppState};
pub use script::Script;
pub use session::{Session, SessionConfig, SessionState, SessionStats};
