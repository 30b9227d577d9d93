pub mod backend;
pub mod mailto;
pub mod outbox;
pub mod request;

pub use backend::{Exporter, ExporterFactory, NoopExporter};
pub use mailto::MailtoExporter;
pub use outbox::OutboxExporter;
pub use request::{ExportRequest, SystemInfo};
