pub mod entry;
pub mod recorder;

pub use entry::{DatasetEntry, DELIMITER};
pub use recorder::DatasetRecorder;
