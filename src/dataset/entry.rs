use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between transcript and script on a dataset line
pub const DELIMITER: &str = "<|>";

/// One recorded (transcript, script) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub transcript: String,
    pub script: String,
}

impl DatasetEntry {
    pub fn new(transcript: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            script: script.into(),
        }
    }

    /// Serialized form, newline-terminated
    pub fn to_line(&self) -> String {
        format!("{}{}{}\n", self.transcript, DELIMITER, self.script)
    }

    /// Parse one dataset line (without its trailing newline)
    ///
    /// Splits on the last delimiter: transcripts are free text and may
    /// contain `<|>`, scripts do not.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let (transcript, script) = line.rsplit_once(DELIMITER)?;
        Some(Self::new(transcript, script))
    }
}

impl fmt::Display for DatasetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.transcript, DELIMITER, self.script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_line_format() {
        let entry = DatasetEntry::new("Hi", "Hello there");
        assert_eq!(entry.to_line(), "Hi<|>Hello there\n");
        assert_eq!(entry.to_string(), "Hi<|>Hello there");
    }

    #[test]
    fn test_parse_line() {
        let entry = DatasetEntry::parse("Good<|>How are you?").unwrap();
        assert_eq!(entry.transcript, "Good");
        assert_eq!(entry.script, "How are you?");
    }

    #[test]
    fn test_parse_transcript_containing_delimiter() {
        let entry = DatasetEntry::new("a<|>b", "script");
        let parsed = DatasetEntry::parse(&entry.to_line()).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_parse_rejects_line_without_delimiter() {
        assert!(DatasetEntry::parse("no separator here").is_none());
    }
}
