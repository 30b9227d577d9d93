// Prompt script loading
//
// Scripts come from a newline-delimited text resource, one prompt per line.
// Blank and whitespace-only lines are dropped at load time.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{error, info};

/// One prompt line presented for transcription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script(String);

impl Script {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Script {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Split a scripts resource into prompts, trimming each line and skipping blanks
pub fn parse_scripts(contents: &str) -> Vec<Script> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Script::from)
        .collect()
}

/// Read and parse a scripts file
pub fn load_scripts(path: impl AsRef<Path>) -> Result<Vec<Script>> {
    let path = path.as_ref();
    info!("Loading scripts from {}", path.display());

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scripts file {}", path.display()))?;

    let scripts = parse_scripts(&contents);
    info!("Loaded {} scripts", scripts.len());

    Ok(scripts)
}

/// Like [`load_scripts`], but a missing or unreadable file yields an empty list.
///
/// The session then stays in its loading state.
pub fn load_scripts_or_empty(path: impl AsRef<Path>) -> Vec<Script> {
    match load_scripts(path) {
        Ok(scripts) => scripts,
        Err(e) => {
            error!("Error loading scripts: {:#}", e);
            Vec::new()
        }
    }
}
