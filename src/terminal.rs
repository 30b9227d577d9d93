// Interactive terminal front end
//
// Renders one script at a time, reads a fresh transcript line for it, and
// submits it to the collector. Each script gets its own input buffer so no
// text carries over between prompts.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

use crate::collector::{Collector, SubmitOutcome};
use crate::error::CollectorError;
use crate::script::Script;
use crate::session::SessionState;

const TITLE: &str = "Susu Data Collector";
const INPUT_HINT: &str = "Paste or type your transcript here, then press Enter:";

/// How an interactive run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSummary {
    /// No scripts were loaded
    NoScripts,
    /// Input ended before every script was answered
    Interrupted { remaining: usize },
    /// Every script answered
    Completed { exported: bool },
}

/// One prompt: the script plus the transcript typed for it
struct ScriptView {
    index: usize,
    script: Script,
    transcript: String,
}

impl ScriptView {
    fn new(index: usize, script: Script) -> Self {
        Self {
            index,
            script,
            transcript: String::new(),
        }
    }

    async fn render<W: AsyncWrite + Unpin>(&self, out: &mut W, remaining: usize) -> Result<()> {
        let text = format!(
            "\n{}\nScripts Remaining: {}\n\n[{}] {}\n\n{}\n> ",
            TITLE,
            remaining,
            self.index + 1,
            self.script,
            INPUT_HINT
        );
        out.write_all(text.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }

    /// Read lines until a non-blank one arrives. Returns false on end of input.
    async fn read_transcript<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<bool>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            self.transcript.clear();
            if input.read_line(&mut self.transcript).await? == 0 {
                return Ok(false);
            }

            if !self.transcript.trim().is_empty() {
                return Ok(true);
            }

            out.write_all(b"Transcript cannot be empty.\n> ").await?;
            out.flush().await?;
        }
    }
}

/// Run the collection loop until every script is answered or input ends
///
/// On completion the dataset is exported once through the collector's exporter.
pub async fn run<R, W>(collector: &Collector, mut input: R, mut out: W) -> Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if collector.state().await == SessionState::Loading {
        warn!("No scripts loaded; nothing to collect");
        out.write_all(b"Loading Scripts... no scripts were found.\n")
            .await?;
        out.flush().await?;
        return Ok(RunSummary::NoScripts);
    }

    while let Some((index, script)) = collector.current_script().await {
        let remaining = collector.remaining().await;

        // Fresh view per script index.
        let mut view = ScriptView::new(index, script);
        view.render(&mut out, remaining).await?;

        if !view.read_transcript(&mut input, &mut out).await? {
            info!("Input closed with {} scripts remaining", remaining);
            return Ok(RunSummary::Interrupted { remaining });
        }

        match collector.submit(&view.transcript).await {
            Ok(SubmitOutcome::SkippedAfterWriteFailure { error, .. }) => {
                let msg = format!("Warning: transcript was not saved ({})\n", error);
                out.write_all(msg.as_bytes()).await?;
            }
            Ok(_) => {}
            Err(e @ CollectorError::Write { .. }) => {
                let msg = format!("Could not save transcript: {}. Please try again.\n", e);
                out.write_all(msg.as_bytes()).await?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    out.write_all(b"\nAll scripts completed. Thank you!\n").await?;

    let exported = match collector.export().await {
        Ok(request) => {
            let msg = format!(
                "The {} file is ready to be sent to {}.\n",
                request
                    .file_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                request.recipient
            );
            out.write_all(msg.as_bytes()).await?;
            true
        }
        Err(e) => {
            error!("Dataset export failed: {}", e);
            let msg = format!("Export failed: {}\n", e);
            out.write_all(msg.as_bytes()).await?;
            false
        }
    };

    out.flush().await?;

    Ok(RunSummary::Completed { exported })
}
