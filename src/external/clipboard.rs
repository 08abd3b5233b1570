//! System clipboard access through the platform's clipboard utilities

use super::command::{CommandError, CommandExecutor, ProcessCommandExecutor};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("No clipboard utility available (tried: {tried})")]
    Unavailable { tried: String },
    #[error("Clipboard utility {program} failed: {message}")]
    Failed { program: String, message: String },
}

#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes through the first clipboard tool that accepts the text
pub struct SystemClipboard {
    executor: Arc<dyn CommandExecutor>,
    candidates: Vec<(&'static str, &'static [&'static str])>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new(Arc::new(ProcessCommandExecutor))
    }
}

impl SystemClipboard {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            candidates: platform_candidates(),
        }
    }
}

const NO_ARGS: &[&str] = &[];
const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];
const XSEL_ARGS: &[&str] = &["--clipboard", "--input"];

fn platform_candidates() -> Vec<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "macos") {
        vec![("pbcopy", NO_ARGS)]
    } else if cfg!(windows) {
        vec![("clip", NO_ARGS)]
    } else {
        vec![
            ("wl-copy", NO_ARGS),
            ("xclip", XCLIP_ARGS),
            ("xsel", XSEL_ARGS),
        ]
    }
}

#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_failure = None;

        for (program, args) in &self.candidates {
            match self.executor.execute_with_input(program, args, text).await {
                Ok(output) if output.success() => {
                    debug!(program, "Copied text to clipboard");
                    return Ok(());
                }
                Ok(output) => {
                    last_failure = Some(ClipboardError::Failed {
                        program: program.to_string(),
                        message: output.stderr.trim().to_string(),
                    });
                }
                Err(CommandError::CommandNotFound { .. }) => continue,
                Err(e) => {
                    last_failure = Some(ClipboardError::Failed {
                        program: program.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(last_failure.unwrap_or_else(|| ClipboardError::Unavailable {
            tried: self
                .candidates
                .iter()
                .map(|(program, _)| *program)
                .collect::<Vec<_>>()
                .join(", "),
        }))
    }
}
