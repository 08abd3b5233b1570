use crate::environment;
use crate::external::{ClipboardWriter, SystemClipboard};
use crate::setup::setup_instructions;
use anyhow::Result;
use std::sync::Arc;

/// Copy the Supabase setup instructions to the clipboard
pub struct InstructionsCommand {
    clipboard: Arc<dyn ClipboardWriter>,
    to_stdout: bool,
}

impl InstructionsCommand {
    pub fn new(to_stdout: bool) -> Self {
        Self::with_clipboard(Arc::new(SystemClipboard::default()), to_stdout)
    }

    pub fn with_clipboard(clipboard: Arc<dyn ClipboardWriter>, to_stdout: bool) -> Self {
        Self {
            clipboard,
            to_stdout,
        }
    }

    pub async fn execute(&self) -> Result<()> {
        let instructions = setup_instructions(&environment::status().snapshot.url);
        self.deliver(&instructions).await
    }

    async fn deliver(&self, instructions: &str) -> Result<()> {
        if self.to_stdout {
            print!("{instructions}");
            return Ok(());
        }

        match self.clipboard.write_text(instructions).await {
            Ok(()) => {
                println!("📋 Setup instructions copied to clipboard!");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard unavailable; printing instructions");
                eprintln!("⚠️  {e}; printing instructions instead");
                print!("{instructions}");
            }
        }
        Ok(())
    }
}
