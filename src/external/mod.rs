//! External tool abstractions
//!
//! Trait-based wrappers around external programs so the commands that use
//! them can be tested with substitutes.

pub mod clipboard;
pub mod command;

pub use clipboard::{ClipboardError, ClipboardWriter, SystemClipboard};
pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
