use super::doctor::output::render_environment_panel;
use crate::environment;
use anyhow::Result;

/// Show the resolved Supabase environment and the ready flag
pub struct StatusCommand;

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self) -> Result<()> {
        println!("📸 MYLIFEPICTURES SUPABASE STATUS");
        println!("=================================");
        println!();
        println!("{}", render_environment_panel(environment::status()));
        Ok(())
    }
}

impl Default for StatusCommand {
    fn default() -> Self {
        Self::new()
    }
}
