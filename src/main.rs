use anyhow::Result;
use clap::Parser;

use mylifepictures::cli::commands::doctor::DoctorCommand;
use mylifepictures::cli::commands::instructions::InstructionsCommand;
use mylifepictures::cli::commands::show_how_to_get_started;
use mylifepictures::cli::commands::status::StatusCommand;
use mylifepictures::cli::{Cli, Commands};
use mylifepictures::{environment, init_config, init_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Loads .env as a side effect, so it has to precede the snapshot
    let config = init_config()?;
    init_telemetry(&config.observability)?;
    environment::init_status(&config.supabase.default_url);

    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        None => runtime.block_on(async { show_how_to_get_started().await }),
        Some(Commands::Doctor { format, verbose }) => runtime.block_on(async {
            DoctorCommand::new(format, verbose).execute().await
        }),
        Some(Commands::Instructions { stdout }) => runtime.block_on(async {
            InstructionsCommand::new(stdout).execute().await
        }),
        Some(Commands::Status) => runtime.block_on(async { StatusCommand::new().execute().await }),
    }
}
