use clap::{Parser, Subcommand, ValueEnum};

pub mod commands;

#[derive(Parser)]
#[command(name = "mylifepictures")]
#[command(version)]
#[command(about = "Supabase setup diagnostics for MyLifePictures.ai")]
#[command(long_about = "Checks that the Supabase project behind MyLifePictures.ai is configured: \
                       environment variables, connectivity, auth, tables and storage buckets. \
                       Start with 'mylifepictures doctor'.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Supabase configuration checks and report the results
    Doctor {
        /// Output format
        #[arg(long, value_enum, default_value_t = DoctorFormat::Text, help = "Output format: text or json")]
        format: DoctorFormat,
        /// Show details for passing checks too
        #[arg(long, short = 'v', help = "Show details and actions for every check")]
        verbose: bool,
    },
    /// Copy the Supabase setup instructions to the clipboard
    Instructions {
        /// Print instead of copying
        #[arg(long, help = "Print the instructions to stdout instead of the clipboard")]
        stdout: bool,
    },
    /// Show which Supabase variables are set and whether the app is ready
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DoctorFormat {
    Text,
    Json,
}
