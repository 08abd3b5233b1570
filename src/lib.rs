// MyLifePictures Library - Supabase setup diagnostics
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod environment;
pub mod external;
pub mod models;
pub mod setup;
pub mod supabase;
pub mod telemetry;

// Re-export key types for easy access
pub use self::config::{config, init_config, AppConfig};
pub use diagnostics::{
    CheckKind, CheckResult, CheckStatus, DiagnosticReport, DiagnosticRunner, RunOutcome,
    RunState, RunnerSettings,
};
pub use environment::{init_status, status, EnvironmentSnapshot, SupabaseStatus};
pub use setup::setup_instructions;
pub use supabase::{BackendError, BackendOperations, SupabaseClient};
pub use telemetry::init_telemetry;
