//! Supabase configuration diagnostics
//!
//! An ordered list of checks run against the environment snapshot and the
//! backend collaborator. Results are published through a watch channel so a
//! renderer can show each row as it settles.

pub mod checks;
pub mod runner;
pub mod types;

pub use checks::{halts_run, CheckContext, CheckFault, CheckKind};
pub use runner::{DiagnosticRunner, RunOutcome, RunnerSettings};
pub use types::{
    CheckResult, CheckStatus, DiagnosticReport, DiagnosticSummary, ReadinessStatus, RunState,
    TransitionError,
};
