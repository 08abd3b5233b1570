pub mod output;

use crate::cli::DoctorFormat;
use crate::config;
use crate::diagnostics::{DiagnosticReport, DiagnosticRunner, RunOutcome, RunState, RunnerSettings};
use crate::environment;
use crate::supabase::SupabaseClient;
use anyhow::{bail, Result};
use std::sync::Arc;
use tokio::sync::watch;

use output::DiagnosticOutput;

/// Doctor command for Supabase configuration diagnostics
pub struct DoctorCommand {
    format: DoctorFormat,
    verbose: bool,
}

impl Default for DoctorCommand {
    fn default() -> Self {
        Self::new(DoctorFormat::Text, false)
    }
}

impl DoctorCommand {
    pub fn new(format: DoctorFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    pub async fn execute(&self) -> Result<()> {
        let config = config::config()?;
        let status = environment::status();
        let snapshot = Arc::new(status.snapshot.clone());

        let backend = SupabaseClient::new(
            &snapshot,
            config.supabase.access_token.clone(),
            config.doctor.probe_timeout(),
        )?;
        let runner = DiagnosticRunner::new(
            snapshot,
            Arc::new(backend),
            RunnerSettings::from(&config.doctor),
        );

        let output = DiagnosticOutput::new(self.format, self.verbose);
        let report = self.run_diagnostics(&runner, &output).await?;
        output.output_report(&report, status)?;

        // Exit with error if any check failed
        if report.has_failures() {
            std::process::exit(1);
        }

        Ok(())
    }

    async fn run_diagnostics(
        &self,
        runner: &DiagnosticRunner,
        output: &DiagnosticOutput,
    ) -> Result<DiagnosticReport> {
        let outcome = if matches!(self.format, DoctorFormat::Text) {
            output.print_header();
            let updates = runner.subscribe();
            let (outcome, ()) = tokio::join!(runner.run(), render_live(updates, output));
            outcome
        } else {
            runner.run().await
        };

        match outcome {
            RunOutcome::Completed(report) => Ok(report),
            RunOutcome::AlreadyRunning => bail!("Diagnostics are already running"),
        }
    }
}

/// Print each row once it settles, until the run reports it is done
async fn render_live(mut updates: watch::Receiver<RunState>, output: &DiagnosticOutput) {
    let mut printed = 0;

    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();

        for result in state.results.iter().skip(printed) {
            if !result.status.is_settled() {
                break;
            }
            output.print_row(result);
            printed += 1;
        }

        if !state.in_progress {
            break;
        }
    }
}
