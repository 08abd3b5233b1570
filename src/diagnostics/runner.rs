use super::checks::{guarded, halts_run, CheckContext, CheckKind};
use super::types::{DiagnosticReport, RunState};
use crate::environment::EnvironmentSnapshot;
use crate::supabase::BackendOperations;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

/// Timing knobs for a run
#[derive(Debug, Clone, Copy)]
pub struct RunnerSettings {
    pub probe_timeout: Duration,
    pub step_delay: Duration,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(10),
            step_delay: Duration::ZERO,
        }
    }
}

impl From<&crate::config::DoctorConfig> for RunnerSettings {
    fn from(config: &crate::config::DoctorConfig) -> Self {
        Self {
            probe_timeout: config.probe_timeout(),
            step_delay: config.step_delay(),
        }
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Completed(DiagnosticReport),
    /// A run was already in progress; nothing was started
    AlreadyRunning,
}

/// Executes the diagnostic steps in order and publishes the result list
pub struct DiagnosticRunner {
    context: CheckContext,
    settings: RunnerSettings,
    steps: Vec<CheckKind>,
    state: watch::Sender<RunState>,
    running: AtomicBool,
}

/// Clears the in-progress flag however the run ends, including cancellation.
/// The flag is released last, after the state is settled.
struct RunGuard<'a> {
    runner: &'a DiagnosticRunner,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.runner.state.send_if_modified(|state| {
            let was_running = state.in_progress;
            if was_running {
                state.finish();
            }
            was_running
        });
        self.runner.running.store(false, Ordering::Release);
    }
}

impl DiagnosticRunner {
    pub fn new(
        snapshot: Arc<EnvironmentSnapshot>,
        backend: Arc<dyn BackendOperations>,
        settings: RunnerSettings,
    ) -> Self {
        let (state, _) = watch::channel(RunState::default());
        Self {
            context: CheckContext { snapshot, backend },
            settings,
            steps: CheckKind::SEQUENCE.to_vec(),
            state,
            running: AtomicBool::new(false),
        }
    }

    /// Replace the step list
    pub fn with_steps(mut self, steps: Vec<CheckKind>) -> Self {
        self.steps = steps;
        self
    }

    /// Observe the result list; every change publishes a full snapshot
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> RunState {
        self.state.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run every step once. Returns without doing anything while another run
    /// is in progress.
    pub async fn run(&self) -> RunOutcome {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Diagnostics already running; ignoring trigger");
            return RunOutcome::AlreadyRunning;
        }

        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("diagnostic_run", correlation.id = %run_id);

        // The report is taken while this run still owns the flag, so a
        // concurrent trigger cannot reset the list underneath it
        let (report, halted_early) = {
            let _guard = RunGuard { runner: self };
            self.state.send_modify(RunState::begin);
            let halted_early = self.execute_steps().instrument(span).await;
            self.state.send_modify(RunState::finish);
            let report = DiagnosticReport::from_state(run_id, &self.state.borrow(), halted_early);
            (report, halted_early)
        };

        info!(
            passed = report.summary.passed,
            failed = report.summary.failed,
            warnings = report.summary.warnings,
            halted_early,
            "Diagnostics finished"
        );
        RunOutcome::Completed(report)
    }

    /// Returns true when the early-exit gate stopped the sequence
    async fn execute_steps(&self) -> bool {
        for &kind in &self.steps {
            self.state
                .send_modify(|state| state.push_pending(kind.name(), kind.pending_message()));

            if !self.settings.step_delay.is_zero() {
                tokio::time::sleep(self.settings.step_delay).await;
            }

            debug!(check = kind.name(), "Running diagnostic check");
            let result = guarded(kind, self.settings.probe_timeout, kind.execute(&self.context)).await;
            let halts = halts_run(kind, &result);
            debug!(check = kind.name(), status = ?result.status, "Diagnostic check settled");

            self.state.send_modify(|state| {
                if let Err(e) = state.settle_last(result) {
                    warn!(check = kind.name(), error = %e, "Discarded illegal result transition");
                }
            });

            if halts {
                info!(check = kind.name(), "Configuration error; skipping remaining checks");
                return true;
            }
        }
        false
    }
}
