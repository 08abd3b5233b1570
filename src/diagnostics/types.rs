use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of a diagnostic check
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pending,
    Success,
    Error,
    Warning,
}

impl CheckStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, CheckStatus::Pending)
    }
}

/// Outcome of a single diagnostic step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl CheckResult {
    fn new(name: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
            details: None,
            action: None,
        }
    }

    pub fn pending(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Pending, message)
    }

    pub fn success(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Success, message)
    }

    pub fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Warning, message)
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Error, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Rejected change to the result list
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("no check is pending")]
    NoPendingCheck,
    #[error("check '{name}' already settled as {status:?}")]
    AlreadySettled { name: String, status: CheckStatus },
    #[error("expected a result for '{expected}', got '{found}'")]
    NameMismatch { expected: String, found: String },
    #[error("check '{name}' cannot settle as pending")]
    StillPending { name: String },
}

/// Ordered results of the current run plus the in-progress flag
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunState {
    pub results: Vec<CheckResult>,
    pub in_progress: bool,
}

impl RunState {
    /// Discard the previous report and mark a run as started
    pub fn begin(&mut self) {
        self.results.clear();
        self.in_progress = true;
    }

    pub fn push_pending(&mut self, name: &str, message: &str) {
        self.results.push(CheckResult::pending(name, message));
    }

    /// Replace the trailing pending row with its settled result.
    ///
    /// Only `pending -> success | error | warning` is accepted.
    pub fn settle_last(&mut self, result: CheckResult) -> Result<(), TransitionError> {
        let last = self.results.last_mut().ok_or(TransitionError::NoPendingCheck)?;

        if last.status.is_settled() {
            return Err(TransitionError::AlreadySettled {
                name: last.name.clone(),
                status: last.status,
            });
        }
        if last.name != result.name {
            return Err(TransitionError::NameMismatch {
                expected: last.name.clone(),
                found: result.name,
            });
        }
        if !result.status.is_settled() {
            return Err(TransitionError::StillPending { name: result.name });
        }

        *last = result;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.in_progress = false;
    }

    pub fn summary(&self) -> DiagnosticSummary {
        let mut summary = DiagnosticSummary {
            total_checks: self.results.len(),
            ..DiagnosticSummary::default()
        };

        for result in &self.results {
            match result.status {
                CheckStatus::Success => summary.passed += 1,
                CheckStatus::Error => summary.failed += 1,
                CheckStatus::Warning => summary.warnings += 1,
                CheckStatus::Pending => summary.pending += 1,
            }
        }

        summary
    }
}

/// Summary of diagnostic results
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticSummary {
    pub total_checks: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub pending: usize,
}

/// Overall backend readiness
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReadinessStatus {
    Ready,
    PartiallyReady,
    NotReady,
}

impl ReadinessStatus {
    pub fn from_summary(summary: &DiagnosticSummary) -> Self {
        match (summary.failed, summary.warnings) {
            (0, 0) if summary.total_checks > 0 => ReadinessStatus::Ready,
            (0, _) if summary.total_checks > 0 => ReadinessStatus::PartiallyReady,
            _ => ReadinessStatus::NotReady,
        }
    }
}

/// Final report of a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub run_id: String,
    pub results: Vec<CheckResult>,
    pub summary: DiagnosticSummary,
    pub readiness: ReadinessStatus,
    pub halted_early: bool,
}

impl DiagnosticReport {
    pub fn from_state(run_id: String, state: &RunState, halted_early: bool) -> Self {
        let summary = state.summary();
        Self {
            run_id,
            results: state.results.clone(),
            readiness: ReadinessStatus::from_summary(&summary),
            summary,
            halted_early,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}
