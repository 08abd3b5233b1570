//! The diagnostic steps
//!
//! Each [`CheckKind`] knows its row name, its pending text, how to run and
//! how a fault is reported. The runner interprets [`CheckKind::SEQUENCE`].

use super::types::{CheckResult, CheckStatus};
use crate::environment::EnvironmentSnapshot;
use crate::supabase::{
    BackendError, BackendOperations, AUDIO_BUCKET, PHOTOS_BUCKET, REQUIRED_TABLES,
};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;

/// Fault raised inside a check, converted into an `error` row by [`guarded`]
#[derive(Debug, Error)]
pub enum CheckFault {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("probe batch failed: {0}")]
    Orchestration(String),
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("unexpected fault: {0}")]
    Unexpected(String),
}

/// Collaborators a check reads from
#[derive(Clone)]
pub struct CheckContext {
    pub snapshot: Arc<EnvironmentSnapshot>,
    pub backend: Arc<dyn BackendOperations>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    EnvironmentVariables,
    ConnectionTest,
    AuthenticationService,
    EmailConfiguration,
    DatabaseSchema,
    StorageBuckets,
}

impl CheckKind {
    pub const SEQUENCE: [CheckKind; 6] = [
        CheckKind::EnvironmentVariables,
        CheckKind::ConnectionTest,
        CheckKind::AuthenticationService,
        CheckKind::EmailConfiguration,
        CheckKind::DatabaseSchema,
        CheckKind::StorageBuckets,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::EnvironmentVariables => "Environment Variables",
            CheckKind::ConnectionTest => "Connection Test",
            CheckKind::AuthenticationService => "Authentication Service",
            CheckKind::EmailConfiguration => "Email Configuration",
            CheckKind::DatabaseSchema => "Database Schema",
            CheckKind::StorageBuckets => "Storage Buckets",
        }
    }

    pub fn pending_message(&self) -> &'static str {
        match self {
            CheckKind::EnvironmentVariables => "Checking configuration...",
            CheckKind::ConnectionTest => "Testing Supabase connection...",
            CheckKind::AuthenticationService => "Testing auth service...",
            CheckKind::EmailConfiguration => "Checking email settings...",
            CheckKind::DatabaseSchema => "Checking database tables...",
            CheckKind::StorageBuckets => "Checking storage configuration...",
        }
    }

    /// Whether an `error` from this step stops the run
    pub fn is_gate(&self) -> bool {
        matches!(self, CheckKind::EnvironmentVariables)
    }

    /// Row reported when the step faults
    pub fn failure(&self, fault: &CheckFault) -> CheckResult {
        let (message, action) = match self {
            CheckKind::EnvironmentVariables => ("Environment check failed", None),
            CheckKind::ConnectionTest => ("Connection test failed", None),
            CheckKind::AuthenticationService => (
                "Authentication service failed",
                Some("Check your Supabase project authentication settings"),
            ),
            CheckKind::EmailConfiguration => ("Email configuration check failed", None),
            CheckKind::DatabaseSchema => ("Database schema check failed", None),
            CheckKind::StorageBuckets => (
                "Storage test failed",
                Some("Check your Supabase project storage settings"),
            ),
        };

        let result = CheckResult::error(self.name(), message).with_details(fault.to_string());
        match action {
            Some(action) => result.with_action(action),
            None => result,
        }
    }

    pub async fn execute(self, ctx: &CheckContext) -> Result<CheckResult, CheckFault> {
        match self {
            CheckKind::EnvironmentVariables => Ok(check_environment(&ctx.snapshot)),
            CheckKind::ConnectionTest => check_connection(ctx.backend.as_ref()).await,
            CheckKind::AuthenticationService => check_authentication(ctx.backend.as_ref()).await,
            CheckKind::EmailConfiguration => Ok(check_email_configuration()),
            CheckKind::DatabaseSchema => check_database_schema(&ctx.backend).await,
            CheckKind::StorageBuckets => check_storage_buckets(ctx.backend.as_ref()).await,
        }
    }
}

/// Early-exit predicate, evaluated after every settled step
pub fn halts_run(kind: CheckKind, result: &CheckResult) -> bool {
    kind.is_gate() && result.status == CheckStatus::Error
}

/// Run one step and turn every fault, timeout or panic into its `error` row
pub async fn guarded<F>(kind: CheckKind, timeout: Duration, step: F) -> CheckResult
where
    F: Future<Output = Result<CheckResult, CheckFault>>,
{
    let outcome = tokio::time::timeout(timeout, AssertUnwindSafe(step).catch_unwind()).await;

    let fault = match outcome {
        Ok(Ok(Ok(result))) => return result,
        Ok(Ok(Err(fault))) => fault,
        Ok(Err(panic)) => CheckFault::Unexpected(panic_message(panic.as_ref())),
        Err(_) => CheckFault::Timeout(timeout),
    };

    tracing::warn!(check = kind.name(), error = %fault, "Diagnostic check faulted");
    kind.failure(&fault)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "check panicked".to_string()
    }
}

fn check_environment(snapshot: &EnvironmentSnapshot) -> CheckResult {
    let name = CheckKind::EnvironmentVariables.name();

    if !snapshot.has_key {
        let presence = &snapshot.presence;
        let details = if presence.vite_key || presence.next_key {
            "The Supabase anon key is set to a placeholder value; replace it with the key from your project's API settings"
        } else if snapshot.using_next_vars || presence.next_url {
            "Found NEXT_PUBLIC_ variables but this is a Vite app. Consider using VITE_ prefixes instead."
        } else {
            "VITE_SUPABASE_ANON_KEY or NEXT_PUBLIC_SUPABASE_ANON_KEY is required but not found"
        };

        return CheckResult::error(name, "Missing Supabase API key environment variable")
            .with_details(details)
            .with_action("Set VITE_SUPABASE_ANON_KEY in your .env file");
    }

    let message = if snapshot.using_vite_vars {
        "Configuration looks good (using VITE_ variables)"
    } else if snapshot.using_next_vars {
        "Configuration working (using NEXT_PUBLIC_ variables)"
    } else {
        "Configuration working (using mixed variables)"
    };

    CheckResult::success(name, message).with_details(format!(
        "URL: {}, Key: {}...",
        snapshot.url,
        snapshot.key_prefix(20)
    ))
}

async fn check_connection(backend: &dyn BackendOperations) -> Result<CheckResult, CheckFault> {
    let name = CheckKind::ConnectionTest.name();
    let probe = backend.test_connection().await;

    if probe.configured && probe.connected {
        return Ok(CheckResult::success(name, "Successfully connected to Supabase")
            .with_details("Database is accessible and responding"));
    }

    Ok(CheckResult::error(name, "Connection failed")
        .with_details(
            probe
                .error
                .unwrap_or_else(|| "Unable to connect to database".to_string()),
        )
        .with_action("Check your Supabase project status and API key"))
}

async fn check_authentication(
    backend: &dyn BackendOperations,
) -> Result<CheckResult, CheckFault> {
    let user = match backend.current_user().await {
        Ok(user) => user,
        Err(e) if e.is_invalid_token() => {
            tracing::debug!(error = %e, "No session token accepted by auth service");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let details = match user {
        Some(user) => format!("Currently signed in as: {}", user.display_identity()),
        None => "Not signed in (this is normal)".to_string(),
    };

    Ok(CheckResult::success(
        CheckKind::AuthenticationService.name(),
        "Authentication service is working",
    )
    .with_details(details))
}

fn check_email_configuration() -> CheckResult {
    // SMTP settings are only visible from the dashboard
    CheckResult::warning(
        CheckKind::EmailConfiguration.name(),
        "Email configuration needs verification",
    )
    .with_details("Email confirmation may not work if SMTP is not configured in Supabase")
    .with_action("Check your Supabase Auth settings for email configuration")
}

async fn check_database_schema(
    backend: &Arc<dyn BackendOperations>,
) -> Result<CheckResult, CheckFault> {
    let name = CheckKind::DatabaseSchema.name();
    let mut probes = JoinSet::new();

    for table in REQUIRED_TABLES {
        let backend = Arc::clone(backend);
        probes.spawn(async move { (table, backend.probe_table(table).await) });
    }

    let mut missing = Vec::new();
    while let Some(joined) = probes.join_next().await {
        let (table, outcome) = joined.map_err(|e| CheckFault::Orchestration(e.to_string()))?;
        match outcome {
            Ok(()) => {}
            Err(e) if e.is_missing_object() => missing.push(table),
            Err(e @ BackendError::Api { .. }) => {
                // Reachable but refused (RLS, permissions): the table exists
                tracing::debug!(table, error = %e, "Table probe rejected");
            }
            Err(e) => {
                // Not evidence of absence either; counted as present
                tracing::warn!(table, error = %e, "Table probe did not reach the database");
            }
        }
    }
    missing.sort_by_key(|table| REQUIRED_TABLES.iter().position(|t| t == table));

    let total = REQUIRED_TABLES.len();
    let present = total - missing.len();

    let result = if present == total {
        CheckResult::success(name, "All required tables exist (including profiles table)")
            .with_details("Database schema is properly set up with profiles table")
    } else if present > 0 {
        CheckResult::warning(name, format!("{present}/{total} tables exist"))
            .with_details(format!(
                "Some tables are missing - they will be created automatically when needed. Missing: {}",
                missing.join(", ")
            ))
            .with_action("Tables will be created when you first use the app features")
    } else {
        CheckResult::warning(name, "No tables found")
            .with_details("Database tables will be created automatically when you first use the app")
            .with_action("This is normal for a new project - tables are created on demand")
    };

    Ok(result)
}

async fn check_storage_buckets(
    backend: &dyn BackendOperations,
) -> Result<CheckResult, CheckFault> {
    let name = CheckKind::StorageBuckets.name();
    let buckets = backend.list_buckets().await?;

    let has_bucket = |wanted: &str| buckets.iter().any(|bucket| bucket.name == wanted);
    let missing: Vec<&str> = [PHOTOS_BUCKET, AUDIO_BUCKET]
        .into_iter()
        .filter(|wanted| !has_bucket(*wanted))
        .collect();
    let count = buckets.len();

    if missing.is_empty() {
        return Ok(CheckResult::success(name, "All required storage buckets exist")
            .with_details(format!(
                "Found {count} buckets including '{PHOTOS_BUCKET}' and '{AUDIO_BUCKET}'"
            )));
    }

    Ok(CheckResult::warning(name, "Some storage buckets missing")
        .with_details(format!("Found {count} buckets. Missing: {}", missing.join(", ")))
        .with_action("Create missing buckets in your Supabase dashboard under Storage"))
}
