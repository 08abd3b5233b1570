//! Supabase environment snapshot
//!
//! Resolves the service URL and anon key from the two supported naming
//! conventions and exposes the process-wide ready flag derived from them.
//! The snapshot is computed once and read-only afterwards.

use serde::Serialize;
use std::sync::OnceLock;

pub const VITE_URL_VAR: &str = "VITE_SUPABASE_URL";
pub const VITE_KEY_VAR: &str = "VITE_SUPABASE_ANON_KEY";
pub const NEXT_URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const NEXT_KEY_VAR: &str = "NEXT_PUBLIC_SUPABASE_ANON_KEY";

const URL_PLACEHOLDERS: &[&str] = &["your-project-url"];
const KEY_PLACEHOLDERS: &[&str] = &["your-anon-key", "placeholder-key", "your-anon-key-here"];

/// Naming convention a value was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableSource {
    Vite,
    NextPublic,
    Default,
}

impl VariableSource {
    pub fn label(&self) -> &'static str {
        match self {
            VariableSource::Vite => "VITE_ variables",
            VariableSource::NextPublic => "NEXT_PUBLIC_ variables",
            VariableSource::Default => "Default/None",
        }
    }
}

/// Which of the four variables were present in the environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariablePresence {
    pub vite_url: bool,
    pub vite_key: bool,
    pub next_url: bool,
    pub next_key: bool,
}

/// Read-only view of the Supabase configuration inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentSnapshot {
    pub url: String,
    #[serde(skip)]
    pub key: String,
    pub has_url: bool,
    pub has_key: bool,
    pub using_vite_vars: bool,
    pub using_next_vars: bool,
    pub presence: VariablePresence,
}

impl EnvironmentSnapshot {
    /// Resolve the snapshot from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. URL and key fall back independently:
    /// VITE_ first, NEXT_PUBLIC_ second, then `default_url` and an empty key.
    pub fn resolve<F>(lookup: F, default_url: &str) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let vite_url = read(VITE_URL_VAR);
        let vite_key = read(VITE_KEY_VAR);
        let next_url = read(NEXT_URL_VAR);
        let next_key = read(NEXT_KEY_VAR);

        let presence = VariablePresence {
            vite_url: vite_url.is_some(),
            vite_key: vite_key.is_some(),
            next_url: next_url.is_some(),
            next_key: next_key.is_some(),
        };

        let url = vite_url
            .or(next_url)
            .unwrap_or_else(|| default_url.to_string());
        let key = vite_key.or(next_key).unwrap_or_default();

        Self {
            has_url: !url.is_empty() && !URL_PLACEHOLDERS.contains(&url.as_str()),
            has_key: !key.is_empty() && !KEY_PLACEHOLDERS.contains(&key.as_str()),
            using_vite_vars: presence.vite_url && presence.vite_key,
            using_next_vars: presence.next_url && presence.next_key,
            url,
            key,
            presence,
        }
    }

    /// Resolve the snapshot from the process environment
    pub fn from_process_env(default_url: &str) -> Self {
        Self::resolve(|name| std::env::var(name).ok(), default_url)
    }

    pub fn source(&self) -> VariableSource {
        if self.using_vite_vars {
            VariableSource::Vite
        } else if self.using_next_vars {
            VariableSource::NextPublic
        } else {
            VariableSource::Default
        }
    }

    /// First `len` characters of the key, for display
    pub fn key_prefix(&self, len: usize) -> &str {
        match self.key.char_indices().nth(len) {
            Some((idx, _)) => &self.key[..idx],
            None => &self.key,
        }
    }

    /// True when both URL and key are usable
    pub fn is_ready(&self) -> bool {
        self.has_url && self.has_key
    }
}

/// Process-wide Supabase readiness
#[derive(Debug, Clone, Serialize)]
pub struct SupabaseStatus {
    pub snapshot: EnvironmentSnapshot,
}

impl SupabaseStatus {
    pub fn is_ready(&self) -> bool {
        self.snapshot.is_ready()
    }
}

static STATUS: OnceLock<SupabaseStatus> = OnceLock::new();

/// Compute the process-wide status from the process environment.
///
/// Called once at startup after `.env` has been loaded. Later calls return the
/// value computed first.
pub fn init_status(default_url: &str) -> &'static SupabaseStatus {
    STATUS.get_or_init(|| {
        let snapshot = EnvironmentSnapshot::from_process_env(default_url);
        tracing::debug!(
            source = snapshot.source().label(),
            ready = snapshot.is_ready(),
            "Supabase environment resolved"
        );
        SupabaseStatus { snapshot }
    })
}

/// Read the process-wide status, initialising it with the built-in default URL
/// if startup did not.
pub fn status() -> &'static SupabaseStatus {
    init_status(crate::config::DEFAULT_SUPABASE_URL)
}
