//! Supabase backend abstractions
//!
//! The diagnostic runner only talks to the hosted platform through
//! [`BackendOperations`], so checks can be exercised against mocks without
//! network access.

pub mod client;
pub mod errors;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use client::SupabaseClient;
pub use errors::BackendError;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

/// Tables the application expects to find
pub const REQUIRED_TABLES: [&str; 4] = ["profiles", "photos", "photo_folders", "audio_recordings"];

/// Storage buckets the application uploads into
pub const PHOTOS_BUCKET: &str = "photos";
pub const AUDIO_BUCKET: &str = "audio";

/// Outcome of the connectivity probe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionProbe {
    pub configured: bool,
    pub connected: bool,
    pub error: Option<String>,
}

/// Signed-in user as returned by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthUser {
    pub fn display_identity(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// Storage bucket descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: bool,
}

/// Operations the diagnostics need from the hosted platform
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait BackendOperations: Send + Sync {
    /// Check that the project is configured and reachable; never fails
    async fn test_connection(&self) -> ConnectionProbe;

    /// Fetch the user of the current session, `None` when nobody is signed in
    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError>;

    /// Issue a minimal select against `table`
    async fn probe_table(&self, table: &str) -> Result<(), BackendError>;

    /// List all storage buckets visible to the key
    async fn list_buckets(&self) -> Result<Vec<Bucket>, BackendError>;
}
