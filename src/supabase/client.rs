use super::{AuthUser, BackendError, BackendOperations, Bucket, ConnectionProbe};
use crate::environment::EnvironmentSnapshot;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the Supabase REST, Auth and Storage endpoints
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
    configured: bool,
    timeout: Duration,
}

impl SupabaseClient {
    /// Create a client for the project described by `snapshot`
    pub fn new(
        snapshot: &EnvironmentSnapshot,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mylifepictures/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Network {
                message: format!("Unable to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: snapshot.url.trim_end_matches('/').to_string(),
            anon_key: snapshot.key.clone(),
            access_token,
            configured: snapshot.is_ready(),
            timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the project key, and the session token when one is configured
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        if !self.configured {
            return Err(BackendError::NotConfigured {
                message: "Supabase URL or anon key is missing".to_string(),
            });
        }

        let response = self.authorized(request).send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                BackendError::from(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = BackendError::from_response(status.as_u16(), &body);
        debug!(status = status.as_u16(), error = %err, "Supabase request rejected");
        Err(err)
    }
}

#[async_trait]
impl BackendOperations for SupabaseClient {
    async fn test_connection(&self) -> ConnectionProbe {
        if !self.configured {
            return ConnectionProbe {
                configured: false,
                connected: false,
                error: Some("Supabase URL or anon key is missing".to_string()),
            };
        }

        let request = self.http.get(self.endpoint("/auth/v1/health"));
        match self.send(request).await {
            Ok(_) => ConnectionProbe {
                configured: true,
                connected: true,
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "Supabase connectivity probe failed");
                ConnectionProbe {
                    configured: true,
                    connected: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError> {
        // Without a session token the anon key is sent as bearer; the auth
        // service rejects it as a token without subject.
        let request = self.http.get(self.endpoint("/auth/v1/user"));
        let user = self
            .send(request)
            .await?
            .json::<AuthUser>()
            .await
            .map_err(|e| BackendError::Decode {
                message: e.to_string(),
            })?;
        Ok(Some(user))
    }

    async fn probe_table(&self, table: &str) -> Result<(), BackendError> {
        let request = self
            .http
            .get(self.endpoint(&format!("/rest/v1/{table}")))
            .query(&[("select", "count"), ("limit", "1")]);
        self.send(request).await?;
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<Bucket>, BackendError> {
        let request = self.http.get(self.endpoint("/storage/v1/bucket"));
        self.send(request)
            .await?
            .json::<Vec<Bucket>>()
            .await
            .map_err(|e| BackendError::Decode {
                message: e.to_string(),
            })
    }
}
