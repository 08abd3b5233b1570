use serde::Deserialize;
use thiserror::Error;

/// PostgREST: relation does not exist
const UNDEFINED_TABLE: &str = "42P01";
/// PostgREST: table missing from the schema cache
const SCHEMA_CACHE_MISS: &str = "PGRST205";

#[derive(Debug, Error, Clone)]
pub enum BackendError {
    #[error("Supabase is not configured: {message}")]
    NotConfigured { message: String },
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("Network error: {message}")]
    Network { message: String },
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("Invalid response from Supabase: {message}")]
    Decode { message: String },
}

impl BackendError {
    pub fn code(&self) -> Option<&str> {
        match self {
            BackendError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The requested table or relation is not provisioned
    pub fn is_missing_object(&self) -> bool {
        match self {
            BackendError::Api { code, message, .. } => {
                message.contains("does not exist")
                    || matches!(code.as_deref(), Some(UNDEFINED_TABLE | SCHEMA_CACHE_MISS))
            }
            _ => false,
        }
    }

    /// The auth service rejected the bearer token; expected when nobody is signed in
    pub fn is_invalid_token(&self) -> bool {
        match self {
            BackendError::Api { code, message, .. } => {
                let lowered = message.to_lowercase();
                lowered.contains("invalid jwt")
                    || lowered.contains("missing sub claim")
                    || matches!(code.as_deref(), Some("bad_jwt" | "no_authorization"))
            }
            _ => false,
        }
    }

    /// Build an API error from a non-success response body
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();

        let (code, message) = match parsed {
            Some(body) => {
                let code = body.error_code.or_else(|| body.code.as_ref().map(code_text));
                let message = body
                    .message
                    .or(body.msg)
                    .or(body.error_description)
                    .or(body.error)
                    .unwrap_or_else(|| fallback_message(status, ""));
                (code, message)
            }
            None => (None, fallback_message(status, body)),
        };

        BackendError::Api {
            status,
            code,
            message,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode {
                message: err.to_string(),
            }
        } else {
            BackendError::Network {
                message: err.to_string(),
            }
        }
    }
}

fn fallback_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {body}")
    }
}

/// Error payloads returned by PostgREST, GoTrue and Storage
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
    code: Option<serde_json::Value>,
    error_code: Option<String>,
}

/// GoTrue reports a numeric `code` next to a textual `error_code`
fn code_text(code: &serde_json::Value) -> String {
    match code {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
