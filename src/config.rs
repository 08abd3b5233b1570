use anyhow::Result;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for MyLifePictures tooling
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend platform settings
    pub supabase: SupabaseConfig,
    /// Diagnostic runner settings
    pub doctor: DoctorConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SupabaseConfig {
    /// Project URL used when neither naming convention supplies one
    pub default_url: String,
    /// Signed-in user's access token, used by the authentication check
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DoctorConfig {
    /// Upper bound for a single check, including its network calls
    pub probe_timeout_seconds: u64,
    /// Pause between showing a check as pending and running it
    pub step_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit structured JSON logs instead of compact text
    pub json_logs: bool,
}

pub const DEFAULT_SUPABASE_URL: &str = "https://zvxnsjsltabvsfwatqox.supabase.co";

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            default_url: DEFAULT_SUPABASE_URL.to_string(),
            access_token: None,
        }
    }
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            probe_timeout_seconds: 10,
            step_delay_ms: 0,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase: SupabaseConfig::default(),
            doctor: DoctorConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl DoctorConfig {
    /// At least one second; zero would fail every network check instantly
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds.max(1))
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (mylifepictures.toml, .mylifepictures-rc)
    /// 3. Environment variables (prefixed with MYLIFEPICTURES_, sections split by `__`)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if Path::new("mylifepictures.toml").exists() {
            builder = builder.add_source(File::with_name("mylifepictures"));
        }

        if Path::new(".mylifepictures-rc").exists() {
            builder = builder.add_source(
                File::with_name(".mylifepictures-rc").format(::config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("MYLIFEPICTURES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::debug!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<AppConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        // .env has to be applied before the Supabase variables are read
        let _ = AppConfig::load_env_file();
        AppConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static AppConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<&'static AppConfig> {
    let config = config()?;
    tracing::debug!("Configuration loaded successfully");
    Ok(config)
}
