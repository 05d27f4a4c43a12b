use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Category sent with every prompt unless configured otherwise.
pub const DEFAULT_CATEGORY: &str = "general";

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Example prompts offered as one-click suggestions.
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,
}

/// Identity service endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the identity service (e.g., "http://127.0.0.1:5000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Session introspection endpoint (GET).
    #[serde(default = "default_session_path")]
    pub session_path: String,
    /// Sign-in endpoint (POST).
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Sign-up endpoint (POST).
    #[serde(default = "default_register_path")]
    pub register_path: String,
    /// Sign-out endpoint (POST).
    #[serde(default = "default_logout_path")]
    pub logout_path: String,
}

/// Creation pipeline endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_create_path")]
    pub create_path: String,
    /// Category attached to every draft.
    #[serde(default = "default_category")]
    pub category: String,
}

/// Upper bounds for outbound calls, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_probe_seconds")]
    pub probe_seconds: u64,
    #[serde(default = "default_verify_seconds")]
    pub verify_seconds: u64,
    #[serde(default = "default_dispatch_seconds")]
    pub dispatch_seconds: u64,
    #[serde(default = "default_logout_seconds")]
    pub logout_seconds: u64,
    #[serde(default = "default_connect_seconds")]
    pub connect_seconds: u64,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Defaults to the platform cache directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_session_path() -> String {
    "/api/auth/me".to_string()
}

fn default_login_path() -> String {
    "/api/auth/login".to_string()
}

fn default_register_path() -> String {
    "/api/auth/register".to_string()
}

fn default_logout_path() -> String {
    "/api/auth/logout".to_string()
}

fn default_create_path() -> String {
    "/api/apps".to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_probe_seconds() -> u64 {
    10
}

fn default_verify_seconds() -> u64 {
    15
}

fn default_dispatch_seconds() -> u64 {
    30
}

fn default_logout_seconds() -> u64 {
    5
}

fn default_connect_seconds() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_suggestions() -> Vec<String> {
    [
        "Statistical significance calculator",
        "Media player app",
        "Todo list with categories",
        "Weather dashboard",
        "Recipe finder",
        "Expense tracker",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl TimeoutConfig {
    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe_seconds)
    }

    pub fn verify(&self) -> Duration {
        Duration::from_secs(self.verify_seconds)
    }

    pub fn dispatch(&self) -> Duration {
        Duration::from_secs(self.dispatch_seconds)
    }

    pub fn logout(&self) -> Duration {
        Duration::from_secs(self.logout_seconds)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_seconds)
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_path: default_session_path(),
            login_path: default_login_path(),
            register_path: default_register_path(),
            logout_path: default_logout_path(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            create_path: default_create_path(),
            category: default_category(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            probe_seconds: default_probe_seconds(),
            verify_seconds: default_verify_seconds(),
            dispatch_seconds: default_dispatch_seconds(),
            logout_seconds: default_logout_seconds(),
            connect_seconds: default_connect_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identity: IdentityConfig::default(),
            pipeline: PipelineConfig::default(),
            timeouts: TimeoutConfig::default(),
            logging: LoggingConfig::default(),
            suggestions: default_suggestions(),
        }
    }
}
