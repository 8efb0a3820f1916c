use std::path::PathBuf;
use std::time::Duration;

use config::{Config, File, FileFormat};
pub use config::ConfigError;
use serde::Deserialize;

use crate::errors::{Error, Result};

/// Main configuration struct
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    /// Upstream order service (REST + push channel)
    #[serde(default)]
    pub feed: FeedConfig,
    /// What the dashboard shows and for whom
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Persisted selection state
    #[serde(default)]
    pub state: StateConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Embedded dashboard server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Origin of the order service, e.g. "http://localhost:8080"
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Fixed delay between push channel reconnect attempts
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

impl FeedConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
        }
    }
}

fn default_origin() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_reconnect_delay_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Employee shown when nothing has been selected yet
    #[serde(default = "default_employee")]
    pub default_employee: String,
    /// Employees offered in the selection form
    #[serde(default = "default_employees")]
    pub employees: Vec<String>,
    /// Prefix for formatted amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Also print a text view to stdout on every change
    #[serde(default)]
    pub console: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_employee: default_employee(),
            employees: default_employees(),
            currency_symbol: default_currency_symbol(),
            console: false,
        }
    }
}

fn default_employee() -> String {
    "John Marwin".to_string()
}

fn default_employees() -> Vec<String> {
    vec![default_employee()]
}

fn default_currency_symbol() -> String {
    "₱".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    /// JSON file holding the selected employee
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from("em_dashboard_state.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Enable local dashboard server
    #[serde(default = "default_server_enabled")]
    pub enabled: bool,
    /// Server port (default 3000)
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Server host (default 127.0.0.1)
    #[serde(default = "default_server_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: default_server_enabled(),
            port: default_server_port(),
            host: default_server_host(),
        }
    }
}

fn default_server_enabled() -> bool {
    true
}

fn default_server_port() -> u16 {
    3000
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

impl Settings {
    /// Load settings from a configuration file
    pub fn new(config_path: &str) -> Result<Self> {
        let s = Config::builder()
            .add_source(File::with_name(config_path))
            // Environment variables override the file
            // e.g. APP__FEED__ORIGIN=http://orders.local:8080
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let settings: Self = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an in-memory TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let s = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;

        let settings: Self = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let origin = self.feed.origin.as_str();
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(Error::InvalidOrigin(self.feed.origin.clone()));
        }

        if self.feed.reconnect_delay_secs == 0 {
            return Err(Error::InvalidConfig(
                "feed.reconnect_delay_secs must be greater than 0".into(),
            ));
        }

        if self.dashboard.default_employee.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "dashboard.default_employee must not be empty".into(),
            ));
        }

        Ok(())
    }
}
