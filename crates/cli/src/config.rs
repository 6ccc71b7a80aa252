//! Configuration from the environment and an optional metricool-mcp.toml.
//!
//! Credentials only come from the environment. The settings file holds
//! non-secret knobs.

use std::path::Path;
use std::time::Duration;

use client::MetricoolClient;
use serde::Deserialize;

pub const TOKEN_VAR: &str = "METRICOOL_USER_TOKEN";
pub const USER_ID_VAR: &str = "METRICOOL_USER_ID";
pub const BASE_URL_VAR: &str = "METRICOOL_BASE_URL";

/// Settings file picked up from the working directory when present.
pub const SETTINGS_FILE: &str = "metricool-mcp.toml";

/// Contents of the settings file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
}

/// `[api]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timezone for scheduling when a call does not name one.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timezone: default_timezone(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    client::DEFAULT_BASE_URL.to_string()
}

fn default_timezone() -> String {
    client::DEFAULT_TIMEZONE.to_string()
}

fn default_timeout_secs() -> u64 {
    client::DEFAULT_TIMEOUT.as_secs()
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse settings from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Process configuration, built once at startup.
pub struct Config {
    pub token: String,
    pub user_id: String,
    pub base_url: String,
    pub timezone: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("base_url", &self.base_url)
            .field("timezone", &self.timezone)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Build from the process environment.
    pub fn from_env(settings: Settings) -> Result<Self, ConfigError> {
        Self::resolve(settings, |key| std::env::var(key).ok())
    }

    /// Build from `settings` plus variables looked up through `lookup`.
    ///
    /// Requires a non-empty token and user id.
    pub fn resolve(
        settings: Settings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = var(TOKEN_VAR);
        let user_id = var(USER_ID_VAR);
        let (token, user_id) = match (token, user_id) {
            (Some(token), Some(user_id)) => (token, user_id),
            (token, user_id) => {
                let missing = [(TOKEN_VAR, token.is_none()), (USER_ID_VAR, user_id.is_none())]
                    .into_iter()
                    .filter(|(_, missing)| *missing)
                    .map(|(name, _)| name)
                    .collect();
                return Err(ConfigError::MissingEnv(missing));
            }
        };

        Ok(Self {
            token,
            user_id,
            base_url: var(BASE_URL_VAR).unwrap_or(settings.api.base_url),
            timezone: settings.api.timezone,
            timeout: Duration::from_secs(settings.api.timeout_secs),
        })
    }

    /// Build the API client described by this configuration.
    pub fn client(&self) -> client::Result<MetricoolClient> {
        MetricoolClient::builder(&self.token, &self.user_id)
            .base_url(&self.base_url)
            .timezone(&self.timezone)
            .timeout(self.timeout)
            .build()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(String),

    #[error("missing required environment variable(s): {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),
}
