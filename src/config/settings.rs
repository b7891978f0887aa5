//! Application settings loading from config.toml and the environment
//!
//! Every section has working defaults, so the site runs in demo mode with no file and no
//! environment at all: local storage only, notifications disabled. A `config.toml` may
//! set any subset of fields, and environment variables (usually from `.env`) override it.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the optional settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Local fallback store
    pub storage: StorageConfig,
    /// Hosted relational backend
    pub remote: RemoteConfig,
    /// Outbound email
    pub notifications: NotificationConfig,
}

/// Where the local fallback store keeps its data
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// `SeaORM` connection string for the local key/value table
    pub database_url: String,
    /// Prefix of every collection key
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            key_prefix: "zentra_".to_string(),
        }
    }
}

/// Endpoint and key of the hosted backend. Both must be present for remote mode.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: Option<String>,
    /// Anonymous access key
    pub anon_key: Option<String>,
}

impl RemoteConfig {
    /// True only when both the URL and the key are non-blank.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        non_blank(self.url.as_deref()) && non_blank(self.anon_key.as_deref())
    }
}

/// Mail API settings for booking and review notifications
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Bearer key for the mail API; notifications are skipped without it
    pub api_key: Option<String>,
    /// Sender address
    pub from_email: String,
    /// Recipient address
    pub to_email: String,
    /// Display name put in front of the sender address
    pub sender_name: String,
    /// Mail API endpoint
    pub endpoint: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_email: "noreply@zentraholdings.com".to_string(),
            to_email: "admin@zentraholdings.com".to_string(),
            sender_name: "Zentra Holdings".to_string(),
            endpoint: "https://api.resend.com/emails".to_string(),
        }
    }
}

impl NotificationConfig {
    /// True when an API key is present.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        non_blank(self.api_key.as_deref())
    }

    /// `From` header value, e.g. `Zentra Holdings <noreply@zentraholdings.com>`.
    #[must_use]
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.sender_name, self.from_email)
    }
}

impl AppConfig {
    /// Applies environment overrides read through `lookup`.
    ///
    /// Recognized variables: `DATABASE_URL`, `SUPABASE_URL`, `SUPABASE_ANON_KEY`,
    /// `RESEND_API_KEY`, `RESEND_FROM_EMAIL`, `RESEND_TO_EMAIL`. Blank values are ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = get("DATABASE_URL") {
            self.storage.database_url = url;
        }
        if let Some(url) = get("SUPABASE_URL") {
            self.remote.url = Some(url);
        }
        if let Some(key) = get("SUPABASE_ANON_KEY") {
            self.remote.anon_key = Some(key);
        }
        if let Some(key) = get("RESEND_API_KEY") {
            self.notifications.api_key = Some(key);
        }
        if let Some(from) = get("RESEND_FROM_EMAIL") {
            self.notifications.from_email = from;
        }
        if let Some(to) = get("RESEND_TO_EMAIL") {
            self.notifications.to_email = to;
        }
        self
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }
}

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads `./config.toml` when present, falls back to defaults, then applies the environment.
pub fn load_app_configuration() -> Result<AppConfig> {
    let base = if Path::new(DEFAULT_CONFIG_PATH).exists() {
        load_config(DEFAULT_CONFIG_PATH)?
    } else {
        tracing::info!("No {DEFAULT_CONFIG_PATH} found, using built-in defaults");
        AppConfig::default()
    };
    Ok(base.with_env_overrides())
}
