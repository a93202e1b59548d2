//! Environment-based application configuration.
//!
//! All required values are read and validated once at startup so a missing variable stops
//! the server before it accepts requests.

use crate::server::{data::firestore::FIRESTORE_API_URL, error::config::ConfigError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_API_URL: &str = "https://discord.com/api";

/// Where guild settings documents live.
#[derive(Debug, Clone, PartialEq)]
pub enum BackingStoreConfig {
    /// Documents in the local SQLite database at `DATABASE_URL`.
    Sqlite,
    /// Documents in Cloud Firestore, identities from Firebase Auth.
    Firestore { project_id: String, api_key: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database holding sessions and, for the `sqlite` store, settings documents.
    pub database_url: String,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,
    pub discord_api_url: String,

    /// Firestore REST base URL, overridable to target the emulator.
    pub firestore_api_url: String,

    /// Namespaces documents when several dashboards share one Firestore project.
    pub app_id: String,
    pub backing_store: BackingStoreConfig,
    /// Pre-issued backing-store token exchanged instead of anonymous sign-in.
    pub initial_auth_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key-value source.
    ///
    /// # Returns
    /// - `Ok(Config)` - Every required value present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset or empty
    /// - `Err(ConfigError::InvalidValue)` - `BACKING_STORE` is not `sqlite` or `firestore`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let backing_store = match lookup("BACKING_STORE")
            .unwrap_or_else(|| "sqlite".to_string())
            .to_lowercase()
            .as_str()
        {
            "sqlite" => BackingStoreConfig::Sqlite,
            "firestore" => BackingStoreConfig::Firestore {
                project_id: required("FIREBASE_PROJECT_ID")?,
                api_key: required("FIREBASE_API_KEY")?,
            },
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "BACKING_STORE".to_string(),
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required("DISCORD_REDIRECT_URL")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            discord_api_url: DISCORD_API_URL.to_string(),
            firestore_api_url: lookup("FIRESTORE_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| FIRESTORE_API_URL.to_string()),
            app_id: required("APP_ID")?,
            backing_store,
            initial_auth_token: lookup("INITIAL_AUTH_TOKEN").filter(|t| !t.is_empty()),
        })
    }
}
