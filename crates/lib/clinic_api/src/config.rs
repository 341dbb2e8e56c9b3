//! API server configuration.

use thiserror::Error;

/// Environment variable holding the token signing secret.
pub const ACCESS_TOKEN_ENV: &str = "ACCESS_TOKEN";

/// Configuration errors, reported before the server starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingSecret(&'static str),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:3000").
    pub bind_addr: String,
    /// PostgreSQL connection URL; `None` runs on the in-memory store.
    pub database_url: Option<String>,
    /// JWT signing secret.
    pub jwt_secret: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable                  | Default                          |
    /// |---------------------------|----------------------------------|
    /// | `BIND_ADDR`               | `0.0.0.0:$PORT`                  |
    /// | `PORT`                    | `3000`                           |
    /// | `DATABASE_URL` / `DB_URI` | none (in-memory store)           |
    /// | `ACCESS_TOKEN`            | required, startup fails without  |
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| {
            let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
            format!("0.0.0.0:{port}")
        });
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("DB_URI"))
            .ok()
            .filter(|url| !url.is_empty());
        let jwt_secret = require_secret(std::env::var(ACCESS_TOKEN_ENV).ok())?;
        Ok(Self {
            bind_addr,
            database_url,
            jwt_secret,
        })
    }
}

/// Reject an absent or blank signing secret.
pub fn require_secret(value: Option<String>) -> Result<String, ConfigError> {
    value
        .filter(|s| !s.trim().is_empty())
        .ok_or(ConfigError::MissingSecret(ACCESS_TOKEN_ENV))
}
