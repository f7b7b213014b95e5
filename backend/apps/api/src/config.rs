//! Process configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).
//! A missing required variable is a fatal startup error.

use anyhow::Context;
use auth::AuthConfig;

const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// CORS allow-list. Empty means no cross-origin access.
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{key} must be set in environment"))
        };

        let port = required("APP_PORT")?
            .trim()
            .parse::<u16>()
            .context("APP_PORT must be a valid port number")?;
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let cookie_domain = required("COOKIE_DOMAIN")?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_DATABASE_MAX_CONNECTIONS,
        };

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let auth = AuthConfig::new(&jwt_secret, cookie_domain.trim())
            .context("Invalid auth configuration")?;

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            frontend_origins,
            auth,
        })
    }
}
