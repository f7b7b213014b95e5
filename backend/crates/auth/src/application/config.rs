//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared behind an `Arc`.

use chrono::Duration;

use platform::cookie::CookieConfig;
pub use platform::cookie::SameSite;

use crate::application::token::{JwtKeys, TokenError, TokenIssuer};

/// `iss` claim of every access token
pub const TOKEN_ISSUER: &str = "expense";

pub const ACCESS_COOKIE_NAME: &str = "access_token";
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access token issuer/validator
    pub tokens: TokenIssuer,
    /// Stored refresh token lifetime (30 days)
    pub refresh_token_ttl: Duration,
    /// `access_token` cookie, 15 minutes
    pub access_cookie: CookieConfig,
    /// `refresh_token` cookie, 30 days
    pub refresh_cookie: CookieConfig,
}

impl AuthConfig {
    /// Access token lifetime
    const ACCESS_TOKEN_TTL_MINUTES: i64 = 5;
    /// Refresh token lifetime, store and cookie
    const REFRESH_TOKEN_TTL_DAYS: i64 = 30;
    /// Access cookie Max-Age. Outlives the token itself.
    const ACCESS_COOKIE_TTL_SECS: i64 = 15 * 60;

    pub fn new(jwt_secret: &str, cookie_domain: &str) -> Result<Self, TokenError> {
        let keys = JwtKeys::from_secret(jwt_secret.as_bytes())?;
        let refresh_token_ttl = Duration::days(Self::REFRESH_TOKEN_TTL_DAYS);

        Ok(Self {
            tokens: TokenIssuer::new(
                keys,
                TOKEN_ISSUER,
                Duration::minutes(Self::ACCESS_TOKEN_TTL_MINUTES),
            ),
            refresh_token_ttl,
            access_cookie: CookieConfig::new(ACCESS_COOKIE_NAME)
                .with_domain(cookie_domain)
                .with_max_age(Self::ACCESS_COOKIE_TTL_SECS),
            refresh_cookie: CookieConfig::new(REFRESH_COOKIE_NAME)
                .with_domain(cookie_domain)
                .with_max_age(refresh_token_ttl.num_seconds()),
        })
    }

    /// Override the SameSite policy on both cookies
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.access_cookie = self.access_cookie.with_same_site(same_site);
        self.refresh_cookie = self.refresh_cookie.with_same_site(same_site);
        self
    }
}
