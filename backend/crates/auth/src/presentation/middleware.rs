//! Access token gate
//!
//! Finds the access token in an ordered list of sources (cookie first, then
//! `Authorization: Bearer`), validates it, and stores the caller's identity
//! in the request extensions.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use platform::authorization::extract_bearer_token;
use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Token sources
// ============================================================================

/// One place a token may be carried.
pub trait TokenSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// The token, or `None` when this source carries nothing usable.
    fn extract(&self, headers: &HeaderMap) -> Option<String>;
}

/// Named cookie. An empty value counts as absent.
pub struct CookieSource {
    cookie_name: String,
}

impl CookieSource {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }
}

impl TokenSource for CookieSource {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.cookie_name).filter(|value| !value.is_empty())
    }
}

/// `Authorization: Bearer <token>`. Missing header, other schemes and an
/// empty token are all "no token".
pub struct BearerSource;

impl TokenSource for BearerSource {
    fn name(&self) -> &'static str {
        "bearer"
    }

    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        extract_bearer_token(headers).ok()
    }
}

/// Sources in priority order. The first one that yields a token wins.
#[derive(Clone)]
pub struct TokenSources(Arc<[Box<dyn TokenSource>]>);

impl TokenSources {
    pub fn new(sources: Vec<Box<dyn TokenSource>>) -> Self {
        Self(sources.into())
    }

    /// Cookie `cookie_name`, then the bearer header.
    pub fn cookie_then_bearer(cookie_name: &str) -> Self {
        Self::new(vec![Box::new(CookieSource::new(cookie_name)), Box::new(BearerSource)])
    }

    pub fn find(&self, headers: &HeaderMap) -> Option<String> {
        self.0.iter().find_map(|source| {
            let token = source.extract(headers)?;
            tracing::trace!(source = source.name(), "Token found");
            Some(token)
        })
    }
}

// ============================================================================
// Gate
// ============================================================================

/// Identity of the caller, set by [`require_access_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[derive(Clone)]
pub struct AccessGate {
    config: Arc<AuthConfig>,
    sources: TokenSources,
}

impl AccessGate {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        let sources = TokenSources::cookie_then_bearer(&config.access_cookie.name);
        Self { config, sources }
    }

    /// `MissingToken` when no source has a token; every validation failure
    /// is the same `InvalidToken`.
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthResult<AuthenticatedUser> {
        let token = self.sources.find(headers).ok_or(AuthError::MissingToken)?;

        let user_id = self.config.tokens.validate_access(&token).map_err(|e| {
            tracing::debug!(reason = %e, "Access token rejected");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser { user_id })
    }
}

/// Middleware for protected routes. Use with `middleware::from_fn_with_state`.
pub async fn require_access_token(
    State(gate): State<AccessGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = gate.authenticate(req.headers())?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::MissingToken)
    }
}
