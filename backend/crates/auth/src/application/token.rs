//! Token Issuer / Validator
//!
//! Access tokens are HS256 JWTs `{iss, iat, exp, sub}`, validated by
//! signature and expiry alone. Refresh tokens are opaque random hex and are
//! only meaningful through the store.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_object::{refresh_token_value::RefreshTokenValue, user_id::UserId};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("Failed to sign access token: {0}")]
    Signing(String),

    #[error("Failed to generate refresh token")]
    Generation,

    #[error("Access token has expired")]
    Expired,

    #[error("Access token is invalid")]
    Invalid,
}

/// HMAC keys derived from the shared JWT secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccessClaims {
    iss: String,
    iat: i64,
    exp: i64,
    sub: String,
}

/// Issues and validates tokens with one set of keys.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    keys: JwtKeys,
    issuer: String,
    access_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(keys: JwtKeys, issuer: impl Into<String>, access_ttl: Duration) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            access_ttl,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Signed access token for `user_id`, issued now.
    pub fn issue_access(&self, user_id: UserId) -> Result<String, TokenError> {
        self.issue_access_at(user_id, Utc::now())
    }

    /// Signed access token with `iat = issued_at`.
    pub fn issue_access_at(
        &self,
        user_id: UserId,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = AccessClaims {
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.access_ttl).timestamp(),
            sub: user_id.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding).map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Failed to encode access token");
            TokenError::Signing(e.to_string())
        })
    }

    /// 32 random bytes, hex encoded.
    pub fn issue_refresh(&self) -> Result<RefreshTokenValue, TokenError> {
        RefreshTokenValue::generate()
    }

    /// Verify signature, issuer and expiry (no leeway) and return the subject.
    pub fn validate_access(&self, token: &str) -> Result<UserId, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["iss", "iat", "exp", "sub"]);

        let data = decode::<AccessClaims>(token, &self.keys.decoding, &validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            },
        )?;

        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenError::Invalid)
    }
}
