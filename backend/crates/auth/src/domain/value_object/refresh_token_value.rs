//! Refresh Token Value
//!
//! Opaque bearer secret: random bytes, lowercase hex. It carries no claims;
//! owner and expiry live only in the store.

use std::fmt;

use crate::application::token::TokenError;

/// Random bytes behind a refresh token (64 hex characters)
pub const REFRESH_TOKEN_BYTES: usize = 32;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RefreshTokenValue(String);

impl RefreshTokenValue {
    /// Fresh token from the OS CSPRNG.
    pub fn generate() -> Result<Self, TokenError> {
        Self::from_bytes(&platform::crypto::random_bytes(REFRESH_TOKEN_BYTES))
    }

    /// Hex-encode `bytes`. Empty input yields `TokenError::Generation`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TokenError> {
        let encoded = hex::encode(bytes);

        if encoded.is_empty() {
            return Err(TokenError::Generation);
        }

        Ok(Self(encoded))
    }

    /// Value presented by a client (cookie or header). Not validated.
    pub fn from_presented(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for RefreshTokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshTokenValue")
            .field(&"[REDACTED]")
            .finish()
    }
}
