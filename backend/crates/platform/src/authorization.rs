//! `Authorization` header parsing

use axum::http::{HeaderMap, header};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Authorization header is missing")]
    Missing,

    #[error("Authorization scheme is not Bearer")]
    InvalidScheme,

    #[error("Bearer token is empty")]
    EmptyToken,
}

/// Token following the exact, case-sensitive `Bearer ` prefix.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::InvalidScheme)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::InvalidScheme)?;

    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }

    Ok(token.to_string())
}
