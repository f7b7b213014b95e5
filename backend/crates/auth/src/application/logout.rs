//! Logout Use Case
//!
//! Deletes the presented refresh token. Idempotent: an unknown token is
//! still a successful logout. The token is not checked for expiry.

use std::sync::Arc;

use crate::domain::repository::RefreshTokenRepository;
use crate::domain::value_object::refresh_token_value::RefreshTokenValue;
use crate::error::AuthResult;

pub struct LogoutUseCase<T>
where
    T: RefreshTokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> LogoutUseCase<T>
where
    T: RefreshTokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn execute(&self, token: &RefreshTokenValue) -> AuthResult<u64> {
        let deleted = self.token_repo.delete_refresh_token(token).await?;

        tracing::info!(refresh_tokens_deleted = deleted, "User logged out");

        Ok(deleted)
    }
}
