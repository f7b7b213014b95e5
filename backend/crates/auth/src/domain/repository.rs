//! Repository Traits
//!
//! Interfaces for the credential store. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::value_object::{email::Email, refresh_token_value::RefreshTokenValue};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. `AuthError::EmailTaken` on a duplicate email.
    async fn insert_user(&self, user: &User) -> AuthResult<()>;

    /// Find a non-deleted user by email
    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;
}

/// Refresh token repository trait
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    async fn insert_refresh_token(&self, token: &RefreshToken) -> AuthResult<()>;

    /// Delete by token value. Returns rows removed; 0 is not an error.
    async fn delete_refresh_token(&self, token: &RefreshTokenValue) -> AuthResult<u64>;
}

/// Everything the HTTP layer needs from a store.
pub trait AuthStore:
    UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository + RefreshTokenRepository + Clone + Send + Sync + 'static
{
}
