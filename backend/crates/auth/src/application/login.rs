//! Login Use Case
//!
//! Verifies credentials, then issues an access token and a persisted
//! refresh token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, refresh_token_value::RefreshTokenValue, user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: RefreshTokenValue,
}

pub struct LoginUseCase<U, T>
where
    U: UserRepository,
    T: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> LoginUseCase<U, T>
where
    U: UserRepository,
    T: RefreshTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(&input.email)?;

        if input.password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        // A password that could never have been registered cannot match
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self.user_repo.find_user_by_email(&email).await?;

        // Unknown emails still pay for one verification
        let password_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => UserPassword::dummy()?,
        };
        let password_valid =
            tokio::task::spawn_blocking(move || password_hash.verify(&raw_password)).await??;

        let user = match user {
            Some(user) if password_valid => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let access_token = self.config.tokens.issue_access(user.user_id)?;
        let refresh_token = self.config.tokens.issue_refresh()?;

        let stored = RefreshToken::issue(
            user.user_id,
            refresh_token.clone(),
            self.config.refresh_token_ttl,
        );
        self.token_repo.insert_refresh_token(&stored).await?;

        tracing::info!(
            user_id = %user.user_id,
            refresh_expires_at = %stored.expires_at,
            "User logged in"
        );

        Ok(LoginOutput {
            user_id: user.user_id,
            access_token,
            refresh_token,
        })
    }
}
