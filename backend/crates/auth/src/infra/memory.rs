//! In-memory credential store
//!
//! Same contract as the Postgres store, including the duplicate-email
//! error. Used by the router tests and for running without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, refresh_token_value::RefreshTokenValue};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct MemoryStore {
    /// Keyed by normalized email
    users: HashMap<String, User>,
    /// Keyed by token value
    refresh_tokens: HashMap<String, RefreshToken>,
}

#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    store: Arc<Mutex<MemoryStore>>,
    /// When set, inserts fail like an unreachable database
    fail_writes: Arc<AtomicBool>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every subsequent insert fail with a store error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> AuthResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AuthError::Store(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn refresh_token_count(&self) -> usize {
        self.lock().refresh_tokens.len()
    }

    pub fn find_refresh_token(&self, token: &str) -> Option<RefreshToken> {
        self.lock().refresh_tokens.get(token).cloned()
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn insert_user(&self, user: &User) -> AuthResult<()> {
        self.check_writable()?;
        let mut store = self.lock();

        if store.users.contains_key(user.email.as_str()) {
            return Err(AuthError::EmailTaken);
        }

        store
            .users
            .insert(user.email.as_str().to_string(), user.clone());

        Ok(())
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.lock().users.get(email.as_str()).cloned())
    }
}

impl RefreshTokenRepository for MemoryAuthRepository {
    async fn insert_refresh_token(&self, token: &RefreshToken) -> AuthResult<()> {
        self.check_writable()?;
        self.lock()
            .refresh_tokens
            .insert(token.token.as_str().to_string(), token.clone());

        Ok(())
    }

    async fn delete_refresh_token(&self, token: &RefreshTokenValue) -> AuthResult<u64> {
        let removed = self.lock().refresh_tokens.remove(token.as_str());
        Ok(u64::from(removed.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        user_id::UserId,
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use chrono::Duration;

    fn user(email: &str) -> User {
        let raw = RawPassword::new("CorrectHorse1".to_string()).unwrap();
        User::register(
            UserName::new("Test").unwrap(),
            Email::new(email).unwrap(),
            UserPassword::from_raw(&raw).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = MemoryAuthRepository::new();
        repo.insert_user(&user("a@example.com")).await.unwrap();

        let result = repo.insert_user(&user("A@Example.com")).await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_refresh_token_idempotent() {
        let repo = MemoryAuthRepository::new();
        let value = RefreshTokenValue::generate().unwrap();
        let token = RefreshToken::issue(UserId::new(), value.clone(), Duration::days(30));

        repo.insert_refresh_token(&token).await.unwrap();
        assert_eq!(repo.delete_refresh_token(&value).await.unwrap(), 1);
        assert_eq!(repo.delete_refresh_token(&value).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_writes_store_nothing() {
        let repo = MemoryAuthRepository::new();
        repo.set_fail_writes(true);

        let result = repo.insert_user(&user("a@example.com")).await;
        assert!(matches!(result, Err(AuthError::Store(_))));

        let value = RefreshTokenValue::generate().unwrap();
        let token = RefreshToken::issue(UserId::new(), value, Duration::days(30));
        assert!(repo.insert_refresh_token(&token).await.is_err());

        assert_eq!(repo.user_count(), 0);
        assert_eq!(repo.refresh_token_count(), 0);

        repo.set_fail_writes(false);
        assert!(repo.insert_user(&user("a@example.com")).await.is_ok());
    }
}
