//! User Entity
//!
//! Registered account. Created once at registration and not mutated here.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (v4, server-generated)
    pub user_id: UserId,
    /// Display name
    pub name: UserName,
    /// Login key, unique
    pub email: Email,
    /// Argon2id PHC string
    pub password_hash: UserPassword,
    /// Not enforced at login
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New, unverified account with a fresh id.
    pub fn register(name: UserName, email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
