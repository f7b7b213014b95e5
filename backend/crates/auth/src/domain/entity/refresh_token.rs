//! Refresh Token Entity
//!
//! Persisted server-side half of a login. Deleted by value at logout.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{refresh_token_value::RefreshTokenValue, user_id::UserId};

#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub user_id: UserId,
    pub token: RefreshTokenValue,
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Token owned by `user_id`, expiring `ttl` from now.
    pub fn issue(user_id: UserId, token: RefreshTokenValue, ttl: Duration) -> Self {
        Self {
            user_id,
            token,
            expires_at: Utc::now() + ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_expiry() {
        let before = Utc::now();
        let token = RefreshToken::issue(
            UserId::new(),
            RefreshTokenValue::from_presented("t"),
            Duration::days(30),
        );

        assert!(token.expires_at >= before + Duration::days(30));
        assert!(token.expires_at <= Utc::now() + Duration::days(30));
    }
}
