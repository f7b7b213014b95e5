//! User Password Value Object
//!
//! Domain wrappers over `platform::password`: [`RawPassword`] for user input
//! and [`UserPassword`] for the stored Argon2id hash.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("MySecurePass123!".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw).unwrap();
//! assert!(hashed.verify(&raw).unwrap());
//! ```

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Normalize and check against the password policy.
    ///
    /// Policy violations are `AuthError::Validation` with a user-facing message.
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text =
            ClearTextPassword::new(raw).map_err(|e| AuthError::Validation(e.to_string()))?;

        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id PHC string as stored in `users.hashed_password`.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password. CPU-bound.
    pub fn from_raw(raw: &RawPassword) -> AuthResult<Self> {
        let hashed = raw.inner().hash().map_err(hash_error)?;
        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(hash_error)?;
        Ok(Self(hashed))
    }

    /// Hash to verify against when no account matches. Never matches a
    /// registered password.
    pub fn dummy() -> AuthResult<Self> {
        let hashed = HashedPassword::dummy().map_err(hash_error)?;
        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// `Ok(false)` on mismatch, `Err` when the stored hash is unusable. CPU-bound.
    pub fn verify(&self, raw: &RawPassword) -> AuthResult<bool> {
        self.0.verify(raw.inner()).map_err(hash_error)
    }
}

fn hash_error(err: PasswordHashError) -> AuthError {
    AuthError::Internal(err.to_string())
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
