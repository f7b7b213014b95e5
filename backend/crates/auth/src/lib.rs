//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Register/login/logout use cases, token issuer, config
//! - `infra/` - Postgres and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router, access gate
//!
//! ## Features
//! - Registration with email + password
//! - Login issuing a 5-minute HS256 access token and a 30-day opaque
//!   refresh token, delivered in the body and as cookies
//! - Logout deleting the stored refresh token
//! - Access gate reading the token from a cookie or a bearer header
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B length policy)
//! - Access tokens are stateless; refresh tokens live only in the store
//! - Login and token failures use one generic message each

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::middleware::{AccessGate, AuthenticatedUser, require_access_token};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
