//! Application Layer
//!
//! Use cases, token issuing and configuration.

pub mod config;
pub mod login;
pub mod logout;
pub mod register;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::{JwtKeys, TokenError, TokenIssuer};
