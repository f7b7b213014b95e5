//! Platform Crate - Technical Infrastructure
//!
//! Shared technical building blocks with no domain knowledge:
//! - Password hashing (Argon2id)
//! - CSPRNG bytes
//! - Cookie building and parsing
//! - `Authorization: Bearer` parsing

pub mod authorization;
pub mod cookie;
pub mod crypto;
pub mod password;
