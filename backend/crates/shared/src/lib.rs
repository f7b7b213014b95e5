//! Shared Kernel - Vocabulary shared by every backend crate
//!
//! Keeps only what has the same meaning everywhere:
//! - The unified error type and its HTTP classification
//! - Typed identifiers
//! - The `{message, data}` JSON envelope used by all responses

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod response;
