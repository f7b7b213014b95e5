//! Value Object Module

pub mod email;
pub mod refresh_token_value;
pub mod user_id;
pub mod user_name;
pub mod user_password;
