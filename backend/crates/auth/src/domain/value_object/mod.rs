//! Value Object Module

pub mod claims;
pub mod signing_secret;
pub mod user_name;
