//! Utility functions

pub mod crypto;
pub mod validation;

pub use crypto::{hash_bytes, hash_string};
pub use validation::{is_valid_email, sanitize_string};
