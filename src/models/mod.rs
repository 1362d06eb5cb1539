//! Domain models
//!
//! This module contains the domain models shared by the survey engine,
//! the storage layer and the HTTP handlers.

pub mod admin;
pub mod survey;

pub use admin::*;
pub use survey::*;
