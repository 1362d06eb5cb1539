//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod admin_repo;
pub mod submission_repo;

pub use admin_repo::AdminRepository;
pub use submission_repo::SubmissionRepository;
