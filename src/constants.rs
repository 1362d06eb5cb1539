//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default public base URL used to build download links
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Maximum admin password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Default name given to the seeded admin account
pub const DEFAULT_ADMIN_NAME: &str = "Admin";

// =============================================================================
// SURVEY FORM
// =============================================================================

/// Sentinel value selecting the free-text companion of a preference
pub const OTHER_CHOICE: &str = "Other";

/// Known technology options per category
pub mod tech_options {
    pub const FRONTEND: &[&str] = &["React", "Vue", "Angular"];
    pub const BACKEND: &[&str] = &["Node.js", "Python", "Go"];
    pub const DATABASE: &[&str] = &["MongoDB", "PostgreSQL", "CosmosDB"];
    pub const HOSTING: &[&str] = &["Vercel", "Azure", "Netlify"];
}

/// Validation messages shown next to form fields
pub mod messages {
    pub const ROLE_REQUIRED: &str = "Role is required";
    pub const ROLE_INVALID: &str = "Invalid role";
    pub const FRONTEND_REQUIRED: &str = "Frontend tech is required";
    pub const BACKEND_REQUIRED: &str = "Backend tech is required";
    pub const DATABASE_REQUIRED: &str = "Database is required";
    pub const HOSTING_REQUIRED: &str = "Hosting is required";
    pub const EMAIL_INVALID: &str = "Invalid email";

    pub const SUBMIT_SUCCESS: &str = "Survey submitted successfully!";
    pub const SUBMIT_FAILURE: &str = "Failed to submit survey.";
}

/// Maximum length of a free-text survey field
pub const MAX_TEXT_FIELD_LENGTH: usize = 256;

// =============================================================================
// ATTACHMENTS
// =============================================================================

/// Only PDF attachments are accepted
pub const ATTACHMENT_CONTENT_TYPE: &str = "application/pdf";

/// Accepted attachment file extension
pub const ATTACHMENT_EXTENSION: &str = "pdf";

/// Maximum attachment size in bytes (10 MB)
pub const MAX_ATTACHMENT_SIZE: usize = 10 * 1024 * 1024;

/// Request body limit for the survey intake (attachment plus text parts)
pub const MAX_SURVEY_BODY_SIZE: usize = MAX_ATTACHMENT_SIZE + 64 * 1024;

// =============================================================================
// REMOTE FORWARDING
// =============================================================================

/// Default timeout for forwarding a submission to the remote collector
pub const DEFAULT_FORWARD_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 5;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Survey endpoint - max requests
    pub const SURVEY_MAX_REQUESTS: i64 = 10;
    /// Survey endpoint - window in seconds
    pub const SURVEY_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Page size of the admin submission list
pub const SURVEY_PAGE_SIZE: usize = 5;
