//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod file_service;
pub mod survey_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use file_service::FileService;
pub use survey_service::SurveyService;
