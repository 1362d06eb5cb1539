//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_PASSWORD_LENGTH;

/// Admin login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = MAX_PASSWORD_LENGTH))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Logout request (optional, can invalidate specific token)
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to revoke
    pub refresh_token: Option<String>,
    /// Invalidate all sessions if true
    pub all_sessions: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_email_shape() {
        let ok = LoginRequest {
            email: "admin@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "admin".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
