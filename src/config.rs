//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ADMIN_NAME, DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_FORWARD_TIMEOUT_SECS,
    DEFAULT_JWT_EXPIRY_HOURS, DEFAULT_PUBLIC_BASE_URL, DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub forward: ForwardConfig,
    pub admin: AdminSeedConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Base URL clients use to reach this server, for download links
    pub public_base_url: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
    pub refresh_token_expiry_days: i64,
}

/// Attachment storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub uploads_path: PathBuf,
}

/// Remote collector forwarding. Disabled when no URL is set.
#[derive(Debug, Clone)]
pub struct ForwardConfig {
    pub url: Option<String>,
    pub timeout: Duration,
}

/// Admin account created at startup when it does not exist yet
#[derive(Debug, Clone)]
pub struct AdminSeedConfig {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            forward: ForwardConfig::from_env()?,
            admin: AdminSeedConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| DEFAULT_JWT_EXPIRY_HOURS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_EXPIRY_HOURS".to_string()))?,
            refresh_token_expiry_days: env::var("REFRESH_TOKEN_EXPIRY_DAYS")
                .unwrap_or_else(|_| DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REFRESH_TOKEN_EXPIRY_DAYS".to_string()))?,
        })
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            uploads_path: PathBuf::from(
                env::var("UPLOADS_PATH").unwrap_or_else(|_| "/data/uploads".to_string()),
            ),
        })
    }
}

impl ForwardConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secs: u64 = env::var("FORWARD_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_FORWARD_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("FORWARD_TIMEOUT_SECS".to_string()))?;

        Ok(Self {
            url: env::var("FORWARD_URL").ok().filter(|u| !u.trim().is_empty()),
            timeout: Duration::from_secs(secs),
        })
    }
}

impl AdminSeedConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let email = env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty());
        let password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());
        if email.is_some() != password.is_some() {
            return Err(ConfigError::InvalidValue(
                "ADMIN_EMAIL and ADMIN_PASSWORD must be set together".to_string(),
            ));
        }

        Ok(Self {
            email,
            password,
            name: env::var("ADMIN_NAME").unwrap_or_else(|_| DEFAULT_ADMIN_NAME.to_string()),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
