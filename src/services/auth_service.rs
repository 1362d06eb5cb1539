//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    config::{AdminSeedConfig, Config},
    db::repositories::AdminRepository,
    error::{AppError, AppResult},
    models::Admin,
    utils::crypto::hash_string,
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin_id
    pub email: String,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

/// Tokens issued on login or refresh
#[derive(Debug)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Create the configured admin account if it does not exist yet
    pub async fn seed_admin(pool: &PgPool, seed: &AdminSeedConfig) -> AppResult<()> {
        let (Some(email), Some(password)) = (seed.email.as_deref(), seed.password.as_deref()) else {
            return Ok(());
        };

        let password_hash = Self::hash_password(password)?;
        if AdminRepository::create_if_missing(pool, email, &seed.name, &password_hash).await? {
            info!(email = %email, "Seeded admin account");
        }

        Ok(())
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        mut redis: ConnectionManager,
        config: &Config,
        email: &str,
        password: &str,
    ) -> AppResult<(Admin, IssuedTokens)> {
        let admin = AdminRepository::find_by_email(pool, email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &admin.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        AdminRepository::update_last_login(pool, &admin.id).await?;

        let tokens = Self::issue_tokens(&mut redis, &admin, config).await?;

        Ok((admin, tokens))
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh_token(
        pool: &PgPool,
        mut redis: ConnectionManager,
        config: &Config,
        refresh_token: &str,
    ) -> AppResult<IssuedTokens> {
        // Refresh tokens are stored hashed, keyed by owner
        let pattern = format!("refresh_token:*:{}", hash_string(refresh_token));
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut redis)
            .await?;

        let key = keys.first().ok_or(AppError::InvalidToken)?;
        let admin_id = key
            .split(':')
            .nth(1)
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or(AppError::InvalidToken)?;

        let admin = AdminRepository::find_by_id(pool, &admin_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        redis.del::<_, ()>(key).await?;

        Self::issue_tokens(&mut redis, &admin, config).await
    }

    /// Logout, revoking one refresh token or every session of the admin
    pub async fn logout(
        mut redis: ConnectionManager,
        admin_id: &Uuid,
        refresh_token: Option<&str>,
        all_sessions: bool,
    ) -> AppResult<()> {
        if all_sessions {
            let pattern = format!("refresh_token:{}:*", admin_id);
            let keys: Vec<String> = redis::cmd("KEYS")
                .arg(&pattern)
                .query_async(&mut redis)
                .await?;

            for key in keys {
                redis.del::<_, ()>(&key).await?;
            }
        } else if let Some(token) = refresh_token {
            redis
                .del::<_, ()>(Self::refresh_key(admin_id, token))
                .await?;
        }

        Ok(())
    }

    /// Get admin by ID
    pub async fn get_admin_by_id(pool: &PgPool, admin_id: &Uuid) -> AppResult<Option<Admin>> {
        AdminRepository::find_by_id(pool, admin_id).await
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    async fn issue_tokens(
        redis: &mut ConnectionManager,
        admin: &Admin,
        config: &Config,
    ) -> AppResult<IssuedTokens> {
        let (access_token, expires_in) =
            Self::generate_access_token(admin, &config.jwt.secret, config.jwt.expiry_hours)?;
        let refresh_token = Uuid::new_v4().to_string();

        let expiry = config.jwt.refresh_token_expiry_days * 24 * 60 * 60;
        redis
            .set_ex::<_, _, ()>(Self::refresh_key(&admin.id, &refresh_token), "1", expiry as u64)
            .await?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            expires_in,
        })
    }

    fn refresh_key(admin_id: &Uuid, refresh_token: &str) -> String {
        format!("refresh_token:{}:{}", admin_id, hash_string(refresh_token))
    }

    /// Generate access token
    fn generate_access_token(admin: &Admin, secret: &str, expiry_hours: i64) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(expiry_hours);
        let expires_in = expiry_hours * 3600;

        let claims = Claims {
            sub: admin.id.to_string(),
            email: admin.email.clone(),
            name: admin.name.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }
}
