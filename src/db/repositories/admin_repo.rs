//! Admin repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Admin};

/// Repository for admin account operations
pub struct AdminRepository;

impl AdminRepository {
    /// Create an admin account, leaving an existing account with the same email untouched
    pub async fn create_if_missing(
        pool: &PgPool,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO admins (email, name, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find admin by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(r#"SELECT * FROM admins WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(admin)
    }

    /// Find admin by email (case-insensitive)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> AppResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(r#"SELECT * FROM admins WHERE LOWER(email) = LOWER($1)"#)
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(admin)
    }

    /// Update last login timestamp
    pub async fn update_last_login(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"UPDATE admins SET last_login_at = NOW() WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
