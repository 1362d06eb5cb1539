//! Survey submission repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{FileRef, Role, SurveySubmission, TechChoice},
};

/// Flat row layout of `survey_submissions`
#[derive(Debug, FromRow)]
struct SubmissionRow {
    id: Uuid,
    name: Option<String>,
    email: Option<String>,
    role: String,
    preferred_frontend: Option<String>,
    preferred_frontend_other: Option<String>,
    preferred_backend: Option<String>,
    preferred_backend_other: Option<String>,
    preferred_database: Option<String>,
    preferred_database_other: Option<String>,
    preferred_hosting: Option<String>,
    preferred_hosting_other: Option<String>,
    file_id: Option<String>,
    file_name: Option<String>,
    submitted_at: DateTime<Utc>,
}

fn choice(value: Option<String>, other: Option<String>) -> Option<TechChoice> {
    TechChoice::from_parts(value.as_deref().unwrap_or(""), other.as_deref().unwrap_or(""))
}

impl TryFrom<SubmissionRow> for SurveySubmission {
    type Error = AppError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role)
            .ok_or_else(|| AppError::Database(format!("Unknown role '{}' in submission {}", row.role, row.id)))?;

        let attached_file = match (row.file_id, row.file_name) {
            (Some(id), Some(name)) => Some(FileRef { id, name }),
            _ => None,
        };

        Ok(SurveySubmission {
            id: row.id,
            name: row.name,
            email: row.email,
            role,
            preferred_frontend: choice(row.preferred_frontend, row.preferred_frontend_other),
            preferred_backend: choice(row.preferred_backend, row.preferred_backend_other),
            preferred_database: choice(row.preferred_database, row.preferred_database_other),
            preferred_hosting: choice(row.preferred_hosting, row.preferred_hosting_other),
            attached_file,
            submitted_at: row.submitted_at,
        })
    }
}

/// Repository for survey submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Append a submission
    pub async fn insert(pool: &PgPool, submission: &SurveySubmission) -> AppResult<()> {
        let value = |c: Option<&TechChoice>| c.map(|c| c.value().to_string());
        let other = |c: Option<&TechChoice>| c.and_then(|c| c.other_text()).map(str::to_string);

        sqlx::query(
            r#"
            INSERT INTO survey_submissions (
                id, name, email, role,
                preferred_frontend, preferred_frontend_other,
                preferred_backend, preferred_backend_other,
                preferred_database, preferred_database_other,
                preferred_hosting, preferred_hosting_other,
                file_id, file_name, submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(submission.id)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(submission.role.as_str())
        .bind(value(submission.preferred_frontend.as_ref()))
        .bind(other(submission.preferred_frontend.as_ref()))
        .bind(value(submission.preferred_backend.as_ref()))
        .bind(other(submission.preferred_backend.as_ref()))
        .bind(value(submission.preferred_database.as_ref()))
        .bind(other(submission.preferred_database.as_ref()))
        .bind(value(submission.preferred_hosting.as_ref()))
        .bind(other(submission.preferred_hosting.as_ref()))
        .bind(submission.attached_file.as_ref().map(|f| f.id.clone()))
        .bind(submission.attached_file.as_ref().map(|f| f.name.clone()))
        .bind(submission.submitted_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// All submissions in acceptance order
    pub async fn list_all(pool: &PgPool) -> AppResult<Vec<SurveySubmission>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"SELECT * FROM survey_submissions ORDER BY submitted_at ASC, id ASC"#,
        )
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(SurveySubmission::try_from).collect()
    }

    /// Find submission by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<SurveySubmission>> {
        let row = sqlx::query_as::<_, SubmissionRow>(r#"SELECT * FROM survey_submissions WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        row.map(SurveySubmission::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> SubmissionRow {
        SubmissionRow {
            id: Uuid::new_v4(),
            name: None,
            email: Some("dev@example.com".to_string()),
            role: role.to_string(),
            preferred_frontend: None,
            preferred_frontend_other: None,
            preferred_backend: Some("Other".to_string()),
            preferred_backend_other: Some("Elixir".to_string()),
            preferred_database: Some("PostgreSQL".to_string()),
            preferred_database_other: Some("ignored".to_string()),
            preferred_hosting: None,
            preferred_hosting_other: None,
            file_id: Some("a.pdf".to_string()),
            file_name: Some("cv.pdf".to_string()),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let submission = SurveySubmission::try_from(row("backend")).unwrap();
        assert_eq!(submission.role, Role::Backend);
        assert_eq!(
            submission.preferred_backend,
            Some(TechChoice::Other("Elixir".to_string()))
        );
        assert_eq!(
            submission.preferred_database,
            Some(TechChoice::Known("PostgreSQL".to_string()))
        );
        assert_eq!(submission.attached_file.unwrap().name, "cv.pdf");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(matches!(
            SurveySubmission::try_from(row("designer")),
            Err(AppError::Database(_))
        ));
    }
}
