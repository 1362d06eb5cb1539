//! Submission storage collaborator
//!
//! The sink appends through [`SubmissionStore`] and the admin area reads the
//! whole collection back. Storage is append-only.

use std::sync::RwLock;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::SubmissionRepository,
    error::{AppError, AppResult},
    models::SurveySubmission,
};

/// Append-only collection of accepted submissions
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Append a submission. No deduplication or identity check is performed.
    async fn append(&self, submission: &SurveySubmission) -> AppResult<()>;

    /// All submissions, oldest first
    async fn list_all(&self) -> AppResult<Vec<SurveySubmission>>;

    async fn find(&self, id: &Uuid) -> AppResult<Option<SurveySubmission>>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn append(&self, submission: &SurveySubmission) -> AppResult<()> {
        SubmissionRepository::insert(&self.pool, submission).await
    }

    async fn list_all(&self) -> AppResult<Vec<SurveySubmission>> {
        SubmissionRepository::list_all(&self.pool).await
    }

    async fn find(&self, id: &Uuid) -> AppResult<Option<SurveySubmission>> {
        SubmissionRepository::find_by_id(&self.pool, id).await
    }
}

/// Process-local store
#[derive(Default)]
pub struct MemoryStore {
    submissions: RwLock<Vec<SurveySubmission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submissions(submissions: Vec<SurveySubmission>) -> Self {
        Self {
            submissions: RwLock::new(submissions),
        }
    }

    pub fn len(&self) -> usize {
        self.submissions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Internal(anyhow::anyhow!("Submission store lock poisoned"))
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn append(&self, submission: &SurveySubmission) -> AppResult<()> {
        self.submissions
            .write()
            .map_err(poisoned)?
            .push(submission.clone());
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<SurveySubmission>> {
        Ok(self.submissions.read().map_err(poisoned)?.clone())
    }

    async fn find(&self, id: &Uuid) -> AppResult<Option<SurveySubmission>> {
        Ok(self
            .submissions
            .read()
            .map_err(poisoned)?
            .iter()
            .find(|s| s.id == *id)
            .cloned())
    }
}
