//! Storage-backed sink

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    db::store::SubmissionStore,
    models::{NewSubmission, SurveySubmission},
};

use super::{Ack, SinkError, SubmissionSink};

/// Stamps submissions and appends them to the store
#[derive(Clone)]
pub struct StoreSink {
    store: Arc<dyn SubmissionStore>,
}

impl StoreSink {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }

    /// Stamp and append, returning the stored submission
    pub async fn record(&self, submission: NewSubmission) -> Result<SurveySubmission, SinkError> {
        let accepted = submission.accept(Uuid::new_v4(), Utc::now());

        self.store.append(&accepted).await.map_err(|e| {
            error!(submission_id = %accepted.id, error = %e, "Failed to store submission");
            SinkError::Unavailable(e.to_string())
        })?;

        info!(
            submission_id = %accepted.id,
            role = %accepted.role,
            has_file = accepted.attached_file.is_some(),
            "Submission stored"
        );

        Ok(accepted)
    }
}

#[async_trait]
impl SubmissionSink for StoreSink {
    async fn submit(&self, submission: NewSubmission) -> Result<Ack, SinkError> {
        let accepted = self.record(submission).await?;
        Ok(Ack {
            id: accepted.id,
            submitted_at: accepted.submitted_at,
        })
    }
}
