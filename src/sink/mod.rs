//! Submission sinks
//!
//! A sink records a validated submission and stamps it with its identity and
//! acceptance time. The storage-backed sink is the system of record; the
//! remote forwarder relays submissions to an external collector.

pub mod forwarding;
pub mod remote;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::NewSubmission;

pub use forwarding::ForwardingSink;
pub use remote::RemoteForwarder;
pub use store::StoreSink;

/// Acknowledgement returned once a submission is recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

/// Sink failures. The submission is lost for this attempt only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("Submission sink unavailable: {0}")]
    Unavailable(String),
}

/// Records accepted survey submissions
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, submission: NewSubmission) -> Result<Ack, SinkError>;
}

#[async_trait]
impl<T: SubmissionSink + ?Sized> SubmissionSink for Arc<T> {
    async fn submit(&self, submission: NewSubmission) -> Result<Ack, SinkError> {
        (**self).submit(submission).await
    }
}
