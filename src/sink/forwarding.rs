//! Local append with best-effort remote forwarding

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::models::NewSubmission;

use super::{Ack, RemoteForwarder, SinkError, StoreSink, SubmissionSink};

/// The local store is the system of record. Once the append succeeds the
/// submission is forwarded in the background; a forwarding failure is
/// logged and never touches the stored copy.
#[derive(Clone)]
pub struct ForwardingSink {
    local: StoreSink,
    remote: Option<Arc<RemoteForwarder>>,
}

impl ForwardingSink {
    pub fn new(local: StoreSink, remote: Option<Arc<RemoteForwarder>>) -> Self {
        Self { local, remote }
    }
}

#[async_trait]
impl SubmissionSink for ForwardingSink {
    async fn submit(&self, submission: NewSubmission) -> Result<Ack, SinkError> {
        let accepted = self.local.record(submission).await?;
        let ack = Ack {
            id: accepted.id,
            submitted_at: accepted.submitted_at,
        };

        if let Some(remote) = self.remote.clone() {
            tokio::spawn(async move {
                if let Err(e) = remote.forward(&accepted).await {
                    warn!(
                        submission_id = %accepted.id,
                        url = %remote.url(),
                        error = %e,
                        "Remote forwarding failed, local copy kept"
                    );
                }
            });
        }

        Ok(ack)
    }
}
