//! Remote collector forwarding
//!
//! Submissions are posted as a multipart form: one text part per field and
//! the attachment, if any, as a separate binary part named `file`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    constants::ATTACHMENT_CONTENT_TYPE,
    models::{NewSubmission, SurveySubmission, TechCategory},
    services::FileService,
};

use super::{Ack, SinkError, SubmissionSink};

/// Posts submissions to an external collector
#[derive(Clone)]
pub struct RemoteForwarder {
    client: reqwest::Client,
    url: String,
    files: Option<Arc<FileService>>,
}

impl RemoteForwarder {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SinkError::Unavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            files: None,
        })
    }

    /// Attach the file store so attachments travel with the submission
    pub fn with_files(mut self, files: Arc<FileService>) -> Self {
        self.files = Some(files);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Forward an accepted submission
    pub async fn forward(&self, submission: &SurveySubmission) -> Result<(), SinkError> {
        let mut form = Form::new();
        for (key, value) in form_fields(submission) {
            form = form.text(key, value);
        }

        if let (Some(file), Some(files)) = (&submission.attached_file, &self.files) {
            let bytes = files
                .read(&file.id)
                .await
                .map_err(|e| SinkError::Unavailable(format!("Attachment unavailable: {}", e)))?;
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(ATTACHMENT_CONTENT_TYPE)
                .map_err(|e| SinkError::Unavailable(e.to_string()))?;
            form = form.part("file", part);
        }

        debug!(submission_id = %submission.id, url = %self.url, "Forwarding submission");

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(submission_id = %submission.id, error = %e, "Remote collector unreachable");
                SinkError::Unavailable(format!("Remote collector unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(submission_id = %submission.id, status = %status.as_u16(), "Remote collector rejected submission");
            return Err(SinkError::Unavailable(format!(
                "Remote collector returned status {}",
                status.as_u16()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl SubmissionSink for RemoteForwarder {
    async fn submit(&self, submission: NewSubmission) -> Result<Ack, SinkError> {
        let accepted = submission.accept(Uuid::new_v4(), Utc::now());
        self.forward(&accepted).await?;
        Ok(Ack {
            id: accepted.id,
            submitted_at: accepted.submitted_at,
        })
    }
}

/// Field-name to value pairs of the remote payload
pub fn form_fields(submission: &SurveySubmission) -> Vec<(String, String)> {
    let mut fields = vec![
        ("id".to_string(), submission.id.to_string()),
        ("role".to_string(), submission.role.as_str().to_string()),
        ("submittedAt".to_string(), submission.submitted_at.to_rfc3339()),
    ];
    if let Some(name) = &submission.name {
        fields.push(("name".to_string(), name.clone()));
    }
    if let Some(email) = &submission.email {
        fields.push(("email".to_string(), email.clone()));
    }

    for category in TechCategory::ALL {
        let Some(choice) = submission.preference(category) else {
            continue;
        };
        let key = category.field().as_str();
        fields.push((key.to_string(), choice.value().to_string()));
        if let Some(other) = choice.other_text() {
            fields.push((format!("{}Other", key), other.to_string()));
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, TechChoice};

    fn submission() -> SurveySubmission {
        NewSubmission {
            name: None,
            email: Some("carol@example.com".to_string()),
            role: Role::Frontend,
            preferred_frontend: Some(TechChoice::Other("Solid".to_string())),
            preferred_backend: None,
            preferred_database: None,
            preferred_hosting: Some(TechChoice::Known("Netlify".to_string())),
            attached_file: None,
        }
        .accept(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_form_fields_expand_other_companion() {
        let fields = form_fields(&submission());
        let get = |k: &str| {
            fields
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("role"), Some("frontend"));
        assert_eq!(get("preferredFrontend"), Some("Other"));
        assert_eq!(get("preferredFrontendOther"), Some("Solid"));
        assert_eq!(get("preferredHosting"), Some("Netlify"));
        assert_eq!(get("preferredHostingOther"), None);
        assert_eq!(get("preferredBackend"), None);
        assert_eq!(get("name"), None);
    }

    #[tokio::test]
    async fn test_unreachable_collector_is_unavailable() {
        // Nothing listens on the discard port locally
        let forwarder =
            RemoteForwarder::new("http://127.0.0.1:9/collect", Duration::from_secs(2)).unwrap();
        let err = forwarder.forward(&submission()).await.unwrap_err();
        assert!(matches!(err, SinkError::Unavailable(_)));
    }
}
