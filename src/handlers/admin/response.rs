//! Admin response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Role, SurveySubmission, TechCategory};

/// Row of the submission list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummaryResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    pub preferred_frontend: Option<String>,
    pub preferred_backend: Option<String>,
    pub preferred_database: Option<String>,
    pub preferred_hosting: Option<String>,
    pub has_attachment: bool,
    pub submitted_at: DateTime<Utc>,
}

impl From<SurveySubmission> for SubmissionSummaryResponse {
    fn from(s: SurveySubmission) -> Self {
        Self {
            id: s.id,
            preferred_frontend: s.preferred_frontend.as_ref().map(|c| c.display()),
            preferred_backend: s.preferred_backend.as_ref().map(|c| c.display()),
            preferred_database: s.preferred_database.as_ref().map(|c| c.display()),
            preferred_hosting: s.preferred_hosting.as_ref().map(|c| c.display()),
            has_attachment: s.attached_file.is_some(),
            name: s.name,
            email: s.email,
            role: s.role,
            submitted_at: s.submitted_at,
        }
    }
}

/// One recorded preference
#[derive(Debug, Serialize)]
pub struct PreferenceResponse {
    pub category: TechCategory,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
    pub label: String,
}

/// Attachment with its download link
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    pub id: String,
    pub name: String,
    pub download_url: String,
}

/// Submission detail view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetailResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    pub preferences: Vec<PreferenceResponse>,
    pub attached_file: Option<AttachmentResponse>,
    pub submitted_at: DateTime<Utc>,
}
