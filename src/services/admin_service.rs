//! Admin service
//!
//! Read side of the survey: the whole collection is loaded from the store
//! and run through the query engine or the stats aggregation.

use uuid::Uuid;

use crate::{
    db::store::SubmissionStore,
    error::{AppError, AppResult},
    handlers::admin::response::{
        AttachmentResponse, PreferenceResponse, SubmissionDetailResponse, SubmissionSummaryResponse,
    },
    models::SurveySubmission,
    services::FileService,
    survey::{query, DashboardStats, QueryPage, SubmissionFilter},
};

/// Admin service for browsing collected submissions
pub struct AdminService;

impl AdminService {
    /// Filtered, paginated submission list
    pub async fn list_submissions(
        store: &dyn SubmissionStore,
        filter: &SubmissionFilter,
        page: usize,
    ) -> AppResult<QueryPage<SubmissionSummaryResponse>> {
        let all = Self::load_all(store).await?;
        Ok(query(&all, filter, page).map(SubmissionSummaryResponse::from))
    }

    /// Full details of one submission, with a download link for its attachment
    pub async fn get_submission(
        store: &dyn SubmissionStore,
        files: &FileService,
        id: &Uuid,
    ) -> AppResult<SubmissionDetailResponse> {
        let submission = store
            .find(id)
            .await
            .map_err(|e| AppError::Query(e.to_string()))?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        Ok(Self::detail(submission, files))
    }

    /// Dashboard statistics over every submission
    pub async fn stats(store: &dyn SubmissionStore) -> AppResult<DashboardStats> {
        let all = Self::load_all(store).await?;
        Ok(DashboardStats::compute(&all))
    }

    async fn load_all(store: &dyn SubmissionStore) -> AppResult<Vec<SurveySubmission>> {
        store
            .list_all()
            .await
            .map_err(|e| AppError::Query(e.to_string()))
    }

    fn detail(submission: SurveySubmission, files: &FileService) -> SubmissionDetailResponse {
        let preferences = submission
            .preferences()
            .map(|(category, choice)| PreferenceResponse {
                category,
                value: choice.value().to_string(),
                other: choice.other_text().map(str::to_string),
                label: choice.display(),
            })
            .collect();

        let attached_file = submission.attached_file.map(|file| AttachmentResponse {
            download_url: files.build_download_url(&file.id),
            id: file.id,
            name: file.name,
        });

        SubmissionDetailResponse {
            id: submission.id,
            name: submission.name,
            email: submission.email,
            role: submission.role,
            preferences,
            attached_file,
            submitted_at: submission.submitted_at,
        }
    }
}
