//! Admin handler implementations

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::ATTACHMENT_CONTENT_TYPE,
    error::AppResult,
    middleware::auth::AuthenticatedAdmin,
    services::AdminService,
    state::AppState,
    survey::{DashboardStats, QueryPage},
};

use super::{
    request::ListSubmissionsQuery,
    response::{SubmissionDetailResponse, SubmissionSummaryResponse},
};

/// List submissions with search, filters and pagination
pub async fn list_submissions(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<QueryPage<SubmissionSummaryResponse>>> {
    query.validate()?;

    let page = AdminService::list_submissions(
        state.store(),
        &query.filter(),
        query.page.unwrap_or(1),
    )
    .await?;

    tracing::debug!(
        admin_id = %admin.id,
        total = page.total,
        page = page.page,
        "Listed submissions"
    );

    Ok(Json(page))
}

/// Get one submission
pub async fn get_submission(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionDetailResponse>> {
    let detail = AdminService::get_submission(state.store(), state.files(), &id).await?;
    Ok(Json(detail))
}

/// Dashboard statistics
pub async fn get_stats(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
) -> AppResult<Json<DashboardStats>> {
    let stats = AdminService::stats(state.store()).await?;
    Ok(Json(stats))
}

/// Download an attachment
pub async fn download_file(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Path(file_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let bytes = state.files().read(&file_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, ATTACHMENT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_id),
            ),
        ],
        bytes,
    ))
}
