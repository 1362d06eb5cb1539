//! Survey handler implementations

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::{
    constants::messages, error::AppResult, services::SurveyService, state::AppState,
};

use super::{
    request::SurveyFormData,
    response::{SurveyOptionsResponse, SurveySubmittedResponse},
};

/// Submit a survey as a multipart form
pub async fn submit_survey(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<SurveySubmittedResponse>)> {
    let form = SurveyFormData::from_multipart(multipart).await?;

    let ack = SurveyService::submit(state.sink(), state.files(), form).await?;

    Ok((
        StatusCode::CREATED,
        Json(SurveySubmittedResponse {
            id: ack.id,
            message: messages::SUBMIT_SUCCESS.to_string(),
            submitted_at: ack.submitted_at,
        }),
    ))
}

/// Known options for every form choice
pub async fn get_options() -> Json<SurveyOptionsResponse> {
    Json(SurveyOptionsResponse::current())
}
