//! Authentication handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedAdmin,
    services::AuthService,
    state::AppState,
};

use super::{
    request::{LoginRequest, LogoutRequest, RefreshTokenRequest},
    response::{AuthResponse, CurrentAdminResponse, LogoutResponse, RefreshResponse},
};

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (admin, tokens) = AuthService::login(
        state.db(),
        state.redis(),
        state.config(),
        &payload.email,
        &payload.password,
    )
    .await?;

    tracing::info!(admin_id = %admin.id, "Admin logged in");

    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expires_in,
        user: admin.into(),
    }))
}

/// Refresh access token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<RefreshResponse>> {
    payload.validate()?;

    let tokens = AuthService::refresh_token(
        state.db(),
        state.redis(),
        state.config(),
        &payload.refresh_token,
    )
    .await?;

    Ok(Json(RefreshResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expires_in,
    }))
}

/// Logout (invalidate tokens)
pub async fn logout(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    payload: Option<Json<LogoutRequest>>,
) -> AppResult<Json<LogoutResponse>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    AuthService::logout(
        state.redis(),
        &admin.id,
        payload.refresh_token.as_deref(),
        payload.all_sessions.unwrap_or(false),
    )
    .await?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Get current authenticated admin
pub async fn get_current_admin(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
) -> AppResult<Json<CurrentAdminResponse>> {
    let admin = AuthService::get_admin_by_id(state.db(), &admin.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

    Ok(Json(CurrentAdminResponse { user: admin.into() }))
}
