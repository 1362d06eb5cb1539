//! Public survey handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{constants::MAX_SURVEY_BODY_SIZE, state::AppState};

/// Survey routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handler::submit_survey).layer(DefaultBodyLimit::max(MAX_SURVEY_BODY_SIZE)),
        )
        .route("/options", get(handler::get_options))
}
