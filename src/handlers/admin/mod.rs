//! Admin handlers
//!
//! All routes here sit behind the authentication middleware.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/submissions", get(handler::list_submissions))
        .route("/submissions/{id}", get(handler::get_submission))
        .route("/stats", get(handler::get_stats))
        .route("/files/{file_id}", get(handler::download_file))
}
