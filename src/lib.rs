//! TechSurvey - Developer Technology Survey Service
//!
//! This library provides the core functionality for collecting developer
//! technology preferences and browsing them in an admin area.
//!
//! # Features
//!
//! - Role-driven conditional validation of the survey form
//! - Single in-flight submit per draft
//! - Append-only submission storage with optional remote forwarding
//! - PDF attachments with admin download links
//! - Admin search, filters, pagination and dashboard statistics
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Survey**: Form engine, query engine and stats, free of I/O
//! - **Sink**: Where accepted submissions go
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod sink;
pub mod state;
pub mod survey;
pub mod utils;

use axum::{middleware as axum_middleware, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest(constants::API_BASE_PATH, handlers::routes(state.clone()))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
