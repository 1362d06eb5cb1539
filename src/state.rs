//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor. Collaborators are
//! injected here instead of living in globals.

use std::sync::Arc;

use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::{
    config::Config, db::store::SubmissionStore, services::FileService, sink::SubmissionSink,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    /// Redis connection manager
    pub redis: ConnectionManager,

    /// Storage collaborator holding accepted submissions
    pub store: Arc<dyn SubmissionStore>,

    /// Sink receiving validated submissions
    pub sink: Arc<dyn SubmissionSink>,

    /// Attachment storage
    pub files: Arc<FileService>,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        db: PgPool,
        redis: ConnectionManager,
        store: Arc<dyn SubmissionStore>,
        sink: Arc<dyn SubmissionSink>,
        files: Arc<FileService>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                redis,
                store,
                sink,
                files,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a clone of the Redis connection manager
    pub fn redis(&self) -> ConnectionManager {
        self.inner.redis.clone()
    }

    /// Get the submission store
    pub fn store(&self) -> &dyn SubmissionStore {
        &*self.inner.store
    }

    /// Get a handle to the submission sink
    pub fn sink(&self) -> Arc<dyn SubmissionSink> {
        self.inner.sink.clone()
    }

    pub fn files(&self) -> &Arc<FileService> {
        &self.inner.files
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
