//! Rate limiting middleware
//!
//! Fixed-window counters in Redis, keyed by client IP and endpoint bucket.
//! When Redis is unreachable requests are let through.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::{
    constants::{rate_limits, API_BASE_PATH},
    error::AppError,
    state::AppState,
};

/// Endpoint groups sharing one counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Auth,
    Survey,
    General,
}

impl Bucket {
    fn for_path(path: &str) -> Self {
        let path = path.strip_prefix(API_BASE_PATH).unwrap_or(path);
        if path.starts_with("/auth") {
            Self::Auth
        } else if path.starts_with("/survey") {
            Self::Survey
        } else {
            Self::General
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Survey => "survey",
            Self::General => "general",
        }
    }

    /// (max requests, window in seconds)
    fn limit(&self) -> (i64, i64) {
        match self {
            Self::Auth => (rate_limits::AUTH_MAX_REQUESTS, rate_limits::AUTH_WINDOW_SECS),
            Self::Survey => (rate_limits::SURVEY_MAX_REQUESTS, rate_limits::SURVEY_WINDOW_SECS),
            Self::General => (rate_limits::GENERAL_MAX_REQUESTS, rate_limits::GENERAL_WINDOW_SECS),
        }
    }
}

/// Rate limit middleware
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bucket = Bucket::for_path(request.uri().path());
    let (limit, window) = bucket.limit();
    let key = format!("rate_limit:{}:{}", addr.ip(), bucket.name());
    let mut redis = state.redis();

    let count: i64 = match redis.incr(&key, 1).await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "Rate limiter unavailable, allowing request");
            return Ok(next.run(request).await);
        }
    };

    if count == 1 {
        let _: () = redis.expire(&key, window).await.unwrap_or(());
    }

    if count > limit {
        debug!(ip = %addr.ip(), bucket = bucket.name(), count, "Rate limit exceeded");
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}
