//! Logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{info, warn};

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if is_noteworthy(status) {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        );
    }

    response
}

/// Server errors and client errors other than 404 are logged at warn level
fn is_noteworthy(status: StatusCode) -> bool {
    status.is_server_error() || (status.is_client_error() && status != StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_noteworthy() {
        assert!(is_noteworthy(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_noteworthy(StatusCode::BAD_REQUEST));
        assert!(!is_noteworthy(StatusCode::NOT_FOUND));
        assert!(!is_noteworthy(StatusCode::CREATED));
    }
}
