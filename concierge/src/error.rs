use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConciergeError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },
}

impl IntoResponse for ConciergeError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ConciergeError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ConciergeError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ConciergeError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ConciergeError::Http(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            ConciergeError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ConciergeError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ConciergeError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ConciergeError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            ConciergeError::LlmUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            ConciergeError::LlmRateLimit { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("LLM rate limit exceeded, retry after {retry_after:?} seconds"),
            ),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ConciergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = ConciergeError::NotFound("profile demo-user".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_maps_to_500() {
        let response = ConciergeError::Storage("lock poisoned".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rate_limit_display_includes_retry_after() {
        let err = ConciergeError::LlmRateLimit {
            retry_after: Some(12),
        };
        assert!(err.to_string().contains("Some(12)"));
        assert_eq!(err.into_response().status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
