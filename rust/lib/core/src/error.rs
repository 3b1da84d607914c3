use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::HtmlEscape;
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. They appear in the rendered
// error page and in logs; messages may be reworded, codes never change.

/// Stable error code constants.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const INTERNAL: &str = "INTERNAL";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type used across all modules.
///
/// Each variant maps to a stable error code (see [`error_code`]) and an
/// HTTP status code. Module errors (`TweetError`, `AuthError`) convert
/// into this type at the handler boundary.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Input data is invalid. HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid authentication credentials. HTTP 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed to touch the resource. HTTP 403.
    #[error("{0}")]
    PermissionDenied(String),

    /// Storage backend failure. HTTP 500.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Unauthorized(_) => error_code::UNAUTHENTICATED,
            ServiceError::PermissionDenied(_) => error_code::PERMISSION_DENIED,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::debug!(code = self.error_code(), "{}", self);
        }
        let body = format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{status}</title></head>\
             <body><h1>{status}</h1><p class=\"error-code\">{code}</p><p>{message}</p>\
             <a href=\"/\">Pictweet</a></body></html>",
            status = status,
            code = self.error_code(),
            message = HtmlEscape(&self.to_string()),
        );
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(ServiceError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ServiceError::PermissionDenied("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ServiceError::Storage("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ServiceError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_code_mapping() {
        assert_eq!(ServiceError::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(ServiceError::Validation("x".into()).error_code(), "VALIDATION_FAILED");
        assert_eq!(ServiceError::Unauthorized("x".into()).error_code(), "UNAUTHENTICATED");
        assert_eq!(ServiceError::PermissionDenied("x".into()).error_code(), "PERMISSION_DENIED");
        assert_eq!(ServiceError::Storage("x".into()).error_code(), "STORAGE_ERROR");
        assert_eq!(ServiceError::Internal("x".into()).error_code(), "INTERNAL");
    }

    #[tokio::test]
    async fn html_response_escapes_message() {
        let resp = ServiceError::NotFound("tweet <5> not found".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("NOT_FOUND"));
        assert!(body.contains("tweet &lt;5&gt; not found"));
        assert!(!body.contains("<5>"));
    }

    #[test]
    fn error_display_is_just_message() {
        assert_eq!(ServiceError::NotFound("tweet 123".into()).to_string(), "tweet 123");
        assert_eq!(ServiceError::PermissionDenied("not yours".into()).to_string(), "not yours");
    }
}
