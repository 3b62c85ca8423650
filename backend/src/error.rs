//! Application error handling
//!
//! A single error type carries the taxonomy (validation, not-found,
//! authentication, authorization, conflict, unexpected) and the response
//! style. The API grew in two eras: user and blog handlers answer failures
//! with `{"error": <string>}`, while the guards and the contact-message
//! handlers answer with `{"success": false, "message": <string>}`. Both
//! shapes are preserved; the style travels with the error.
//!
//! `IntoResponse` is the process-wide conversion point: unexpected errors
//! are logged there and rendered as a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Generic body for 500 responses; internal detail never reaches the client.
const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error has occurred.";

/// API error with response style
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ApiError {
    kind: ErrorKind,
    style: ErrorStyle,
}

/// Error taxonomy
#[derive(Debug, Error)]
enum ErrorKind {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(anyhow::Error),

    #[error(transparent)]
    Database(sqlx::Error),
}

/// Response body shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorStyle {
    /// `{"error": <message>}`
    Bare,
    /// `{"success": false, "message": <message>}`
    Envelope,
}

impl ApiError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            style: ErrorStyle::Bare,
        }
    }

    /// 400 with the given message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(message.into()))
    }

    /// 404 with the given message
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound(message.into()))
    }

    /// 401 with the given message
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication(message.into()))
    }

    /// 403 with the given message
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization(message.into()))
    }

    /// 409 with the given message
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict(message.into()))
    }

    /// Switch the response body to the `{"success": false, ...}` shape
    pub fn enveloped(mut self) -> Self {
        self.style = ErrorStyle::Envelope;
        self
    }

    /// The HTTP status this error renders as
    pub fn status(&self) -> StatusCode {
        match &self.kind {
            ErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
            ErrorKind::Authentication(_) => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization(_) => StatusCode::FORBIDDEN,
            ErrorKind::Conflict(_) => StatusCode::CONFLICT,
            ErrorKind::Internal(_) | ErrorKind::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(ErrorKind::Internal(err))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::new(ErrorKind::Database(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self.kind {
            ErrorKind::Validation(msg)
            | ErrorKind::NotFound(msg)
            | ErrorKind::Authentication(msg)
            | ErrorKind::Authorization(msg)
            | ErrorKind::Conflict(msg) => msg.clone(),
            ErrorKind::Internal(err) => {
                error!("Internal error: {:?}", err);
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
            ErrorKind::Database(err) => {
                error!("Database error: {:?}", err);
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        };

        let body = match self.style {
            ErrorStyle::Bare => json!({ "error": message }),
            ErrorStyle::Envelope => json!({ "success": false, "message": message }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_renders_bare_body() {
        let response = ApiError::validation("Invalid email").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid email");
        assert!(json.get("success").is_none());
    }

    #[tokio::test]
    async fn enveloped_error_renders_success_false_body() {
        let response = ApiError::not_found("No message found.")
            .enveloped()
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "No message found.");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::authentication("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::authorization("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn unexpected_errors_hide_detail() {
        let response = ApiError::from(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "An unexpected error has occurred.");
    }
}
