use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failure envelope: `{ "success": false, "message": ..., "error": ... }`.
///
/// `message` is the short summary shown to API consumers; `error` carries the
/// descriptive text of the underlying error.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
    pub error: String,
}

#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    message: &'a str,
    error: &'a str,
}

impl ApiFailure {
    pub fn new(status: StatusCode, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: error.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, error)
    }

    pub fn not_found(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, error)
    }

    /// Duplicate keys are reported to clients as bad requests.
    pub fn conflict(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, error)
    }

    pub fn internal(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, error)
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.message, self.status, self.error)
    }
}

impl std::error::Error for ApiFailure {}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.error, "{}", self.message);
        } else {
            tracing::debug!(status = %self.status, error = %self.error, "{}", self.message);
        }
        let body = FailureBody {
            success: false,
            message: &self.message,
            error: &self.error,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(rej: JsonRejection) -> Self {
        if rej.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::new(rej.status(), "Request body too large", rej.body_text());
        }
        Self::bad_request("Invalid request body", rej.body_text())
    }
}

impl From<PathRejection> for ApiFailure {
    fn from(rej: PathRejection) -> Self {
        Self::bad_request("Invalid path parameter", rej.body_text())
    }
}

impl From<QueryRejection> for ApiFailure {
    fn from(rej: QueryRejection) -> Self {
        Self::bad_request("Invalid query parameters", rej.body_text())
    }
}
