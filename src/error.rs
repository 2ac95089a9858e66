/*
 * Responsibility
 * - 呼び出し元に返す HTTP エラー値 (RestErr) の定義
 * - token service の error body もこの形 (status / message / error) で届く
 * - IntoResponse 実装 (status をそのまま HTTP status に使う)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller-facing error value.
///
/// `status` is mandatory when deserializing; a body without it is not an
/// error value at all. `message` and `error` fall back to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{status} {error}: {message}")]
pub struct RestErr {
    #[serde(default)]
    pub message: String,
    pub status: u16,
    #[serde(default)]
    pub error: String,
}

impl RestErr {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            error: error.into(),
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(500, "internal_server_error", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "not_found", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "bad_request", message)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND.as_u16()
    }

    /// HTTP status for the response. Anything that is not a 4xx/5xx code
    /// (0, 200, 302, 1000, ...) becomes 500: an error value never answers
    /// with success.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status)
            .ok()
            .filter(|status| status.is_client_error() || status.is_server_error())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for RestErr {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
