/*
 * Responsibility
 * - authenticate_request が返すエラーの分類 (transport / 壊れた body / remote error)
 * - host は status を見ずに variant で分岐できる
 * - 呼び出し元向けの RestErr への変換と IntoResponse
 */
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::RestErr;
use crate::oauth::client::TransportError;

pub const MSG_INVALID_CLIENT: &str = "invalid client to login user";
pub const MSG_INVALID_ERROR_BODY: &str = "invalid error interface at login user";
pub const MSG_INVALID_TOKEN_BODY: &str = "invalid user interface at login user";

#[derive(Debug, Error)]
pub enum AuthError {
    /// No response from the token service (connect failure, timeout, ...).
    #[error("invalid client to login user")]
    Transport(#[source] TransportError),

    /// Non-2xx response whose body is not an error value.
    #[error("invalid error interface at login user")]
    MalformedErrorBody(#[source] serde_json::Error),

    /// 2xx response whose body is not a token record.
    #[error("invalid user interface at login user")]
    MalformedTokenBody(#[source] serde_json::Error),

    /// Error value reported by the token service, passed through unchanged.
    #[error(transparent)]
    Remote(RestErr),
}

impl AuthError {
    pub fn status(&self) -> u16 {
        match self {
            Self::Remote(err) => err.status,
            _ => 500,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Transport(_) => MSG_INVALID_CLIENT,
            Self::MalformedErrorBody(_) => MSG_INVALID_ERROR_BODY,
            Self::MalformedTokenBody(_) => MSG_INVALID_TOKEN_BODY,
            Self::Remote(err) => &err.message,
        }
    }

    /// Whether the failure originated on this side of the trust boundary.
    pub fn is_internal(&self) -> bool {
        !matches!(self, Self::Remote(_))
    }

    /// Caller-facing error value. The underlying cause is not included.
    pub fn into_rest_err(self) -> RestErr {
        match self {
            Self::Remote(err) => err,
            other => RestErr::internal_server_error(other.message()),
        }
    }
}

impl From<AuthError> for RestErr {
    fn from(e: AuthError) -> Self {
        e.into_rest_err()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!(
            error = ?self,
            status = self.status(),
            internal = self.is_internal(),
            "request authentication failed"
        );
        self.into_rest_err().into_response()
    }
}
