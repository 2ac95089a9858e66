//! Request authentication against the token service.
//!
//! The authenticator owns the trust headers `X-User-Id` / `X-Client`:
//! it strips whatever the caller sent, resolves the `access_token` query
//! parameter remotely and writes the resolved identity back. Downstream code
//! reads the identity with [`caller_id`] / [`client_id`].
//!
//! Policy:
//! - no token, or a token the service reports as 404 → request proceeds
//!   without identity (fail-open)
//! - any other failure → `Err(AuthError)`, the host decides how to reject

pub mod client;
pub mod error;
pub mod types;

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};

pub use client::{AccessTokenClient, RestAccessTokenClient, TransportError};
pub use error::AuthError;
pub use types::{AccessToken, TokenServiceResponse};

use crate::error::RestErr;

pub const HEADER_X_PUBLIC: HeaderName = HeaderName::from_static("x-public");
pub const HEADER_X_CLIENT: HeaderName = HeaderName::from_static("x-client");
pub const HEADER_X_CALLER_ID: HeaderName = HeaderName::from_static("x-user-id");

pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// An absent request counts as public.
pub fn is_public<B>(request: Option<&Request<B>>) -> bool {
    request.is_none_or(|req| is_public_headers(req.headers()))
}

pub fn is_public_headers(headers: &HeaderMap) -> bool {
    headers
        .get(HEADER_X_PUBLIC)
        .is_some_and(|v| v.as_bytes() == b"true")
}

/// Resolved caller id, or 0 when there is none.
///
/// 0 also covers a present but malformed header; use [`try_caller_id`] to
/// tell the two apart.
pub fn caller_id<B>(request: Option<&Request<B>>) -> i64 {
    try_caller_id(request).unwrap_or(0)
}

/// Resolved client id, or 0 when there is none.
pub fn client_id<B>(request: Option<&Request<B>>) -> i64 {
    try_client_id(request).unwrap_or(0)
}

pub fn try_caller_id<B>(request: Option<&Request<B>>) -> Option<i64> {
    request.and_then(|req| caller_id_from_headers(req.headers()))
}

pub fn try_client_id<B>(request: Option<&Request<B>>) -> Option<i64> {
    request.and_then(|req| client_id_from_headers(req.headers()))
}

pub fn caller_id_from_headers(headers: &HeaderMap) -> Option<i64> {
    header_i64(headers, &HEADER_X_CALLER_ID)
}

pub fn client_id_from_headers(headers: &HeaderMap) -> Option<i64> {
    header_i64(headers, &HEADER_X_CLIENT)
}

// base-10 i64 only; out of range is treated like garbage
fn header_i64(headers: &HeaderMap, name: &HeaderName) -> Option<i64> {
    headers.get(name)?.to_str().ok()?.parse::<i64>().ok()
}

/// Remove every identity header, whatever the caller put there.
pub fn strip_identity_headers(headers: &mut HeaderMap) {
    headers.remove(HEADER_X_CLIENT);
    headers.remove(HEADER_X_CALLER_ID);
}

/// Trimmed `access_token` query parameter; `None` when missing or blank.
///
/// The first occurrence wins when the parameter is repeated.
pub fn access_token_param<B>(request: &Request<B>) -> Option<String> {
    let query = request.uri().query()?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == PARAM_ACCESS_TOKEN)
        .map(|(_, value)| value.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Resolves access tokens into trust headers.
///
/// Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct RequestAuthenticator {
    client: Arc<dyn AccessTokenClient>,
}

impl std::fmt::Debug for RequestAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAuthenticator")
            .field("client", &self.client.backend_name())
            .finish()
    }
}

impl RequestAuthenticator {
    pub fn new(client: Arc<dyn AccessTokenClient>) -> Self {
        Self { client }
    }

    /// Authenticate one request in place.
    ///
    /// Identity headers are always cleared first and only written back after
    /// the token service confirmed the token. `Ok(())` does not mean the
    /// request is authenticated; check [`try_caller_id`] for that.
    pub async fn authenticate_request<B>(
        &self,
        request: Option<&mut Request<B>>,
    ) -> Result<(), AuthError> {
        let Some(request) = request else {
            return Ok(());
        };

        strip_identity_headers(request.headers_mut());

        let Some(access_token) = access_token_param(request) else {
            return Ok(());
        };

        let Some(token) = self.resolve(&access_token).await? else {
            return Ok(());
        };

        // append: the headers were removed above, there is nothing to overwrite
        let headers = request.headers_mut();
        headers.append(HEADER_X_CALLER_ID, HeaderValue::from(token.user_id));
        headers.append(HEADER_X_CLIENT, HeaderValue::from(token.client_id));

        tracing::debug!(
            user_id = token.user_id,
            client_id = token.client_id,
            "request authenticated"
        );

        Ok(())
    }

    /// `Ok(None)` when the token service does not know the token.
    pub async fn resolve(&self, access_token: &str) -> Result<Option<AccessToken>, AuthError> {
        let response = self
            .client
            .fetch(access_token)
            .await
            .map_err(AuthError::Transport)?;

        tracing::debug!(
            backend = self.client.backend_name(),
            status = response.status,
            "token service responded"
        );

        if response.is_error() {
            let err: RestErr =
                serde_json::from_slice(&response.body).map_err(AuthError::MalformedErrorBody)?;

            // 404 = unknown / expired token → no identity, not an error
            if err.is_not_found() {
                tracing::debug!("access token not found, continuing without identity");
                return Ok(None);
            }
            return Err(AuthError::Remote(err));
        }

        let token: AccessToken =
            serde_json::from_slice(&response.body).map_err(AuthError::MalformedTokenBody)?;

        Ok(Some(token))
    }
}
