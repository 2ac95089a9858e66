//! Access-token authentication for inbound HTTP requests.
//!
//! [`oauth::RequestAuthenticator`] resolves the `access_token` query parameter
//! against the token service and stamps the caller identity onto the request
//! as `X-User-Id` / `X-Client`. [`oauth::is_public`], [`oauth::caller_id`] and
//! [`oauth::client_id`] read those headers back.
//!
//! The rest of the crate is a small axum host wired around it.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod oauth;
pub mod state;
