//! Token service client interface used by the request authenticator.
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::config::OAuthConfig;
use crate::oauth::types::TokenServiceResponse;

/// Failures where no response was obtained from the token service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("token service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token service base url cannot carry a path: {0}")]
    InvalidBaseUrl(Url),
    #[cfg(test)]
    #[error("token service unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of an access token on the remote token service.
///
/// Implementations only move bytes: they report the status and body as
/// received and leave their interpretation to the authenticator.
/// `Err` means no response at all.
#[async_trait]
pub trait AccessTokenClient: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn fetch(&self, access_token: &str) -> Result<TokenServiceResponse, TransportError>;
}

/// reqwest-backed client for `GET <base>/access-token/gen/<token>`.
#[derive(Clone, Debug)]
pub struct RestAccessTokenClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RestAccessTokenClient {
    pub fn new(config: &OAuthConfig) -> Result<Self, TransportError> {
        if config.base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidBaseUrl(config.base_url.clone()));
        }

        // Timeout covers the whole exchange (connect + headers + body).
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Token goes in as a single, percent-encoded path segment.
    pub fn token_url(&self, access_token: &str) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["access-token", "gen", access_token]);
        Ok(url)
    }
}

#[async_trait]
impl AccessTokenClient for RestAccessTokenClient {
    fn backend_name(&self) -> &'static str {
        "rest"
    }

    async fn fetch(&self, access_token: &str) -> Result<TokenServiceResponse, TransportError> {
        let url = self.token_url(access_token)?;

        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TokenServiceResponse::new(status, body.to_vec()))
    }
}
