use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::oauth;

use super::Caller;

/// Handler で Caller を受け取るための extractor
/// 拒否はしない (identity なし = anonymous)。認可は handler 側で判断する
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller {
            caller_id: oauth::caller_id_from_headers(&parts.headers),
            client_id: oauth::client_id_from_headers(&parts.headers),
        })
    }
}
