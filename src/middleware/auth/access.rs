//! access_token を token service で解決 → X-User-Id / X-Client を request headers に入れる
//!
//! - `X-Public: true` のリクエストは解決しない (identity header は除去だけする)
//! - token なし / token service が 404 → identity なしで後続へ (fail-open)
//! - それ以外の失敗 → AuthError をそのまま response にする

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::oauth::{self, AuthError};
use crate::state::AppState;

/// protected な Router に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = middleware::auth::access::apply(api::v1::protected_routes(), state.clone());
/// let v1 = api::v1::public_routes().merge(protected);
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    if oauth::is_public(Some(&req)) {
        // public でも caller が付けた identity は信用しない
        oauth::strip_identity_headers(req.headers_mut());
        return Ok(next.run(req).await);
    }

    state
        .authenticator
        .authenticate_request(Some(&mut req))
        .await?;

    Ok(next.run(req).await)
}
