/*
 * Responsibility
 * - GET /me: middleware が付けた identity をそのまま返す
 * - identity がない (token なし / 404) 場合も 200 で authenticated=false
 */
use axum::Json;

use crate::api::v1::dto::me::MeResponse;
use crate::api::v1::extractors::Caller;

pub async fn me(caller: Caller) -> Json<MeResponse> {
    Json(MeResponse {
        caller_id: caller.caller_id_or_zero(),
        client_id: caller.client_id_or_zero(),
        authenticated: caller.is_authenticated(),
    })
}
