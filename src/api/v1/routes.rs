/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - public: /health (access middleware を通さない、token service に問い合わせない)
 * - protected: /me (access middleware は app.rs 側でこちらだけに掛ける)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{health::health, me::me};
use crate::state::AppState;

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
