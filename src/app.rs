/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → token service client / authenticator 生成 → Router 組み立て
 * - Middleware の適用 (access token 認証, request-id / trace / limit)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, HttpConfig};
use crate::oauth::{RequestAuthenticator, RestAccessTokenClient};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,openbook_oauth=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing; stderr may be hidden depending on how
        // the process is launched.
        tracing::error!(?info, "panic");

        // development: crash the whole process so it gets noticed immediately
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        oauth_base_url = %config.oauth.base_url,
        oauth_timeout_ms = config.oauth.timeout.as_millis() as u64,
        "starting API"
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config.http);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState> {
    // token service client は process 全体で 1 つ (設定は起動後 read-only)
    let client = RestAccessTokenClient::new(&config.oauth)?;
    let authenticator = RequestAuthenticator::new(Arc::new(client));

    Ok(AppState::new(authenticator))
}

pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    let protected = middleware::auth::access::apply(api::v1::protected_routes(), state.clone());
    let v1 = api::v1::public_routes().merge(protected);

    let router = Router::new().nest("/api/v1", v1).with_state(state);

    middleware::http::apply(router, http)
}
