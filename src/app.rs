/*
 * Responsibility
 * - Config読み込み → scope 同期 → 依存生成 → Router 組み立て
 * - Middleware の適用 (access token 検証 / HTTP 横断)
 * - axum::serve() で起動
 */
use anyhow::{Context, Result};
use axum::Router;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_auth_service;
use crate::services::scopes::ScopeSyncClient;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,scope_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    tracing::info!(addr = %config.addr, "starting scope-gate");

    let shutdown = CancellationToken::new();
    spawn_ctrl_c(shutdown.clone());

    sync_scopes(&config, &shutdown).await?;

    let state = AppState::new(build_auth_service(&config));
    let app = middleware::http::apply(build_router(state));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}

/// Register this API's scopes before accepting traffic.
///
/// Skipped when no identity service is configured. Any failure aborts startup.
async fn sync_scopes(config: &Config, cancel: &CancellationToken) -> Result<()> {
    let Some(sync) = &config.scope_sync else {
        tracing::info!("SCOPE_SYNC_HOST not set; skipping scope sync");
        return Ok(());
    };

    let client = ScopeSyncClient::from_config(sync, config.app_secret())?;
    client
        .sync(&api::v1::scopes::definitions(), cancel)
        .await
        .context("scope sync failed")?;

    Ok(())
}

fn spawn_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            token.cancel();
        }
    });
}

/// `/api/v1/*` with access-token verification applied to every route.
pub fn build_router(state: AppState) -> Router {
    let v1 = middleware::auth::access::apply(api::v1::routes(), state.auth.clone());

    Router::new().nest("/api/v1", v1).with_state(state)
}
