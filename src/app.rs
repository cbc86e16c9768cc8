/*
 * Responsibility
 * - Config 読み込み → pool 構築 → startup probe → Router 組み立て → serve
 * - tracing / panic hook の初期化
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ProbeMode};
use crate::state::AppState;
use crate::{api, db, probe};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,hello_api_backend=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

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
        "starting backend in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// pool 構築と startup probe。probe は listener bind より前にちょうど 1 回。
async fn build_state(config: &Config) -> Result<AppState> {
    let pool = match db::connect(&config.db) {
        Ok(pool) => pool,
        Err(err) => {
            // 壊れた接続設定 (例: 数値でない DB_PORT) は unreachable と同じ経路で扱う
            tracing::error!(error = %err, "Database connection failed");
            if config.probe_mode == ProbeMode::FailFast {
                return Err(err.into());
            }
            return Ok(AppState::new(None));
        }
    };

    probe::run(&pool, config.probe_mode, config.probe_timeout).await?;

    Ok(AppState::new(Some(pool)))
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api::v1::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
