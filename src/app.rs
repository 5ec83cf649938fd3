/*
 * Responsibility
 * - Config読み込み → 依存生成 (store / auth / notifier) → Router 組み立て
 * - Middleware の適用 (access → authorize は v1 側, http / cors は全体)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{
    self,
    v1::handlers::{fallback, health::health},
};
use crate::config::Config;
use crate::middleware::{self, auth::access};
use crate::services::auth::{PolicyError, build_auth_service};
use crate::services::notify::LogNotifier;
use crate::services::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG=info,academic_records=debug,tower_http=debug cargo run
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
        tracing::error!(?info, "panic");

        // development: fail fast
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
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config)?;

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => Arc::new(PgDocumentStore::connect(url).await?),
        None => {
            tracing::warn!("DATABASE_URL is not set, using the in-memory document store");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    let auth = build_auth_service(config)?;
    let notifier = Arc::new(LogNotifier::new(config.mail_from.clone()));

    let state = AppState::new(store, auth, notifier);
    tracing::debug!(?state, "application state ready");

    Ok(state)
}

fn build_router(state: AppState, config: &Config) -> Result<Router, PolicyError> {
    let v1 = access::apply(api::v1::routes()?, state.clone());

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", v1)
        .fallback(fallback::not_found)
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .with_state(state);

    let router = middleware::http::apply(router, config);
    Ok(middleware::cors::apply(router, config))
}
