//! cf-daemon entry point.
//!
//! This file is intentionally thin: it sets up tracing, connects the store,
//! applies migrations, wires middleware, and starts the HTTP server. All
//! route handlers live in `routes.rs`; shared state lives in `state.rs`.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use cf_daemon::{routes, state};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env.local if present (dev convenience). Silent if the file does
    // not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let pool = cf_db::connect_from_env().await?;
    cf_db::migrate(&pool).await?;
    let store = Arc::new(cf_db::PgStore::new(pool));

    let shared = Arc::new(state::AppState::new(store));

    let app = routes::build_router(Arc::clone(&shared))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_dev_origins());

    let addr = bind_addr_from_env().unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3010)));
    info!("cf-daemon listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .await
        .context("server crashed")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn bind_addr_from_env() -> Option<SocketAddr> {
    std::env::var("CF_DAEMON_ADDR").ok()?.parse().ok()
}

/// CORS: localhost dev origins plus an optional deployed dashboard origin
/// from CF_FRONTEND_ORIGIN.
fn cors_dev_origins() -> CorsLayer {
    let mut allowed_origins = vec![
        "http://localhost".to_string(),
        "http://127.0.0.1".to_string(),
        "http://localhost:3011".to_string(),
        "http://127.0.0.1:3011".to_string(),
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ];
    if let Ok(origin) = std::env::var("CF_FRONTEND_ORIGIN") {
        allowed_origins.push(origin);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(tower_http::cors::Any)
}
