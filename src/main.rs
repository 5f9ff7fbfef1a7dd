// SPDX-FileCopyrightText: 2026 Education Policy Blog contributors
// SPDX-License-Identifier: Apache-2.0

//! Blog Rate Limiter Service
//!
//! Sits in front of the blog's public form and search endpoints and
//! enforces per-IP request budgets:
//!
//! - `POST /api/contact` — contact form (5 per minute default)
//! - `POST /api/subscribe` — newsletter signup (5 per minute default)
//! - `GET /api/search` — article search (30 per minute default)
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `RATE_LIMIT_WINDOW_MS`: Counter window in milliseconds (default: 60000)
//! - `RATE_LIMIT_MAX_IDENTITIES`: Tracked identities per limiter (default: 500)
//! - `CONTACT_LIMIT`, `SUBSCRIBE_LIMIT`, `SEARCH_LIMIT`: per-route budgets

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use blog_rate_limiter::{
    config::Config,
    handlers::{self, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        window_ms = config.rate_limit.window_ms,
        max_identities = config.rate_limit.max_tracked_identities,
        contact_limit = config.limits.contact,
        subscribe_limit = config.limits.subscribe,
        search_limit = config.limits.search,
        "Starting blog rate limiter"
    );

    // Create application state
    let state = Arc::new(AppState::new(config.clone())?);

    // Spawn cleanup task
    let purge_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            purge_state.contact_limiter.purge_expired().await;
            purge_state.subscribe_limiter.purge_expired().await;
            purge_state.search_limiter.purge_expired().await;
        }
    });

    // Build router
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/healthz", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/api/contact", post(handlers::contact))
        .route("/api/subscribe", post(handlers::subscribe))
        .route("/api/search", get(handlers::search))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Load configuration from environment variables, starting from the
/// built-in defaults.
fn load_config() -> Config {
    let mut config = Config::default();

    if let Ok(addr) = std::env::var("BIND_ADDR") {
        config.bind_addr = addr;
    }
    if let Some(window_ms) = env_parse("RATE_LIMIT_WINDOW_MS") {
        config.rate_limit.window_ms = window_ms;
    }
    if let Some(max) = env_parse("RATE_LIMIT_MAX_IDENTITIES") {
        config.rate_limit.max_tracked_identities = max;
    }
    if let Some(limit) = env_parse("CONTACT_LIMIT") {
        config.limits.contact = limit;
    }
    if let Some(limit) = env_parse("SUBSCRIBE_LIMIT") {
        config.limits.subscribe = limit;
    }
    if let Some(limit) = env_parse("SEARCH_LIMIT") {
        config.limits.search = limit;
    }

    config
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
