// SPDX-FileCopyrightText: 2026 Education Policy Blog contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-IP ingress rate limiter for the blog's public endpoints.
//!
//! Guards the contact form, newsletter subscribe, and search routes with
//! a fixed-window request counter per client identity:
//!
//! - one counter per identity, expiring a window after the last write
//! - bounded identity tracking with least-recently-used eviction
//! - per-route limits supplied at each check
//! - `X-RateLimit-Limit` / `X-RateLimit-Remaining` headers on every
//!   response, 429 with a fixed JSON body on rejection
//!
//! Each process instance holds its own caches, so the enforced limit is
//! per-process; a horizontally scaled deployment multiplies the budget
//! by the instance count.

pub mod cache;
pub mod config;
pub mod handlers;
pub mod identity;
pub mod limiter;
pub mod metrics;

pub use config::Config;
pub use limiter::{Allowance, RateLimitExceeded, RateLimiter};
