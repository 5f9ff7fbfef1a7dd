// SPDX-FileCopyrightText: 2026 Education Policy Blog contributors
// SPDX-License-Identifier: Apache-2.0

//! Fixed-window request counter keyed by client identity.
//!
//! Each identity gets one counter that accumulates for the length of the
//! window and is compared against a per-call limit before incrementing.
//! Rejected requests still increment and refresh the entry, so a client
//! hammering a route stays limited instead of aging out early.
//!
//! Counters reset at window boundaries rather than sliding, so bursts
//! straddling a boundary can admit up to twice the limit across two
//! adjacent windows. That matches the behavior existing clients were
//! built against.

use crate::cache::BoundedCache;
use crate::config::RateLimiterConfig;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Successful outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allowance {
    /// The limit the check was made against
    pub limit: u32,
    /// Requests left in the window, counting this one (`limit` on the
    /// first request of a fresh window)
    pub remaining: u32,
}

/// Rejection signal: the identity has used up its budget for the window.
///
/// An expected control-flow outcome, not a fault; the handler answers it
/// with the 429 contract and stops.
#[derive(Debug, Clone, Error)]
#[error("rate limit exceeded for {identity} (limit {limit})")]
pub struct RateLimitExceeded {
    pub identity: String,
    pub limit: u32,
}

/// Per-identity fixed-window rate limiter.
///
/// Each instance owns an independent bounded cache; routes with separate
/// budgets get separate instances so they never cross-contaminate.
pub struct RateLimiter {
    cache: RwLock<BoundedCache>,
}

impl RateLimiter {
    /// Create a limiter with the given window and identity capacity.
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            cache: RwLock::new(BoundedCache::new(
                config.window(),
                config.max_tracked_identities,
            )),
        }
    }

    /// Check whether `identity` may make another request under `limit`.
    ///
    /// The attempt is recorded either way: the counter increments and the
    /// entry's TTL and recency refresh even when the request is rejected.
    pub async fn check(
        &self,
        identity: &str,
        limit: u32,
    ) -> Result<Allowance, RateLimitExceeded> {
        let mut cache = self.cache.write().await;
        let current = cache.get(identity).unwrap_or(0);
        let limited = current >= limit;
        cache.put(identity, current.saturating_add(1));
        drop(cache);

        if limited {
            debug!(identity, limit, count = current, "rate limit exceeded");
            return Err(RateLimitExceeded {
                identity: identity.to_string(),
                limit,
            });
        }

        Ok(Allowance {
            limit,
            remaining: limit - current,
        })
    }

    /// Drop expired entries. Called periodically; reads already treat
    /// expired entries as absent, this just releases their memory.
    pub async fn purge_expired(&self) -> usize {
        self.cache.write().await.purge_expired()
    }

    /// Number of identities currently tracked.
    pub async fn tracked_identities(&self) -> usize {
        self.cache.read().await.len()
    }
}
