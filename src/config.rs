// SPDX-FileCopyrightText: 2026 Education Policy Blog contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the blog rate limiter service.
//!
//! Defaults match the limits the blog applies to its public endpoints:
//! a 60 second window, 500 tracked identities per limiter, and per-route
//! request budgets for contact, subscribe, and search.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the rate limiter service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Limiter cache configuration, shared by all three limiter instances
    #[serde(default)]
    pub rate_limit: RateLimiterConfig,

    /// Per-route request budgets
    #[serde(default)]
    pub limits: RouteLimits,
}

/// Sizing for a limiter's bounded identity cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Window length in milliseconds; an identity's counter expires this
    /// long after its last write (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Maximum distinct identities tracked before LRU eviction
    /// (default: 500)
    #[serde(default = "default_max_tracked_identities")]
    pub max_tracked_identities: usize,
}

/// Maximum requests per window for each guarded route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteLimits {
    /// Contact form submissions per window (default: 5)
    #[serde(default = "default_contact_limit")]
    pub contact: u32,

    /// Newsletter subscriptions per window (default: 5)
    #[serde(default = "default_subscribe_limit")]
    pub subscribe: u32,

    /// Search queries per window (default: 30)
    #[serde(default = "default_search_limit")]
    pub search: u32,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_max_tracked_identities() -> usize {
    500
}

fn default_contact_limit() -> u32 {
    5
}

fn default_subscribe_limit() -> u32 {
    5
}

fn default_search_limit() -> u32 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimiterConfig::default(),
            limits: RouteLimits::default(),
        }
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            max_tracked_identities: default_max_tracked_identities(),
        }
    }
}

impl Default for RouteLimits {
    fn default() -> Self {
        Self {
            contact: default_contact_limit(),
            subscribe: default_subscribe_limit(),
            search: default_search_limit(),
        }
    }
}

impl RateLimiterConfig {
    /// Get the window duration
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
