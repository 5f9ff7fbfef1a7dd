// SPDX-FileCopyrightText: 2026 Education Policy Blog contributors
// SPDX-License-Identifier: Apache-2.0

//! Flood patterns for rate limiter simulation.

/// Flood pattern configuration.
#[derive(Debug, Clone)]
pub struct FloodConfig {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Number of distinct identities, visited round-robin
    pub unique_identities: usize,
    /// Per-request limit passed to the limiter
    pub limit: u32,
    /// Identity capacity for the limiter under test
    pub max_tracked_identities: usize,
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            unique_identities: 1,
            limit: 5,
            max_tracked_identities: 500,
        }
    }
}

/// Predefined flood patterns.
impl FloodConfig {
    /// Single identity flood - basic DoS from one source.
    pub fn single_identity_flood() -> Self {
        Self {
            total_requests: 200,
            unique_identities: 1,
            ..Default::default()
        }
    }

    /// Distributed flood - many identities, each within budget.
    pub fn distributed_within_budget() -> Self {
        Self {
            total_requests: 500,
            unique_identities: 100,
            ..Default::default()
        }
    }

    /// Distributed flood - many identities, each over budget.
    pub fn distributed_over_budget() -> Self {
        Self {
            total_requests: 800,
            unique_identities: 100,
            ..Default::default()
        }
    }

    /// Identity churn - more first-time identities than the cache holds.
    pub fn identity_churn() -> Self {
        Self {
            total_requests: 600,
            unique_identities: 600,
            max_tracked_identities: 50,
            ..Default::default()
        }
    }

    /// Requests each identity receives (round-robin distribution).
    pub fn requests_per_identity(&self) -> usize {
        self.total_requests / self.unique_identities
    }

    /// Requests the limiter should admit for this pattern, assuming the
    /// whole flood fits in one window and no capacity eviction.
    pub fn expected_allowed(&self) -> usize {
        self.unique_identities * self.requests_per_identity().min(self.limit as usize)
    }
}
