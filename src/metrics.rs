// SPDX-FileCopyrightText: 2026 Education Policy Blog contributors
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics for the guarded routes.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Request counters, held in application state and registered against a
/// private registry so separately constructed services never collide.
pub struct Metrics {
    registry: Registry,
    requests: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new(
                "blog_ratelimit_requests_total",
                "Rate limit checks by route and outcome",
            ),
            &["route", "outcome"],
        )?;
        registry.register(Box::new(requests.clone()))?;

        Ok(Self { registry, requests })
    }

    pub fn record_allowed(&self, route: &str) {
        self.requests.with_label_values(&[route, "allowed"]).inc();
    }

    pub fn record_limited(&self, route: &str) {
        self.requests.with_label_values(&[route, "limited"]).inc();
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}
