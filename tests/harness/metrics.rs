// SPDX-FileCopyrightText: 2026 Education Policy Blog contributors
// SPDX-License-Identifier: Apache-2.0

//! Outcome metrics for flood simulation results.

use std::collections::HashMap;
use std::time::Duration;

/// Possible outcomes for a simulated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Allowed,
    Limited,
}

/// Collects outcomes during a flood simulation.
#[derive(Debug, Default)]
pub struct FloodMetrics {
    outcomes: HashMap<Outcome, usize>,
    requests_per_identity: HashMap<String, usize>,
    latencies: Vec<u64>,
}

impl FloodMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request outcome.
    pub fn record(&mut self, outcome: Outcome, identity: &str, latency: Duration) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self
            .requests_per_identity
            .entry(identity.to_string())
            .or_insert(0) += 1;
        self.latencies.push(latency.as_micros() as u64);
    }

    pub fn total_requests(&self) -> usize {
        self.outcomes.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    pub fn allowed(&self) -> usize {
        self.count(Outcome::Allowed)
    }

    pub fn limited(&self) -> usize {
        self.count(Outcome::Limited)
    }

    /// Ratio of limited to total requests.
    pub fn block_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        self.limited() as f64 / total as f64
    }

    pub fn unique_identities(&self) -> usize {
        self.requests_per_identity.len()
    }

    /// Median check latency in microseconds.
    pub fn median_latency_us(&self) -> u64 {
        if self.latencies.is_empty() {
            return 0;
        }
        let mut sorted = self.latencies.clone();
        sorted.sort_unstable();
        sorted[sorted.len() / 2]
    }
}

impl std::fmt::Display for FloodMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Flood Metrics ===")?;
        writeln!(f, "Total Requests:   {}", self.total_requests())?;
        writeln!(f, "Allowed:          {}", self.allowed())?;
        writeln!(f, "Limited:          {}", self.limited())?;
        writeln!(f, "Block Rate:       {:.1}%", self.block_rate() * 100.0)?;
        writeln!(f, "Unique Identities:{}", self.unique_identities())?;
        writeln!(f, "Median Latency:   {} us", self.median_latency_us())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let mut metrics = FloodMetrics::new();
        metrics.record(Outcome::Allowed, "10.0.0.1", Duration::from_micros(100));
        metrics.record(Outcome::Allowed, "10.0.0.2", Duration::from_micros(150));
        metrics.record(Outcome::Limited, "10.0.0.1", Duration::from_micros(50));

        assert_eq!(metrics.total_requests(), 3);
        assert_eq!(metrics.allowed(), 2);
        assert_eq!(metrics.limited(), 1);
        assert_eq!(metrics.unique_identities(), 2);
    }

    #[test]
    fn test_block_rate() {
        let mut metrics = FloodMetrics::new();
        for _ in 0..3 {
            metrics.record(Outcome::Allowed, "10.0.0.1", Duration::ZERO);
        }
        for _ in 0..7 {
            metrics.record(Outcome::Limited, "10.0.0.1", Duration::ZERO);
        }

        assert!((metrics.block_rate() - 0.7).abs() < 0.01);
    }
}
