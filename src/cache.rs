// SPDX-FileCopyrightText: 2026 Education Policy Blog contributors
// SPDX-License-Identifier: Apache-2.0

//! Bounded request-counter cache with TTL and LRU eviction.
//!
//! Stores one counter per client identity. An entry expires once its
//! last write is older than the configured window, and the least
//! recently touched entry is evicted when the tracked-identity capacity
//! is exceeded. Either way an evicted identity starts over at count 0 —
//! a memory-bound trade-off, not a correctness guarantee across
//! arbitrarily long windows.

use std::collections::HashMap;
use std::time::{Duration, Instant};

struct CacheEntry {
    count: u32,
    last_write: Instant,
    /// Logical clock tick of the most recent touch, for LRU ordering.
    recency: u64,
}

/// Fixed-capacity map from identity to request count.
///
/// Not internally synchronized; callers wrap it in a lock.
pub struct BoundedCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    capacity: usize,
    clock: u64,
}

impl BoundedCache {
    /// Create a cache whose entries expire `ttl` after their last write
    /// and which tracks at most `capacity` identities.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity: capacity.max(1),
            clock: 0,
        }
    }

    /// Current count for `key`, or `None` if the identity has never been
    /// seen, has expired, or was evicted. Expired entries are removed on
    /// read; live entries have their recency refreshed.
    pub fn get(&mut self, key: &str) -> Option<u32> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.last_write.elapsed() >= self.ttl,
            None => return None,
        };

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.clock += 1;
        let entry = self.entries.get_mut(key)?;
        entry.recency = self.clock;
        Some(entry.count)
    }

    /// Write `count` for `key`, refreshing its TTL and LRU recency.
    ///
    /// Inserting a previously unseen identity at capacity evicts the
    /// least recently touched entry first.
    pub fn put(&mut self, key: &str, count: u32) {
        self.clock += 1;

        if let Some(entry) = self.entries.get_mut(key) {
            entry.count = count;
            entry.last_write = Instant::now();
            entry.recency = self.clock;
            return;
        }

        if self.entries.len() >= self.capacity {
            self.purge_expired();
        }
        while self.entries.len() >= self.capacity {
            self.evict_lru();
        }

        self.entries.insert(
            key.to_string(),
            CacheEntry {
                count,
                last_write: Instant::now(),
                recency: self.clock,
            },
        );
    }

    /// Number of identities currently tracked (including not-yet-purged
    /// expired entries).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry whose last write is older than the TTL.
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.last_write.elapsed() < ttl);
        before - self.entries.len()
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.recency)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            tracing::debug!(identity = %key, "evicted least recently used entry");
        }
    }
}
