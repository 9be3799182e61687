//! Cache Engine Module
//!
//! Generic keyed store with TTL expiration and LRU-bounded capacity.
//!
//! Expiry is lazy on the read path: `get` and `has` drop only the entry they
//! touch. Capacity is eager on the write path: every `set` finishes with a
//! cleanup pass, so `entries.len() <= max_entries` holds whenever a mutating
//! call returns. That asymmetry keeps reads cheap and writes bounded, and is
//! part of the contract rather than an implementation accident.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;

// == Cache Engine ==
/// Generic in-memory cache with TTL expiry and LRU eviction.
///
/// Values are opaque; `Serialize` is only required for the best-effort
/// size estimate, which falls back to a constant when serialization fails.
#[derive(Debug)]
pub struct CacheEngine<T> {
    /// Key-value storage.
    entries: HashMap<String, CacheEntry<T>>,
    /// Last-access stamp per key, ranked for eviction: (timestamp ms,
    /// touch sequence number).
    ///
    /// Kept separate from the entries so that reads mark recency without
    /// rewriting the entry itself. A key is present here iff it is present
    /// in `entries`. The sequence number breaks timestamp ties (several
    /// touches inside one millisecond are routine on the system clock) in
    /// touch order, so the most recent write always ranks newest.
    access_times: HashMap<String, (u64, u64)>,
    /// Monotonic counter behind the tie-breaking sequence numbers.
    access_seq: u64,
    /// Immutable engine configuration.
    config: EngineConfig,
    /// Injected time source.
    clock: Arc<dyn Clock>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<T: Clone + Serialize> CacheEngine<T> {
    // == Constructors ==
    /// Creates an engine on the system clock.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an engine on an injected clock.
    ///
    /// Tests share a [`crate::clock::ManualClock`] handle with the engine
    /// and advance it to cross TTL boundaries deterministically.
    pub fn with_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            access_times: HashMap::new(),
            access_seq: 0,
            config,
            clock,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Records a touch for `key`, stamping it with the current time and the
    /// next sequence number.
    fn touch(&mut self, key: &str, now: u64) {
        self.access_seq += 1;
        self.access_times
            .insert(key.to_string(), (now, self.access_seq));
    }

    // == Set ==
    /// Inserts or overwrites the entry for `key`.
    ///
    /// The entry's lifetime is `ttl_ms` (the configured default when
    /// `None`); zero and negative TTLs are legal and produce an entry that
    /// is already expired. The access record is refreshed and a cleanup
    /// pass runs before returning, so capacity is never observably
    /// exceeded. This operation cannot fail; the empty string is a legal
    /// key.
    pub fn set(&mut self, key: &str, value: T, ttl_ms: Option<i64>) {
        let now = self.clock.now_ms();
        let ttl = ttl_ms.unwrap_or(self.config.default_ttl_ms);

        let entry = CacheEntry::new(key.to_string(), value, now, ttl);
        self.entries.insert(key.to_string(), entry);
        self.touch(key, now);

        self.cleanup(now);
    }

    // == Get ==
    /// Retrieves a value, marking the key as recently used.
    ///
    /// An expired entry is deleted on discovery and reported as a miss;
    /// nothing else is swept.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.misses += 1;
                return None;
            }
        };

        if expired {
            self.remove_key(key);
            self.misses += 1;
            return None;
        }

        self.touch(key, now);
        self.hits += 1;
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    // == Has ==
    /// Checks for a live entry without marking it as used.
    ///
    /// Shares `get`'s expiry check and passive delete, but a presence probe
    /// does not count as a use for LRU purposes and is counted as neither
    /// hit nor miss.
    pub fn has(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => return false,
        };

        if expired {
            self.remove_key(key);
            return false;
        }

        true
    }

    // == Delete ==
    /// Removes an entry and its access record.
    ///
    /// Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.access_times.remove(key);
        removed
    }

    // == Clear ==
    /// Empties the cache unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_times.clear();
    }

    // == Size ==
    /// Returns the live entry count.
    ///
    /// Runs the full cleanup pass first, so the count excludes expired
    /// entries; this is a documented mutating read.
    pub fn size(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.cleanup(now);
        self.entries.len()
    }

    // == Stats ==
    /// Takes a snapshot of the engine's state without mutating it.
    ///
    /// `expired_count` is computed by inspection: entries a read would
    /// treat as gone but which still physically occupy the map.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_ms();

        let mut total_estimated_bytes = 0;
        let mut expired_count = 0;
        for entry in self.entries.values() {
            total_estimated_bytes += entry.estimated_size_bytes;
            if entry.is_expired(now) {
                expired_count += 1;
            }
        }

        CacheStats {
            size: self.entries.len(),
            total_estimated_bytes,
            expired_count,
            max_entries: self.config.max_entries,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }

    // == Cleanup Pass ==
    /// Purges expired entries, then evicts by oldest access time until the
    /// store fits `max_entries`.
    ///
    /// Ties on the access timestamp break by touch order: sequence numbers
    /// are unique and monotonic, so eviction is deterministic for a fixed
    /// input sequence and the write that triggered the pass always ranks
    /// newest — it can never be its own eviction victim.
    fn cleanup(&mut self, now: u64) {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        if !expired.is_empty() {
            trace!(count = expired.len(), "purging expired entries");
        }
        for key in expired {
            self.remove_key(&key);
        }

        if self.entries.len() <= self.config.max_entries {
            return;
        }

        let mut by_age: Vec<(String, (u64, u64))> = self
            .access_times
            .iter()
            .map(|(key, &stamp)| (key.clone(), stamp))
            .collect();
        by_age.sort_by(|a, b| a.1.cmp(&b.1));

        let excess = self.entries.len() - self.config.max_entries;
        for (key, _) in by_age.into_iter().take(excess) {
            self.remove_key(&key);
            self.evictions += 1;
            debug!(key = %key, "evicted least recently used entry");
        }
    }

    /// Removes a key from both maps, keeping them in sync.
    fn remove_key(&mut self, key: &str) {
        self.entries.remove(key);
        self.access_times.remove(key);
    }
}
