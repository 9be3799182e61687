//! Cache Statistics Module
//!
//! Snapshot type describing the state of a single cache engine, plus the
//! hit/miss/eviction telemetry counters.

use serde::Serialize;

// == Cache Stats ==
/// A non-mutating snapshot of one engine's state.
///
/// `size` counts entries physically present in the map, including those
/// that have expired but have not been purged yet; `expired_count` says how
/// many of them are in that limbo state. Taking a snapshot never triggers
/// cleanup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Entries physically present in the store.
    pub size: usize,
    /// Sum of the per-entry serialized-size estimates, in bytes.
    pub total_estimated_bytes: usize,
    /// Entries past their expiry that no read has purged yet.
    pub expired_count: usize,
    /// Configured capacity of the engine.
    pub max_entries: usize,
    /// Successful retrievals.
    pub hits: u64,
    /// Failed retrievals (absent or expired).
    pub misses: u64,
    /// Entries removed by the LRU policy.
    pub evictions: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any retrieval.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = CacheStats::default();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.total_estimated_bytes, 0);
        assert_eq!(stats.expired_count, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_stats_serializes_to_json() {
        let stats = CacheStats {
            size: 2,
            total_estimated_bytes: 128,
            expired_count: 1,
            max_entries: 50,
            hits: 4,
            misses: 2,
            evictions: 1,
        };

        let json: serde_json::Value = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["size"], 2);
        assert_eq!(json["expired_count"], 1);
        assert_eq!(json["max_entries"], 50);
    }
}
