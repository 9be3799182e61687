//! Cache Module
//!
//! Generic in-memory caching with TTL expiration and LRU eviction.

mod engine;
mod entry;
mod stats;


// Re-export public types
pub use engine::CacheEngine;
pub use entry::{estimate_size, CacheEntry, FALLBACK_SIZE_BYTES};
pub use stats::CacheStats;
