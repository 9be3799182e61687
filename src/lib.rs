//! NovaSignal Cache - An in-memory trading data cache
//!
//! Provides a generic cache engine with TTL expiration and LRU eviction,
//! plus a domain facade with deterministic request-shaped keys for OHLC
//! history, indicators, news, and predictions.

pub mod cache;
pub mod clock;
pub mod config;
pub mod trading;

pub use cache::{CacheEngine, CacheEntry, CacheStats};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, EngineConfig};
pub use trading::{TradingCacheStats, TradingDataCache};
