//! Configuration Module
//!
//! Per-engine and per-domain cache configuration with environment overrides.

use std::env;

// == Engine Config ==
/// Configuration for a single cache engine, immutable after construction.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// TTL applied when a `set` does not pass one, in milliseconds.
    ///
    /// Signed so that zero and negative defaults are expressible (an entry
    /// born expired), matching the per-call TTL semantics.
    pub default_ttl_ms: i64,
    /// Maximum number of entries before LRU eviction kicks in.
    pub max_entries: usize,
}

// == Domain Config ==
/// Per-domain configuration for the trading data cache.
///
/// Price history ages fast and gets a short TTL; news barely moves and can
/// live for minutes. The values are configuration constants, not computed.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub history: EngineConfig,
    pub indicators: EngineConfig,
    pub news: EngineConfig,
    pub predictions: EngineConfig,
}

impl Config {
    /// Creates a Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `NOVA_HISTORY_TTL_MS` / `NOVA_HISTORY_MAX` (defaults: 30000, 50)
    /// - `NOVA_INDICATORS_TTL_MS` / `NOVA_INDICATORS_MAX` (defaults: 60000, 40)
    /// - `NOVA_NEWS_TTL_MS` / `NOVA_NEWS_MAX` (defaults: 600000, 20)
    /// - `NOVA_PREDICTIONS_TTL_MS` / `NOVA_PREDICTIONS_MAX` (defaults: 300000, 30)
    ///
    /// Unset or unparsable variables fall back to the defaults; loading
    /// configuration never fails.
    pub fn from_env() -> Self {
        Self {
            history: EngineConfig {
                default_ttl_ms: env_i64("NOVA_HISTORY_TTL_MS", 30_000),
                max_entries: env_usize("NOVA_HISTORY_MAX", 50),
            },
            indicators: EngineConfig {
                default_ttl_ms: env_i64("NOVA_INDICATORS_TTL_MS", 60_000),
                max_entries: env_usize("NOVA_INDICATORS_MAX", 40),
            },
            news: EngineConfig {
                default_ttl_ms: env_i64("NOVA_NEWS_TTL_MS", 600_000),
                max_entries: env_usize("NOVA_NEWS_MAX", 20),
            },
            predictions: EngineConfig {
                default_ttl_ms: env_i64("NOVA_PREDICTIONS_TTL_MS", 300_000),
                max_entries: env_usize("NOVA_PREDICTIONS_MAX", 30),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history: EngineConfig {
                default_ttl_ms: 30_000,
                max_entries: 50,
            },
            indicators: EngineConfig {
                default_ttl_ms: 60_000,
                max_entries: 40,
            },
            news: EngineConfig {
                default_ttl_ms: 600_000,
                max_entries: 20,
            },
            predictions: EngineConfig {
                default_ttl_ms: 300_000,
                max_entries: 30,
            },
        }
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
