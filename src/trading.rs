//! Trading Data Cache Module
//!
//! Domain facade over four independent cache engines — OHLC history,
//! indicators, news, and ML predictions — each with its own default TTL and
//! capacity. The facade fetches nothing itself: it is a memoization layer
//! keyed by request shape, so two call sites describing the same logical
//! request share an entry automatically.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::cache::{CacheEngine, CacheStats};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;

// == Key Construction ==
// The exact field order and separators are part of the contract: any two
// calls with identical logical parameters must produce byte-identical keys.
// The namespace prefix is a convention; isolation comes from the engines
// being separate instances.

/// Key for an OHLC history request, e.g. `history:stocks:AAPL:5m:30d`.
pub fn history_key(symbol: &str, market: &str, interval_min: u32, days: u32) -> String {
    format!("history:{market}:{symbol}:{interval_min}m:{days}d")
}

/// Key for an indicator request, e.g. `indicators:stocks:AAPL:5m:30d`.
pub fn indicators_key(symbol: &str, market: &str, interval_min: u32, days: u32) -> String {
    format!("indicators:{market}:{symbol}:{interval_min}m:{days}d")
}

/// Key for a news request, e.g. `news:crypto:BTC/USD`.
///
/// News is not time-windowed per candle, so the key carries no interval or
/// day count.
pub fn news_key(symbol: &str, market: &str) -> String {
    format!("news:{market}:{symbol}")
}

/// Key for a prediction request, e.g. `predictions:stocks:AAPL:5m:30d`.
pub fn predictions_key(symbol: &str, market: &str, interval_min: u32, days: u32) -> String {
    format!("predictions:{market}:{symbol}:{interval_min}m:{days}d")
}

// == Aggregated Stats ==
/// Per-domain stats snapshots plus the total entry count across domains.
#[derive(Debug, Clone, Serialize)]
pub struct TradingCacheStats {
    pub history: CacheStats,
    pub indicators: CacheStats,
    pub news: CacheStats,
    pub predictions: CacheStats,
    pub total_entries: usize,
}

// == Trading Data Cache ==
/// Four named sub-caches for trading dashboard data.
///
/// Intended to be constructed once per process and handed to data-fetching
/// callers by reference; nothing enforces single-instance use, and tests
/// construct their own instances with their own clocks. No entry is ever
/// shared or migrated between sub-caches.
///
/// None of the operations validate inputs or fail: a malformed tuple (empty
/// symbol, zero interval) just produces a key that no well-formed request
/// will ever collide with.
#[derive(Debug)]
pub struct TradingDataCache {
    history: CacheEngine<Value>,
    indicators: CacheEngine<Value>,
    news: CacheEngine<Value>,
    predictions: CacheEngine<Value>,
}

impl TradingDataCache {
    // == Constructors ==
    /// Creates the facade on the system clock.
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates the facade on an injected clock, shared by all four engines.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        info!(
            history_ttl_ms = config.history.default_ttl_ms,
            indicators_ttl_ms = config.indicators.default_ttl_ms,
            news_ttl_ms = config.news.default_ttl_ms,
            predictions_ttl_ms = config.predictions.default_ttl_ms,
            "trading data cache initialized"
        );

        Self {
            history: CacheEngine::with_clock(config.history, Arc::clone(&clock)),
            indicators: CacheEngine::with_clock(config.indicators, Arc::clone(&clock)),
            news: CacheEngine::with_clock(config.news, Arc::clone(&clock)),
            predictions: CacheEngine::with_clock(config.predictions, clock),
        }
    }

    // == History ==
    pub fn get_history(
        &mut self,
        symbol: &str,
        market: &str,
        interval_min: u32,
        days: u32,
    ) -> Option<Value> {
        self.history
            .get(&history_key(symbol, market, interval_min, days))
    }

    pub fn set_history(
        &mut self,
        symbol: &str,
        market: &str,
        interval_min: u32,
        days: u32,
        value: Value,
    ) {
        self.history
            .set(&history_key(symbol, market, interval_min, days), value, None);
    }

    // == Indicators ==
    pub fn get_indicators(
        &mut self,
        symbol: &str,
        market: &str,
        interval_min: u32,
        days: u32,
    ) -> Option<Value> {
        self.indicators
            .get(&indicators_key(symbol, market, interval_min, days))
    }

    pub fn set_indicators(
        &mut self,
        symbol: &str,
        market: &str,
        interval_min: u32,
        days: u32,
        value: Value,
    ) {
        self.indicators.set(
            &indicators_key(symbol, market, interval_min, days),
            value,
            None,
        );
    }

    // == News ==
    pub fn get_news(&mut self, symbol: &str, market: &str) -> Option<Value> {
        self.news.get(&news_key(symbol, market))
    }

    pub fn set_news(&mut self, symbol: &str, market: &str, value: Value) {
        self.news.set(&news_key(symbol, market), value, None);
    }

    // == Predictions ==
    pub fn get_predictions(
        &mut self,
        symbol: &str,
        market: &str,
        interval_min: u32,
        days: u32,
    ) -> Option<Value> {
        self.predictions
            .get(&predictions_key(symbol, market, interval_min, days))
    }

    pub fn set_predictions(
        &mut self,
        symbol: &str,
        market: &str,
        interval_min: u32,
        days: u32,
        value: Value,
    ) {
        self.predictions.set(
            &predictions_key(symbol, market, interval_min, days),
            value,
            None,
        );
    }

    // == Stats ==
    /// Aggregates each engine's snapshot without mutating any of them.
    pub fn stats(&self) -> TradingCacheStats {
        let history = self.history.stats();
        let indicators = self.indicators.stats();
        let news = self.news.stats();
        let predictions = self.predictions.stats();
        let total_entries = history.size + indicators.size + news.size + predictions.size;

        TradingCacheStats {
            history,
            indicators,
            news,
            predictions,
            total_entries,
        }
    }

    // == Clear ==
    /// Empties all four sub-caches (used on workspace reset).
    pub fn clear(&mut self) {
        self.history.clear();
        self.indicators.clear();
        self.news.clear();
        self.predictions.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use serde_json::json;

    fn test_cache(clock: &Arc<ManualClock>) -> TradingDataCache {
        let clock: Arc<dyn Clock> = clock.clone();
        TradingDataCache::with_clock(Config::default(), clock)
    }

    #[test]
    fn test_key_formats() {
        assert_eq!(history_key("AAPL", "stocks", 5, 30), "history:stocks:AAPL:5m:30d");
        assert_eq!(
            indicators_key("ETH/USD", "crypto", 15, 7),
            "indicators:crypto:ETH/USD:15m:7d"
        );
        assert_eq!(news_key("BTC/USD", "crypto"), "news:crypto:BTC/USD");
        assert_eq!(
            predictions_key("TSLA", "stocks", 60, 90),
            "predictions:stocks:TSLA:60m:90d"
        );
    }

    #[test]
    fn test_identical_tuples_share_an_entry() {
        let clock = Arc::new(ManualClock::new(0));
        let mut cache = test_cache(&clock);

        cache.set_history("AAPL", "stocks", 5, 30, json!([1, 2, 3]));
        assert_eq!(
            cache.get_history("AAPL", "stocks", 5, 30),
            Some(json!([1, 2, 3]))
        );
    }

    #[test]
    fn test_varying_any_parameter_misses() {
        let clock = Arc::new(ManualClock::new(0));
        let mut cache = test_cache(&clock);

        cache.set_history("AAPL", "stocks", 5, 30, json!(1));

        assert_eq!(cache.get_history("MSFT", "stocks", 5, 30), None);
        assert_eq!(cache.get_history("AAPL", "crypto", 5, 30), None);
        assert_eq!(cache.get_history("AAPL", "stocks", 15, 30), None);
        assert_eq!(cache.get_history("AAPL", "stocks", 5, 7), None);
    }

    #[test]
    fn test_sub_caches_are_isolated() {
        let clock = Arc::new(ManualClock::new(0));
        let mut cache = test_cache(&clock);

        cache.set_indicators("AAPL", "stocks", 5, 30, json!("rsi"));

        assert_eq!(cache.get_history("AAPL", "stocks", 5, 30), None);
        assert_eq!(cache.get_predictions("AAPL", "stocks", 5, 30), None);
        assert_eq!(
            cache.get_indicators("AAPL", "stocks", 5, 30),
            Some(json!("rsi"))
        );
    }

    #[test]
    fn test_domain_ttls_are_independent() {
        let clock = Arc::new(ManualClock::new(0));
        let mut cache = test_cache(&clock);

        cache.set_history("AAPL", "stocks", 5, 30, json!(1));
        cache.set_news("AAPL", "stocks", json!(["headline"]));

        // Past the 30s history TTL, inside the 10min news TTL.
        clock.advance(31_000);
        assert_eq!(cache.get_history("AAPL", "stocks", 5, 30), None);
        assert_eq!(cache.get_news("AAPL", "stocks"), Some(json!(["headline"])));
    }

    #[test]
    fn test_malformed_inputs_do_not_fail() {
        let clock = Arc::new(ManualClock::new(0));
        let mut cache = test_cache(&clock);

        cache.set_history("", "stocks", 0, 0, json!(null));
        assert_eq!(cache.get_history("", "stocks", 0, 0), Some(json!(null)));
        assert_eq!(cache.get_history("AAPL", "stocks", 5, 30), None);
    }

    #[test]
    fn test_stats_aggregation() {
        let clock = Arc::new(ManualClock::new(0));
        let mut cache = test_cache(&clock);

        cache.set_history("AAPL", "stocks", 5, 30, json!(1));
        cache.set_history("MSFT", "stocks", 5, 30, json!(2));
        cache.set_news("AAPL", "stocks", json!(3));

        let stats = cache.stats();
        assert_eq!(stats.history.size, 2);
        assert_eq!(stats.news.size, 1);
        assert_eq!(stats.indicators.size, 0);
        assert_eq!(stats.predictions.size, 0);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.history.max_entries, 50);
    }

    #[test]
    fn test_clear_empties_all_domains() {
        let clock = Arc::new(ManualClock::new(0));
        let mut cache = test_cache(&clock);

        cache.set_history("AAPL", "stocks", 5, 30, json!(1));
        cache.set_indicators("AAPL", "stocks", 5, 30, json!(2));
        cache.set_news("AAPL", "stocks", json!(3));
        cache.set_predictions("AAPL", "stocks", 5, 30, json!(4));

        cache.clear();
        assert_eq!(cache.stats().total_entries, 0);
    }
}
