//! NovaSignal Cache - demo binary
//!
//! Builds a trading data cache from the environment, runs a short burst of
//! sample traffic, and logs the aggregated statistics a debug panel would
//! poll.

use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use novasignal_cache::{Config, TradingDataCache};

fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "novasignal_cache=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting NovaSignal cache demo");

    let config = Config::from_env();
    info!(
        "Configuration loaded: history={}ms/{} indicators={}ms/{} news={}ms/{} predictions={}ms/{}",
        config.history.default_ttl_ms,
        config.history.max_entries,
        config.indicators.default_ttl_ms,
        config.indicators.max_entries,
        config.news.default_ttl_ms,
        config.news.max_entries,
        config.predictions.default_ttl_ms,
        config.predictions.max_entries,
    );

    let mut cache = TradingDataCache::new(config);

    // Simulate the fetch-on-miss pattern: first request misses and gets
    // populated, the repeat request for the same tuple hits.
    for symbol in ["AAPL", "MSFT", "TSLA"] {
        if cache.get_history(symbol, "stocks", 5, 30).is_none() {
            info!(symbol, "history miss, populating");
            cache.set_history(
                symbol,
                "stocks",
                5,
                30,
                json!([{"o": 180.0, "h": 182.5, "l": 179.1, "c": 181.2}]),
            );
        }
        let hit = cache.get_history(symbol, "stocks", 5, 30).is_some();
        info!(symbol, hit, "repeat history request");
    }

    cache.set_news("BTC/USD", "crypto", json!(["headline one", "headline two"]));
    cache.set_predictions("AAPL", "stocks", 5, 30, json!({"direction": "up", "confidence": 0.62}));

    let stats = cache.stats();
    match serde_json::to_string_pretty(&stats) {
        Ok(rendered) => info!("cache stats:\n{rendered}"),
        Err(err) => info!(%err, "could not render stats"),
    }
}
