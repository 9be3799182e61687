//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support and
//! best-effort payload size estimation.

use serde::Serialize;

/// Size charged to an entry when its payload cannot be serialized.
///
/// Size estimation is diagnostic only; a serializer failure must never
/// abort a `set`, so it degrades to this constant instead.
pub const FALLBACK_SIZE_BYTES: usize = 64;

// == Cache Entry ==
/// Represents a single cache entry with payload and expiry metadata.
///
/// The entry never reads the clock itself; callers pass the current time
/// into [`is_expired`] and [`ttl_remaining_ms`] so that all time reads go
/// through the engine's injected clock.
///
/// [`is_expired`]: CacheEntry::is_expired
/// [`ttl_remaining_ms`]: CacheEntry::ttl_remaining_ms
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The entry's own key, kept for introspection.
    pub key: String,
    /// The cached payload, opaque to the engine.
    pub data: T,
    /// Creation timestamp (Unix milliseconds).
    pub created_at: u64,
    /// Absolute expiry timestamp (Unix milliseconds).
    pub expires_at: u64,
    /// Best-effort serialized size of `data`, for reporting only.
    pub estimated_size_bytes: usize,
}

impl<T: Serialize> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_ms` after `now_ms`.
    ///
    /// `ttl_ms` is signed: a zero or negative TTL produces an entry that is
    /// already expired at creation time and will be dropped by the first
    /// read that touches it.
    pub fn new(key: String, data: T, now_ms: u64, ttl_ms: i64) -> Self {
        let estimated_size_bytes = estimate_size(&data);

        Self {
            key,
            created_at: now_ms,
            expires_at: now_ms.saturating_add_signed(ttl_ms),
            estimated_size_bytes,
            data,
        }
    }
}

impl<T> CacheEntry<T> {
    // == Is Expired ==
    /// Checks whether the entry has expired as of `now_ms`.
    ///
    /// The boundary is inclusive: at exactly the expiry mark the entry is
    /// treated as gone.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining lifetime in milliseconds (0 once expired).
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }
}

// == Size Estimation ==
/// Estimates the serialized byte size of a value.
///
/// Falls back to [`FALLBACK_SIZE_BYTES`] when the value cannot be
/// serialized; the error is swallowed on purpose.
pub fn estimate_size<T: Serialize>(value: &T) -> usize {
    serde_json::to_vec(value)
        .map(|bytes| bytes.len())
        .unwrap_or(FALLBACK_SIZE_BYTES)
}
