//! Cache store trait and error types.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Cache operation not supported: {0}")]
    Unsupported(&'static str),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Point-in-time statistics reported by a cache store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total_keys: u64,
    /// Human-readable memory usage (`"1.02M"` for Redis), `"N/A"` when unknown.
    pub memory_used: String,
    pub hits: u64,
    pub misses: u64,
}

/// Key-value store with per-entry time-to-live.
///
/// Implementations report failures honestly; callers that must not fail
/// because of the cache go through [`crate::infrastructure::cache::Memoizer`]
/// or [`crate::infrastructure::cache::CacheManager`], which degrade every
/// error to a miss or a fallback value.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed store
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process store
/// - [`crate::infrastructure::cache::NullCache`] - Caching disabled
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value, for `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Deletes every key matching a glob-style `pattern` (`*`, `?`, `[...]`).
    ///
    /// Returns the number of keys removed. This enumerates the keyspace and is
    /// O(number of keys).
    async fn delete_matching(&self, pattern: &str) -> CacheResult<usize>;

    /// Returns key count, memory usage and hit/miss counters.
    async fn stats(&self) -> CacheResult<CacheStats>;

    /// Removes every key from the store.
    async fn clear(&self) -> CacheResult<()>;

    /// Round-trips the store; used by the health endpoint.
    async fn ping(&self) -> CacheResult<()>;
}
