//! Cache store that stores nothing.

use super::service::{CacheError, CacheResult, CacheStats, CacheStore};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that never holds data.
///
/// Every `get` is a miss and every `set` is discarded, so memoized calls
/// always run their operation.
///
/// Two flavours exist:
///
/// - [`NullCache::new`]: caching deliberately disabled; `ping` succeeds.
/// - [`NullCache::unreachable`]: the configured Redis could not be reached at
///   startup; `ping` and `stats` report the failure so health checks and the
///   admin CLI surface it.
#[derive(Debug, Clone)]
pub struct NullCache {
    unreachable: Option<String>,
}

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self { unreachable: None }
    }

    /// Stand-in for a backend that failed to connect.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        debug!(%reason, "Using NullCache (cache backend unreachable)");
        Self {
            unreachable: Some(reason),
        }
    }

    fn check(&self) -> CacheResult<()> {
        match &self.unreachable {
            Some(reason) => Err(CacheError::ConnectionError(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn delete_matching(&self, _pattern: &str) -> CacheResult<usize> {
        self.check()?;
        Ok(0)
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        self.check()?;
        Err(CacheError::Unsupported("stats on disabled cache"))
    }

    async fn clear(&self) -> CacheResult<()> {
        self.check()
    }

    async fn ping(&self) -> CacheResult<()> {
        self.check()
    }
}
