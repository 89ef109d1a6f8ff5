//! Operator-facing cache maintenance that never fails the caller.

use super::service::{CacheStats, CacheStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Invalidation, statistics and flush over a [`CacheStore`].
///
/// Each operation degrades to a fallback value (`0`, `None`, `false`) when
/// the store is unreachable or unsupported; the failure is logged.
#[derive(Clone)]
pub struct CacheManager {
    store: Arc<dyn CacheStore>,
}

impl CacheManager {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Deletes keys matching a glob pattern such as `blog:posts:*`.
    ///
    /// Returns the number of keys removed, `0` when the store fails. This
    /// scans the whole keyspace.
    pub async fn invalidate(&self, pattern: &str) -> usize {
        match self.store.delete_matching(pattern).await {
            Ok(deleted) => {
                info!(pattern, deleted, "Cache invalidated");
                deleted
            }
            Err(e) => {
                warn!(pattern, error = %e, "Cache invalidation failed");
                0
            }
        }
    }

    pub async fn stats(&self) -> Option<CacheStats> {
        match self.store.stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!(error = %e, "Cache stats unavailable");
                None
            }
        }
    }

    /// Flushes the entire store. Returns whether it succeeded.
    pub async fn clear_all(&self) -> bool {
        match self.store.clear().await {
            Ok(()) => {
                info!("Cache cleared");
                true
            }
            Err(e) => {
                warn!(error = %e, "Cache clear failed");
                false
            }
        }
    }
}
