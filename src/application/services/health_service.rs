//! Dependency health aggregation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::infrastructure::cache::CacheStore;

/// A round-trip check against one dependency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Returns a human-readable reason on failure.
    async fn probe(&self) -> Result<(), String>;
}

/// Outcome of one health check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    pub database_ok: bool,
    pub cache_ok: bool,
}

impl HealthReport {
    /// Healthy only when every check passed.
    pub fn is_healthy(&self) -> bool {
        self.database_ok && self.cache_ok
    }
}

/// Probes the relational store and the cache store.
///
/// Both probes run on every call, concurrently, and a failure in one never
/// prevents the other. No retries.
pub struct HealthService {
    database: Arc<dyn HealthProbe>,
    cache: Arc<dyn CacheStore>,
}

impl HealthService {
    pub fn new(database: Arc<dyn HealthProbe>, cache: Arc<dyn CacheStore>) -> Self {
        Self { database, cache }
    }

    pub async fn check(&self) -> HealthReport {
        let (database, cache) = tokio::join!(self.database.probe(), self.cache.ping());

        let database_ok = match database {
            Ok(()) => true,
            Err(reason) => {
                error!(%reason, "Database health check failed");
                false
            }
        };

        let cache_ok = match cache {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Cache health check failed");
                false
            }
        };

        HealthReport {
            database_ok,
            cache_ok,
        }
    }
}
