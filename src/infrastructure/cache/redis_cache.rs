//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheStats, CacheStore};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Keys deleted per `DEL` while invalidating.
const DELETE_BATCH: usize = 500;
/// `COUNT` hint passed to `SCAN`.
const SCAN_COUNT: usize = 1000;

/// Redis cache store.
///
/// Uses `ConnectionManager`, which reconnects transparently; each call clones
/// the manager handle. Errors are returned to the caller, which decides
/// whether they matter.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let cache = Self { conn: manager };
        cache.ping().await?;

        info!("✓ Connected to Redis");
        Ok(cache)
    }

    /// Enumerates keys matching `pattern` with a cursor-based `SCAN`.
    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
                .map_err(op_error)?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys)
    }
}

fn op_error(e: redis::RedisError) -> CacheError {
    if e.is_io_error() {
        CacheError::ConnectionError(e.to_string())
    } else {
        CacheError::OperationError(e.to_string())
    }
}

/// Reads `field:value` lines out of an `INFO` reply.
fn info_field<'a>(info: &'a str, field: &str) -> Option<&'a str> {
    info.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        (name == field).then(|| value.trim())
    })
}

fn parse_stats(info: &str, total_keys: u64) -> CacheStats {
    let counter = |field| {
        info_field(info, field)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0)
    };

    CacheStats {
        total_keys,
        memory_used: info_field(info, "used_memory_human")
            .unwrap_or("N/A")
            .to_string(),
        hits: counter("keyspace_hits"),
        misses: counter("keyspace_misses"),
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key).await.map_err(op_error)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(op_error)
    }

    async fn delete_matching(&self, pattern: &str) -> CacheResult<usize> {
        let keys = self.scan_keys(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn.clone();
        let mut deleted = 0usize;
        for chunk in keys.chunks(DELETE_BATCH) {
            let n: usize = conn.del(chunk.to_vec()).await.map_err(op_error)?;
            deleted += n;
        }

        debug!(pattern, deleted, "Redis delete_matching");
        Ok(deleted)
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        let mut conn = self.conn.clone();

        let info: String = redis::cmd("INFO")
            .query_async(&mut conn)
            .await
            .map_err(op_error)?;
        let total_keys: u64 = redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .map_err(op_error)?;

        Ok(parse_stats(&info, total_keys))
    }

    async fn clear(&self) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
            .map_err(op_error)
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.map_err(op_error)
    }
}
