//! In-process cache store with TTL expiry.
//!
//! Useful for single-instance deployments without Redis and for tests. The
//! store can be switched offline to simulate an unreachable backend.

use super::service::{CacheError, CacheResult, CacheStats, CacheStore};
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// HashMap-backed cache with lazy expiry and hit/miss counters.
///
/// Expired entries are removed when read or enumerated; there is no
/// background sweeper.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    offline: AtomicBool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation fail with [`CacheError::ConnectionError`] until
    /// switched back online.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of live (non-expired) entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, e| !e.is_expired(now));
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_online(&self) -> CacheResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError(
                "memory cache is offline".to_string(),
            ));
        }
        Ok(())
    }
}

/// Translates a Redis-style glob into an anchored regex.
///
/// Supports `*`, `?`, `[...]` (with `^` negation) and `\` escapes.
pub(crate) fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                out.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    out.push('^');
                }
                for inner in chars.by_ref() {
                    if inner == ']' {
                        break;
                    }
                    if inner == '\\' || inner == '[' {
                        out.push('\\');
                    }
                    out.push(inner);
                }
                out.push(']');
            }
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push_str(&regex::escape(&escaped.to_string()));
                }
            }
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }

    out.push('$');
    Regex::new(&out)
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.ensure_online()?;

        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(entry.value.clone()))
            }
            Some(_) => {
                entries.remove(key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.ensure_online()?;

        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().await.insert(key.to_string(), entry);

        Ok(())
    }

    async fn delete_matching(&self, pattern: &str) -> CacheResult<usize> {
        self.ensure_online()?;

        let matcher = glob_to_regex(pattern)
            .map_err(|e| CacheError::OperationError(format!("Invalid pattern: {}", e)))?;

        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let mut deleted = 0;
        entries.retain(|k, e| {
            if e.is_expired(now) {
                return false;
            }
            if matcher.is_match(k) {
                deleted += 1;
                return false;
            }
            true
        });

        debug!(pattern, deleted, "Memory cache delete_matching");
        Ok(deleted)
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        self.ensure_online()?;

        Ok(CacheStats {
            total_keys: self.len().await as u64,
            memory_used: "N/A".to_string(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        })
    }

    async fn clear(&self) -> CacheResult<()> {
        self.ensure_online()?;
        self.entries.lock().await.clear();
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        self.ensure_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_to_regex() {
        let re = glob_to_regex("posts:*").unwrap();
        assert!(re.is_match("posts:1"));
        assert!(re.is_match("posts:"));
        assert!(!re.is_match("categories:posts:1"));

        let re = glob_to_regex("h?llo").unwrap();
        assert!(re.is_match("hello"));
        assert!(!re.is_match("heello"));

        let re = glob_to_regex("h[ae]llo").unwrap();
        assert!(re.is_match("hallo"));
        assert!(!re.is_match("hillo"));

        let re = glob_to_regex("h[^e]llo").unwrap();
        assert!(re.is_match("hallo"));
        assert!(!re.is_match("hello"));

        let re = glob_to_regex("a.b\\*").unwrap();
        assert!(re.is_match("a.b*"));
        assert!(!re.is_match("axb*"));
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::from_secs(10)).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(cache.get("missing").await.unwrap(), None);

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_keys, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::from_secs(5)).await.unwrap();

        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(cache.get("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_matching_only_touches_namespace() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        cache.set("posts:1", "a", ttl).await.unwrap();
        cache.set("posts:2", "b", ttl).await.unwrap();
        cache.set("categories:1", "c", ttl).await.unwrap();

        let deleted = cache.delete_matching("posts:*").await.unwrap();

        assert_eq!(deleted, 2);
        assert!(cache.get("posts:1").await.unwrap().is_none());
        assert!(cache.get("categories:1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_offline_store_fails() {
        let cache = MemoryCache::new();
        cache.set_offline(true);

        assert!(cache.ping().await.is_err());
        assert!(cache.get("k").await.is_err());
        assert!(cache.set("k", "v", Duration::from_secs(1)).await.is_err());

        cache.set_offline(false);
        assert!(cache.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryCache::new();
        cache.set("a", "1", Duration::from_secs(60)).await.unwrap();
        cache.clear().await.unwrap();
        assert!(cache.is_empty().await);
    }
}
