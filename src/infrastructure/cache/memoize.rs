//! Read-through memoization over a [`CacheStore`].
//!
//! [`Memoizer`] is the primitive: look the key up, and on a miss run the
//! operation and store its JSON-encoded result for a fixed TTL. [`Memoized`]
//! bundles an operation with the function that derives its key, so call sites
//! only pass arguments.
//!
//! Cache failures never fail the caller. A store error on lookup is a miss, a
//! store error on write is logged and dropped, and an undecodable cached value
//! is recomputed. Errors returned by the operation itself are propagated and
//! never cached.

use super::key::CacheKey;
use super::service::CacheStore;
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Read-through cache handle with a fixed TTL.
#[derive(Clone)]
pub struct Memoizer {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl Memoizer {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Returns the cached value for `key`, or runs `op` and caches its `Ok`
    /// result.
    ///
    /// On a hit `op` is not called, so none of its side effects happen.
    /// Concurrent misses for the same key may both run `op`; the last write
    /// wins.
    pub async fn get_or_try_insert<T, E, F, Fut>(&self, key: &str, op: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(key, "Cache HIT");
                    return Ok(value);
                }
                Err(e) => warn!(key, error = %e, "Discarding undecodable cache entry"),
            },
            Ok(None) => debug!(key, "Cache MISS"),
            Err(e) => warn!(key, error = %e, "Cache lookup failed, computing value"),
        }

        let value = op().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.store.set(key, &raw, self.ttl).await {
                    warn!(key, error = %e, "Cache write failed");
                }
            }
            Err(e) => warn!(key, error = %e, "Value not cacheable"),
        }

        Ok(value)
    }
}

/// An operation wrapped with its cache key derivation.
///
/// `key_fn` maps the call arguments to a [`CacheKey`]; `op` computes the value
/// on a miss. Arguments are passed as a single value (use a tuple or struct
/// for several).
///
/// ```no_run
/// # use std::{sync::Arc, time::Duration};
/// # use blog_platform::infrastructure::cache::{CacheKey, MemoryCache, Memoized};
/// # async fn demo() {
/// let squares = Memoized::new(
///     Arc::new(MemoryCache::new()),
///     Duration::from_secs(60),
///     |n: &u64| CacheKey::new("squares").arg(n),
///     |n: u64| async move { Ok::<_, std::convert::Infallible>(n * n) },
/// );
///
/// assert_eq!(squares.call(12).await.unwrap(), 144);
/// # }
/// ```
pub struct Memoized<A, K, F> {
    memoizer: Memoizer,
    key_fn: K,
    op: F,
    _args: PhantomData<fn(A)>,
}

impl<A, K, F> Memoized<A, K, F>
where
    K: Fn(&A) -> CacheKey,
{
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration, key_fn: K, op: F) -> Self {
        Self {
            memoizer: Memoizer::new(store, ttl),
            key_fn,
            op,
            _args: PhantomData,
        }
    }

    /// The key a call with `args` reads and writes.
    pub fn key_for(&self, args: &A) -> String {
        (self.key_fn)(args).build()
    }

    pub async fn call<T, E, Fut>(&self, args: A) -> Result<T, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Serialize + DeserializeOwned,
    {
        let key = self.key_for(&args);
        self.memoizer
            .get_or_try_insert(&key, || (self.op)(args))
            .await
    }
}
