//! Caching layer shared by both services.
//!
//! A [`CacheStore`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed store
//! - [`MemoryCache`] - In-process store for single instances and tests
//! - [`NullCache`] - Caching disabled or backend unreachable
//!
//! On top of the store sit [`Memoizer`]/[`Memoized`] for read-through caching
//! and [`CacheManager`] for invalidation and statistics. Neither lets a cache
//! failure reach the caller.

mod key;
mod manager;
mod memoize;
mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use key::{CacheKey, KEY_DELIMITER};
pub use manager::CacheManager;
pub use memoize::{Memoized, Memoizer};
pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheStats, CacheStore};
