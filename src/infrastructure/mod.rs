//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain and application
//! layers, providing concrete implementations for data persistence and
//! caching.
//!
//! # Modules
//!
//! - [`cache`] - Cache stores (Redis, in-memory, no-op), memoization and maintenance
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod persistence;
