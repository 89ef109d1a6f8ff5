//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, rate limiting, response caching and
//! observability middleware.

pub mod auth;
pub mod rate_limit;
pub mod response_cache;
pub mod tracing;

pub use auth::AuthUser;
pub use response_cache::ResponseCache;
