//! HTTP surface of both services.
//!
//! - [`dto`] - Request bodies, query parameters and response shapes
//! - [`handlers`] - Blog, auth and health handlers
//! - [`middleware`] - Bearer auth, rate limiting, response cache, tracing
//! - [`routes`] - Route tables for the blog and auth routers

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
