//! Top-level routers of the two services.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on auth credential endpoints
//! - **Authentication** - Bearer JWT on `/me` and `/logout`
//! - **Response cache** - Category list and post detail
//! - **Path normalization** - Trailing slash handling

use anyhow::Result;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::{AuthState, BlogState};

/// The blog service application.
pub fn blog_app(state: BlogState) -> NormalizePath<Router> {
    let router = api::routes::blog_routes(&state)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// The auth service application.
///
/// Credential endpoints are rate limited per peer IP, so the app must be
/// served with connect info.
///
/// # Errors
///
/// Returns an error if the rate limiter cannot be configured.
pub fn auth_app(state: AuthState) -> Result<NormalizePath<Router>> {
    let credentials = api::routes::credential_routes().layer(rate_limit::secure_layer()?);

    let router = api::routes::auth_routes(state.clone(), credentials)
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
