//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limiter for credential endpoints (register, login, token).
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Limits are
/// applied per client IP taken from the socket peer address, so the service
/// must be served with `into_make_service_with_connect_info::<SocketAddr>`.
///
/// # Errors
///
/// Returns an error if the limiter configuration is rejected.
///
/// # Example
///
/// ```rust,ignore
/// let credentials = Router::new()
///     .route("/login", post(login_handler))
///     .layer(rate_limit::secure_layer()?);
/// ```
pub fn secure_layer()
-> Result<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(1)
        .burst_size(10)
        .finish()
        .context("Invalid rate limiter configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
