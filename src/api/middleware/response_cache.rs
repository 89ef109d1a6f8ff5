//! HTTP response cache middleware.
//!
//! Caches `200 OK` responses to `GET` requests in the shared [`CacheStore`]
//! for a per-route TTL. A hit is served without running the handler, so
//! handler side effects (such as counting a post view) happen at most once
//! per key and TTL window.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{Body, HttpBody, to_bytes},
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::dto::pagination::request_origin;
use crate::infrastructure::cache::{CacheKey, CacheStore, Memoizer};

/// Largest body the cache will store; bigger responses are served uncached.
const MAX_CACHED_BODY: usize = 1024 * 1024;

/// Per-route response cache handle, used as middleware state.
#[derive(Clone)]
pub struct ResponseCache {
    memoizer: Memoizer,
    namespace: String,
}

impl ResponseCache {
    /// `prefix` is the service-wide key prefix; every key lands under
    /// `{prefix}:response`.
    pub fn new(store: Arc<dyn CacheStore>, prefix: &str, ttl: Duration) -> Self {
        Self {
            memoizer: Memoizer::new(store, ttl),
            namespace: format!("{prefix}:response"),
        }
    }

    /// Key for a request: path, `scheme://host`, then query parameters
    /// sorted by name.
    ///
    /// The origin is part of the key because cached pages embed absolute
    /// links built from it.
    pub fn key_for(&self, request: &Request) -> String {
        let uri = request.uri();
        let origin = request_origin(request.headers(), uri);
        let pairs = uri
            .query()
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_else(Vec::new);

        pairs
            .into_iter()
            .fold(
                CacheKey::new(self.namespace.as_str())
                    .arg(uri.path())
                    .arg(origin),
                |key, (name, value)| key.named(name, value),
            )
            .build()
    }
}

/// Stored form of a response.
#[derive(Debug, Serialize, Deserialize)]
struct CachedResponse {
    status: u16,
    headers: Vec<(String, String)>,
    /// Base64-encoded body.
    body: String,
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let body = match STANDARD.decode(&self.body) {
            Ok(body) => body,
            Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        };

        let mut builder = Response::builder().status(self.status);
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::from_str(&value),
            ) {
                builder = builder.header(name, value);
            }
        }

        builder
            .body(Body::from(body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

/// Why a response was not stored.
enum Uncached {
    /// Not a `200 OK`, or a body without a known size within
    /// [`MAX_CACHED_BODY`]; passed through untouched.
    Passthrough(Response),
    /// The body stream failed while buffering.
    Body,
}

/// Serves cached responses and stores fresh `200 OK` ones.
///
/// Non-`GET` requests pass straight through, as do responses too large to
/// store. When the store is unreachable every request runs the handler.
///
/// # Example
///
/// ```rust,ignore
/// let cache = ResponseCache::new(store, "blog", Duration::from_secs(60));
/// let route = get(post_detail_handler)
///     .layer(middleware::from_fn_with_state(cache, response_cache::layer));
/// ```
pub async fn layer(
    State(cache): State<ResponseCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = cache.key_for(&request);

    let outcome = cache
        .memoizer
        .get_or_try_insert(&key, || async move {
            let response = next.run(request).await;
            if response.status() != StatusCode::OK {
                return Err(Uncached::Passthrough(response));
            }

            let (parts, body) = response.into_parts();
            let fits = body
                .size_hint()
                .upper()
                .is_some_and(|len| len <= MAX_CACHED_BODY as u64);
            if !fits {
                return Err(Uncached::Passthrough(Response::from_parts(parts, body)));
            }

            let bytes = to_bytes(body, MAX_CACHED_BODY)
                .await
                .map_err(|_| Uncached::Body)?;

            Ok(CachedResponse {
                status: parts.status.as_u16(),
                headers: parts
                    .headers
                    .iter()
                    .filter_map(|(k, v)| {
                        v.to_str().ok().map(|s| (k.to_string(), s.to_string()))
                    })
                    .collect(),
                body: STANDARD.encode(&bytes),
            })
        })
        .await;

    match outcome {
        Ok(cached) => cached.into_response(),
        Err(Uncached::Passthrough(response)) => response,
        Err(Uncached::Body) => {
            warn!(%key, "Failed to buffer response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
