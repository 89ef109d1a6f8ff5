//! API route configuration.
//!
//! Paths are declared without trailing slashes; [`crate::routes`] wraps the
//! routers in a path normalizer so `/api/posts/` and `/api/posts` match the
//! same route.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::handlers::{
    category_list_handler, health_handler, login_handler, logout_handler, me_handler,
    post_detail_handler, post_list_handler, register_handler, token_obtain_handler,
    token_refresh_handler,
};
use crate::api::middleware::{ResponseCache, auth, response_cache};
use crate::state::{AuthState, BlogState};

/// Blog service routes.
///
/// # Endpoints
///
/// - `GET /healthz`            - Database and cache health
/// - `GET /api/categories`     - Active categories (response-cached)
/// - `GET /api/posts`          - Published posts, filtered and paginated
/// - `GET /api/posts/{id}`     - Post detail, counts a view (response-cached)
pub fn blog_routes(state: &BlogState) -> Router<BlogState> {
    let settings = &state.cache_settings;
    let category_cache = ResponseCache::new(
        state.cache.clone(),
        &settings.key_prefix,
        settings.category_ttl,
    );
    let post_detail_cache = ResponseCache::new(
        state.cache.clone(),
        &settings.key_prefix,
        settings.post_detail_ttl,
    );

    Router::new()
        .route("/healthz", get(health_handler))
        .route(
            "/api/categories",
            get(category_list_handler).layer(middleware::from_fn_with_state(
                category_cache,
                response_cache::layer,
            )),
        )
        .route("/api/posts", get(post_list_handler))
        .route(
            "/api/posts/{id}",
            get(post_detail_handler).layer(middleware::from_fn_with_state(
                post_detail_cache,
                response_cache::layer,
            )),
        )
}

/// Credential endpoints of the auth service; these carry the rate limit.
///
/// - `POST /register`       - Create an account
/// - `POST /login`          - User and token pair
/// - `POST /token`          - Token pair only
/// - `POST /token/refresh`  - New access token
pub fn credential_routes() -> Router<AuthState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/token", post(token_obtain_handler))
        .route("/token/refresh", post(token_refresh_handler))
}

/// Endpoints that require a Bearer access token.
///
/// - `GET  /me`      - Current user
/// - `POST /logout`  - Client-side logout acknowledgement
pub fn account_routes(state: AuthState) -> Router<AuthState> {
    Router::new()
        .route("/me", get(me_handler))
        .route("/logout", post(logout_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}

/// Every auth service route.
///
/// `credentials` is [`credential_routes`], with whatever rate limit the
/// caller puts on it.
pub fn auth_routes(state: AuthState, credentials: Router<AuthState>) -> Router<AuthState> {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(credentials)
        .merge(account_routes(state))
}
