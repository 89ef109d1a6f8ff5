//! Handlers for post listing and detail.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::HeaderMap,
};
use serde_json::json;

use crate::api::dto::pagination::{PageEnvelope, PageLinks};
use crate::api::dto::post::{PostDetail, PostListItem, PostListQuery};
use crate::error::AppError;
use crate::state::BlogState;

/// Lists published posts, newest first.
///
/// # Endpoint
///
/// `GET /api/posts/`
///
/// # Query Parameters
///
/// - `search`: case-insensitive match on title or body
/// - `category`, `author`: ids
/// - `published_after`, `published_before`, `created_after`,
///   `created_before`: `YYYY-MM-DD`, inclusive
/// - `page`, `page_size`: see the category listing
///
/// # Errors
///
/// - 400 with field details for malformed ids or dates
/// - 404 `Invalid page.` for a page past the end
pub async fn post_list_handler(
    State(state): State<BlogState>,
    Query(query): Query<PostListQuery>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Json<PageEnvelope<PostListItem>>, AppError> {
    let filter = query.to_filter()?;
    let request = query.pagination.to_request()?;

    let page = state.post_service.list_published(&filter, request).await?;

    let links = PageLinks::from_request(&headers, &uri);
    Ok(Json(PageEnvelope::new(page.map(Into::into), &links)))
}

/// Returns one published post and counts the view.
///
/// # Endpoint
///
/// `GET /api/posts/{id}/`
///
/// Response-cached (60 s by default): while a cached copy is served the view
/// counter is not incremented.
///
/// # Errors
///
/// Returns 404 when the id is not an integer, the post does not exist or it
/// is not published.
pub async fn post_detail_handler(
    State(state): State<BlogState>,
    Path(id): Path<String>,
) -> Result<Json<PostDetail>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found("Post not found", json!({ "id": id })))?;

    let post = state.post_service.view(id).await?;

    Ok(Json(post.into()))
}
