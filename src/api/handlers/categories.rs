//! Handler for the category listing.

use axum::{
    Json,
    extract::{OriginalUri, Query, State},
    http::HeaderMap,
};

use crate::api::dto::category::CategoryResponse;
use crate::api::dto::pagination::{PageEnvelope, PageLinks, PaginationParams};
use crate::error::AppError;
use crate::state::BlogState;

/// Lists active categories ordered by name.
///
/// # Endpoint
///
/// `GET /api/categories/`
///
/// # Query Parameters
///
/// - `page` (optional): page number or `last` (default: 1)
/// - `page_size` (optional): items per page (default: 10, max: 100)
///
/// The whole route is response-cached (120 s by default).
///
/// # Errors
///
/// Returns 404 `Invalid page.` for a page past the end.
pub async fn category_list_handler(
    State(state): State<BlogState>,
    Query(params): Query<PaginationParams>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Json<PageEnvelope<CategoryResponse>>, AppError> {
    let request = params.to_request()?;

    let page = state.category_service.list_active(request).await?;

    let links = PageLinks::from_request(&headers, &uri);
    Ok(Json(PageEnvelope::new(page.map(Into::into), &links)))
}
