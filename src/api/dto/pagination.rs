//! Page-number pagination query parameters and the list envelope.

use axum::http::{HeaderMap, Uri, header};
use serde::{Deserialize, Serialize};

use crate::application::pagination::{Page, PageRequest, PageWindow};
use crate::error::AppError;

/// Raw `page` / `page_size` query parameters.
///
/// Kept as strings so that malformed values follow the pagination rules
/// (fallback for `page_size`, `Invalid page.` for `page`) instead of failing
/// query deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub page_size: Option<String>,
}

impl PaginationParams {
    pub fn to_request(&self) -> Result<PageRequest, AppError> {
        PageRequest::parse(self.page.as_deref(), self.page_size.as_deref())
    }
}

/// List response envelope shared by every paginated endpoint.
///
/// ```json
/// {
///   "count": 42,
///   "page_size": 10,
///   "total_pages": 5,
///   "current_page": 2,
///   "next": "http://localhost:8000/api/posts/?page=3",
///   "previous": "http://localhost:8000/api/posts/",
///   "results": []
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct PageEnvelope<T> {
    pub count: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PageEnvelope<T> {
    /// Wraps a page, linking neighbours relative to `links`.
    pub fn new(page: Page<T>, links: &PageLinks) -> Self {
        let window = page.window;

        Self {
            count: window.count,
            page_size: window.page_size,
            total_pages: window.total_pages,
            current_page: window.current_page,
            next: links.next(&window),
            previous: links.previous(&window),
            results: page.items,
        }
    }
}

/// `scheme://host` of a request as the client addressed it.
///
/// The host comes from the `Host` header, then the URI authority, then
/// `localhost`; the scheme is `https` only when `X-Forwarded-Proto` says so.
pub fn request_origin(headers: &HeaderMap, uri: &Uri) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "localhost".to_string());

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|s| *s == "https")
        .unwrap_or("http");

    format!("{scheme}://{host}")
}

/// Absolute URL of the current request, used to build `next`/`previous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    base: String,
    query: Vec<(String, String)>,
}

impl PageLinks {
    /// Builds links from the request's `Host` header, path and query.
    ///
    /// The scheme comes from `X-Forwarded-Proto` when present. Paths are
    /// rendered in their canonical trailing-slash form.
    pub fn from_request(headers: &HeaderMap, uri: &Uri) -> Self {
        let origin = request_origin(headers, uri);

        let path = uri.path();
        let path = if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{path}/")
        };

        let query = uri
            .query()
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        Self {
            base: format!("{origin}{path}"),
            query,
        }
    }

    pub fn next(&self, window: &PageWindow) -> Option<String> {
        window
            .has_next()
            .then(|| self.with_page(Some(window.current_page + 1)))
    }

    /// Link to the previous page; the first page is linked without `page`.
    pub fn previous(&self, window: &PageWindow) -> Option<String> {
        if !window.has_previous() {
            return None;
        }

        let page = window.current_page - 1;
        Some(self.with_page((page > 1).then_some(page)))
    }

    fn with_page(&self, page: Option<i64>) -> String {
        let mut pairs: Vec<(String, String)> = self
            .query
            .iter()
            .filter(|(k, _)| k != "page")
            .cloned()
            .collect();
        if let Some(page) = page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        pairs.sort();

        if pairs.is_empty() {
            return self.base.clone();
        }

        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        format!("{}?{}", self.base, query)
    }
}
