//! Page-number pagination shared by every list endpoint.

use crate::error::AppError;
use serde_json::json;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Requested page: a 1-based number or the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(i64),
    Last,
}

/// A validated pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: PageNumber,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: PageNumber::Number(1),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Parses raw query values.
    ///
    /// `page_size` above [`MAX_PAGE_SIZE`] is clamped; missing, zero, negative
    /// or unparsable values fall back to [`DEFAULT_PAGE_SIZE`]. `page` accepts
    /// a positive integer or `last`; anything else is an invalid page.
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> Result<Self, AppError> {
        let page_size = page_size
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|size| *size > 0)
            .map(|size| size.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let page = match page.map(str::trim) {
            None | Some("") => PageNumber::Number(1),
            Some("last") => PageNumber::Last,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n > 0 => PageNumber::Number(n),
                _ => return Err(invalid_page()),
            },
        };

        Ok(Self { page, page_size })
    }

    /// Resolves the request against a total row count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] (`Invalid page.`) when the page lies
    /// past the last page. An empty collection still has page 1.
    pub fn resolve(&self, count: i64) -> Result<PageWindow, AppError> {
        let total_pages = total_pages(count, self.page_size);

        let current_page = match self.page {
            PageNumber::Last => total_pages,
            PageNumber::Number(n) if n <= total_pages => n,
            PageNumber::Number(_) => return Err(invalid_page()),
        };

        Ok(PageWindow {
            current_page,
            total_pages,
            page_size: self.page_size,
            count,
        })
    }
}

/// Position of one page within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: i64,
    pub total_pages: i64,
    pub page_size: i64,
    pub count: i64,
}

impl PageWindow {
    pub fn offset(&self) -> i64 {
        (self.current_page - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// One page of results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub window: PageWindow,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            window: self.window,
        }
    }
}

fn total_pages(count: i64, page_size: i64) -> i64 {
    if count <= 0 {
        1
    } else {
        (count + page_size - 1) / page_size
    }
}

fn invalid_page() -> AppError {
    AppError::not_found("Invalid page.", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::parse(None, None).unwrap();
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn test_page_size_clamps_and_falls_back() {
        assert_eq!(PageRequest::parse(None, Some("25")).unwrap().page_size, 25);
        assert_eq!(PageRequest::parse(None, Some("500")).unwrap().page_size, 100);
        assert_eq!(PageRequest::parse(None, Some("0")).unwrap().page_size, 10);
        assert_eq!(PageRequest::parse(None, Some("-3")).unwrap().page_size, 10);
        assert_eq!(PageRequest::parse(None, Some("abc")).unwrap().page_size, 10);
    }

    #[test]
    fn test_invalid_page_values() {
        for raw in ["0", "-1", "two", "1.5"] {
            let err = PageRequest::parse(Some(raw), None).unwrap_err();
            assert!(matches!(err, AppError::NotFound { .. }), "page={raw}");
        }
    }

    #[test]
    fn test_resolve_window() {
        let req = PageRequest::parse(Some("2"), Some("10")).unwrap();
        let window = req.resolve(25).unwrap();

        assert_eq!(window.total_pages, 3);
        assert_eq!(window.current_page, 2);
        assert_eq!(window.offset(), 10);
        assert_eq!(window.limit(), 10);
        assert!(window.has_next());
        assert!(window.has_previous());
    }

    #[test]
    fn test_resolve_past_last_page() {
        let req = PageRequest::parse(Some("4"), None).unwrap();
        assert!(req.resolve(30).is_err());
        assert!(PageRequest::parse(Some("3"), None).unwrap().resolve(30).is_ok());
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let window = PageRequest::default().resolve(0).unwrap();
        assert_eq!(window.total_pages, 1);
        assert_eq!(window.current_page, 1);
        assert!(!window.has_next());
        assert!(!window.has_previous());

        assert!(PageRequest::parse(Some("2"), None).unwrap().resolve(0).is_err());
    }

    #[test]
    fn test_last_page() {
        let req = PageRequest::parse(Some("last"), Some("10")).unwrap();
        assert_eq!(req.resolve(31).unwrap().current_page, 4);
    }
}
