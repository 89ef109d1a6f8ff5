//! DTOs for post endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{NoneAsEmptyString, serde_as};

use super::pagination::PaginationParams;
use crate::domain::entities::{AuthorRef, CategoryRef, Post};
use crate::domain::repositories::PostFilter;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct AuthorSummary {
    pub id: i64,
    pub display_name: String,
}

impl From<AuthorRef> for AuthorSummary {
    fn from(author: AuthorRef) -> Self {
        Self {
            id: author.id,
            display_name: author.display_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
}

impl From<CategoryRef> for CategorySummary {
    fn from(category: CategoryRef) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

/// Post as shown in listings: excerpt instead of body.
#[derive(Debug, Serialize)]
pub struct PostListItem {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub author: AuthorSummary,
    pub category: Option<CategorySummary>,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
}

impl From<Post> for PostListItem {
    fn from(post: Post) -> Self {
        Self {
            excerpt: post.excerpt(),
            id: post.id,
            title: post.title,
            slug: post.slug,
            author: post.author.into(),
            category: post.category.map(Into::into),
            published_at: post.published_at,
            views: post.views,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author: AuthorSummary,
    pub category: Option<CategorySummary>,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostDetail {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            body: post.body,
            author: post.author.into(),
            category: post.category.map(Into::into),
            published_at: post.published_at,
            views: post.views,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Query parameters of `GET /api/posts/`.
///
/// Filters arrive as raw strings so that every malformed value is reported
/// at once, keyed by parameter name. Empty values are treated as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub search: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub category: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub author: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub published_after: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub published_before: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub created_after: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub created_before: Option<String>,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl PostListQuery {
    /// Parses the filter parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] listing every non-integer id and
    /// every date not in `YYYY-MM-DD` form.
    pub fn to_filter(&self) -> Result<PostFilter, AppError> {
        let mut errors = Map::new();

        let mut id = |name: &str, raw: &Option<String>| {
            raw.as_deref().and_then(|raw| match raw.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.insert(name.to_string(), reject("A valid integer is required."));
                    None
                }
            })
        };
        let category_id = id("category", &self.category);
        let author_id = id("author", &self.author);

        let mut date = |name: &str, raw: &Option<String>| {
            raw.as_deref().and_then(|raw| {
                match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                    Ok(date) => Some(date),
                    Err(_) => {
                        errors.insert(
                            name.to_string(),
                            reject("Enter a valid date in YYYY-MM-DD format."),
                        );
                        None
                    }
                }
            })
        };
        let published_after = date("published_after", &self.published_after);
        let published_before = date("published_before", &self.published_before);
        let created_after = date("created_after", &self.created_after);
        let created_before = date("created_before", &self.created_before);

        if !errors.is_empty() {
            return Err(AppError::bad_request(
                "Invalid filter parameters",
                Value::Object(errors),
            ));
        }

        Ok(PostFilter {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            category_id,
            author_id,
            published_after,
            published_before,
            created_after,
            created_before,
        })
    }
}

fn reject(message: &str) -> Value {
    Value::Array(vec![Value::String(message.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(raw: &str) -> PostListQuery {
        let pairs: Map<String, Value> = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();
        serde_json::from_value(Value::Object(pairs)).unwrap()
    }

    #[test]
    fn test_empty_query_is_empty_filter() {
        let filter = query("").to_filter().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_all_filters_parse() {
        let q = query(
            "search=+rust+&category=2&author=3&published_after=2026-01-01\
             &published_before=2026-02-01&created_after=2025-12-01&created_before=2026-03-01\
             &page=2&page_size=5",
        );
        let filter = q.to_filter().unwrap();

        assert_eq!(filter.search.as_deref(), Some("rust"));
        assert_eq!(filter.category_id, Some(2));
        assert_eq!(filter.author_id, Some(3));
        assert_eq!(
            filter.published_after,
            NaiveDate::from_ymd_opt(2026, 1, 1)
        );
        assert_eq!(filter.created_before, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(q.pagination.page.as_deref(), Some("2"));
        assert_eq!(q.pagination.page_size.as_deref(), Some("5"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let filter = query("search=&category=&published_after=").to_filter().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_invalid_values_are_reported_per_field() {
        let err = query("category=abc&author=1&created_before=03/01/2026")
            .to_filter()
            .unwrap_err();

        let info = err.to_error_info();
        assert_eq!(info.code, "validation_error");
        assert!(info.details.get("category").is_some());
        assert!(info.details.get("created_before").is_some());
        assert!(info.details.get("author").is_none());
    }
}
