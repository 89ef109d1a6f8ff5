//! Repository trait for posts.

use crate::domain::entities::{NewPost, Post, PostStatus};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Filter criteria for the published post listing.
///
/// Date bounds are inclusive calendar days in UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Case-insensitive substring match on title or body.
    pub search: Option<String>,
    pub category_id: Option<i64>,
    pub author_id: Option<i64>,
    pub published_after: Option<NaiveDate>,
    pub published_before: Option<NaiveDate>,
    pub created_after: Option<NaiveDate>,
    pub created_before: Option<NaiveDate>,
}

impl PostFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Post storage.
///
/// Listing methods only return published posts, ordered by `published_at`
/// descending (nulls last), then `created_at` descending.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPostRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list_published(
        &self,
        filter: &PostFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError>;

    async fn count_published(&self, filter: &PostFilter) -> Result<i64, AppError>;

    /// Atomically increments `views` of a published post and returns it with
    /// the new count.
    ///
    /// Returns `Ok(None)` when no published post has this id.
    async fn find_published_and_increment_views(&self, id: i64)
    -> Result<Option<Post>, AppError>;

    /// Inserts a post. `new.slug` must already be set and
    /// [`NewPost::apply_defaults`] applied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is taken.
    async fn create(&self, new: NewPost) -> Result<Post, AppError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError>;

    async fn count_by_status(&self, status: PostStatus) -> Result<i64, AppError>;
}
