//! Repository trait for categories.

use crate::domain::entities::{Category, NewCategory};
use crate::error::AppError;
use async_trait::async_trait;

/// Category storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCategoryRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Lists active categories ordered by name.
    async fn list_active(&self, offset: i64, limit: i64) -> Result<Vec<Category>, AppError>;

    async fn count_active(&self) -> Result<i64, AppError>;

    /// Finds a category by exact name, active or not.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError>;

    /// Inserts a category. `new.slug` must already be set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is taken.
    async fn create(&self, new: NewCategory) -> Result<Category, AppError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
