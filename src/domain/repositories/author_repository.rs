//! Repository trait for authors.

use crate::domain::entities::{Author, NewAuthor};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Author>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is taken.
    async fn create(&self, new: NewAuthor) -> Result<Author, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
