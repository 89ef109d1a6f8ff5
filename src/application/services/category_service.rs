//! Category listing and creation.

use std::sync::Arc;

use crate::application::pagination::{Page, PageRequest};
use crate::domain::entities::{Category, NewCategory};
use crate::domain::repositories::CategoryRepository;
use crate::domain::slug::{derive_slug, unique_slug};
use crate::error::AppError;

pub struct CategoryService<R: CategoryRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CategoryRepository + ?Sized> CategoryService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns one page of active categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for a page past the end.
    pub async fn list_active(&self, request: PageRequest) -> Result<Page<Category>, AppError> {
        let count = self.repository.count_active().await?;
        let window = request.resolve(count)?;

        let items = self
            .repository
            .list_active(window.offset(), window.limit())
            .await?;

        Ok(Page { items, window })
    }

    /// Creates a category. Without an explicit slug one is derived from the
    /// name, with a numeric suffix on collision; an explicit slug is used
    /// as given.
    pub async fn create(&self, mut new: NewCategory) -> Result<Category, AppError> {
        let slug = match new.slug.take() {
            Some(slug) => derive_slug(&slug)?,
            None => {
                let repository = &self.repository;
                unique_slug(&new.name, |candidate| async move {
                    repository.slug_exists(&candidate).await
                })
                .await?
            }
        };

        new.slug = Some(slug);
        self.repository.create(new).await
    }

    /// Returns the category with this name, creating an active one if absent.
    ///
    /// The flag is `true` when a row was created.
    pub async fn get_or_create(&self, name: &str) -> Result<(Category, bool), AppError> {
        if let Some(existing) = self.repository.find_by_name(name).await? {
            return Ok((existing, false));
        }

        let created = self.create(NewCategory::named(name)).await?;
        Ok((created, true))
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
