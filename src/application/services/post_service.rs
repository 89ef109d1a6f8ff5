//! Post listing, retrieval and creation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::application::pagination::{Page, PageRequest};
use crate::domain::entities::{NewPost, Post, PostStatus};
use crate::domain::repositories::{PostFilter, PostRepository};
use crate::domain::slug::{derive_slug, unique_slug};
use crate::error::AppError;

pub struct PostService<R: PostRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: PostRepository + ?Sized> PostService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns one page of published posts matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for a page past the end.
    pub async fn list_published(
        &self,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, AppError> {
        let count = self.repository.count_published(filter).await?;
        let window = request.resolve(count)?;

        let items = self
            .repository
            .list_published(filter, window.offset(), window.limit())
            .await?;

        Ok(Page { items, window })
    }

    /// Retrieves a published post and records the view.
    ///
    /// Every successful call increments `views` by one in the same statement
    /// that reads the row, so concurrent readers never lose an increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no published post has this id.
    pub async fn view(&self, id: i64) -> Result<Post, AppError> {
        self.repository
            .find_published_and_increment_views(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))
    }

    /// Creates a post, deriving a unique slug from the title when none is
    /// given and stamping `published_at` for published posts.
    pub async fn create(&self, mut new: NewPost, now: DateTime<Utc>) -> Result<Post, AppError> {
        let slug = match new.slug.take() {
            Some(slug) => derive_slug(&slug)?,
            None => {
                let repository = &self.repository;
                unique_slug(&new.title, |candidate| async move {
                    repository.slug_exists(&candidate).await
                })
                .await?
            }
        };

        new.slug = Some(slug);
        new.apply_defaults(now);

        self.repository.create(new).await
    }

    pub async fn count_by_status(&self, status: PostStatus) -> Result<i64, AppError> {
        self.repository.count_by_status(status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthorRef;
    use crate::domain::repositories::MockPostRepository;
    use mockall::predicate::eq;

    fn post_from(new: &NewPost, id: i64, now: DateTime<Utc>) -> Post {
        Post {
            id,
            title: new.title.clone(),
            slug: new.slug.clone().unwrap_or_default(),
            body: new.body.clone(),
            author: AuthorRef {
                id: new.author_id,
                display_name: "Ana".to_string(),
            },
            category: None,
            status: new.status,
            published_at: new.published_at,
            views: new.views,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_published_sets_published_at() {
        let now = Utc::now();
        let mut repo = MockPostRepository::new();

        repo.expect_slug_exists().returning(|_| Ok(false));
        repo.expect_create()
            .withf(move |new| {
                new.published_at == Some(now) && new.slug.as_deref() == Some("hello-world")
            })
            .times(1)
            .returning(move |new| Ok(post_from(&new, 1, now)));

        let service = PostService::new(Arc::new(repo));
        let mut new = NewPost::draft("Hello World", "Body", 1);
        new.status = PostStatus::Published;

        let post = service.create(new, now).await.unwrap();

        assert_eq!(post.published_at, Some(now));
    }

    #[tokio::test]
    async fn test_create_draft_leaves_published_at_empty() {
        let now = Utc::now();
        let mut repo = MockPostRepository::new();

        repo.expect_slug_exists().returning(|_| Ok(false));
        repo.expect_create()
            .withf(|new| new.published_at.is_none())
            .times(1)
            .returning(move |new| Ok(post_from(&new, 2, now)));

        let service = PostService::new(Arc::new(repo));
        let post = service
            .create(NewPost::draft("Draft", "Body", 1), now)
            .await
            .unwrap();

        assert!(post.published_at.is_none());
    }

    #[tokio::test]
    async fn test_create_with_explicit_slug_skips_lookup() {
        let now = Utc::now();
        let mut repo = MockPostRepository::new();

        repo.expect_slug_exists().never();
        repo.expect_create()
            .withf(|new| new.slug.as_deref() == Some("custom-slug"))
            .returning(move |new| Ok(post_from(&new, 3, now)));

        let service = PostService::new(Arc::new(repo));
        let mut new = NewPost::draft("Anything", "Body", 1);
        new.slug = Some("Custom Slug".to_string());

        let post = service.create(new, now).await.unwrap();
        assert_eq!(post.slug, "custom-slug");
    }

    #[tokio::test]
    async fn test_view_missing_post_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_published_and_increment_views()
            .with(eq(99))
            .returning(|_| Ok(None));

        let service = PostService::new(Arc::new(repo));
        let result = service.view(99).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_published_passes_filter_and_window() {
        let mut repo = MockPostRepository::new();
        let filter = PostFilter {
            search: Some("rust".to_string()),
            ..PostFilter::default()
        };

        repo.expect_count_published()
            .withf(|f| f.search.as_deref() == Some("rust"))
            .returning(|_| Ok(45));
        repo.expect_list_published()
            .withf(|f, offset, limit| {
                f.search.as_deref() == Some("rust") && *offset == 40 && *limit == 20
            })
            .returning(|_, _, _| Ok(vec![]));

        let service = PostService::new(Arc::new(repo));
        let page = service
            .list_published(&filter, PageRequest::parse(Some("3"), Some("20")).unwrap())
            .await
            .unwrap();

        assert_eq!(page.window.total_pages, 3);
        assert_eq!(page.window.current_page, 3);
    }
}
