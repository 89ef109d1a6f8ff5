#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use blog_platform::api::routes::{auth_routes, blog_routes, credential_routes};
use blog_platform::application::services::{
    AuthService, HealthProbe, HealthService, TokenService,
};
use blog_platform::config::JwtConfig;
use blog_platform::domain::entities::{
    AuthorRef, Category, CategoryRef, NewCategory, NewPost, NewUser, Post, PostStatus, User,
};
use blog_platform::domain::repositories::{
    CategoryRepository, PostFilter, PostRepository, UserRepository,
};
use blog_platform::error::AppError;
use blog_platform::infrastructure::cache::CacheStore;
use blog_platform::state::{AuthState, BlogState, CacheSettings};
use chrono::{Duration, NaiveTime, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789";

/// In-memory categories and posts, mirroring the PostgreSQL queries.
#[derive(Default)]
pub struct InMemoryBlog {
    categories: Mutex<Vec<Category>>,
    posts: Mutex<Vec<Post>>,
}

impl InMemoryBlog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_category(&self, name: &str, is_active: bool) -> Category {
        let mut categories = self.categories.lock().unwrap();
        let category = Category {
            id: categories.len() as i64 + 1,
            name: name.to_string(),
            slug: slug::slugify(name),
            is_active,
        };
        categories.push(category.clone());
        category
    }

    /// Adds a post by author `author_id`. Published posts get
    /// `published_at = created_at = now - age`.
    pub fn add_post(
        &self,
        title: &str,
        body: &str,
        status: PostStatus,
        author_id: i64,
        category: Option<&Category>,
        age: Duration,
    ) -> Post {
        let mut posts = self.posts.lock().unwrap();
        let at = Utc::now() - age;
        let post = Post {
            id: posts.len() as i64 + 1,
            title: title.to_string(),
            slug: slug::slugify(title),
            body: body.to_string(),
            author: AuthorRef {
                id: author_id,
                display_name: format!("Author {author_id}"),
            },
            category: category.map(|c| CategoryRef {
                id: c.id,
                name: c.name.clone(),
            }),
            status,
            published_at: (status == PostStatus::Published).then_some(at),
            views: 0,
            created_at: at,
            updated_at: at,
        };
        posts.push(post.clone());
        post
    }

    pub fn views(&self, id: i64) -> i64 {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.views)
            .unwrap_or_default()
    }

    fn published_matching(&self, filter: &PostFilter) -> Vec<Post> {
        let start = |d: chrono::NaiveDate| d.and_time(NaiveTime::MIN).and_utc();
        let end = |d: chrono::NaiveDate| start(d) + Duration::days(1);
        let search = filter.search.as_ref().map(|s| s.to_lowercase());

        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.status == PostStatus::Published)
            .filter(|p| {
                search.as_ref().is_none_or(|s| {
                    p.title.to_lowercase().contains(s) || p.body.to_lowercase().contains(s)
                })
            })
            .filter(|p| {
                filter
                    .category_id
                    .is_none_or(|id| p.category.as_ref().is_some_and(|c| c.id == id))
            })
            .filter(|p| filter.author_id.is_none_or(|id| p.author.id == id))
            .filter(|p| {
                filter
                    .published_after
                    .is_none_or(|d| p.published_at.is_some_and(|at| at >= start(d)))
            })
            .filter(|p| {
                filter
                    .published_before
                    .is_none_or(|d| p.published_at.is_some_and(|at| at < end(d)))
            })
            .filter(|p| filter.created_after.is_none_or(|d| p.created_at >= start(d)))
            .filter(|p| filter.created_before.is_none_or(|d| p.created_at < end(d)))
            .cloned()
            .collect();

        posts.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        posts
    }
}

#[async_trait]
impl CategoryRepository for InMemoryBlog {
    async fn list_active(&self, offset: i64, limit: i64) -> Result<Vec<Category>, AppError> {
        let mut active: Vec<Category> = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Ok(active
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.is_active)
            .count() as i64)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn create(&self, new: NewCategory) -> Result<Category, AppError> {
        let category = self.add_category(&new.name, new.is_active);
        Ok(category)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        Ok(self.categories.lock().unwrap().iter().any(|c| c.slug == slug))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.categories.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl PostRepository for InMemoryBlog {
    async fn list_published(
        &self,
        filter: &PostFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError> {
        Ok(self
            .published_matching(filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_published(&self, filter: &PostFilter) -> Result<i64, AppError> {
        Ok(self.published_matching(filter).len() as i64)
    }

    async fn find_published_and_increment_views(
        &self,
        id: i64,
    ) -> Result<Option<Post>, AppError> {
        let mut posts = self.posts.lock().unwrap();
        Ok(posts
            .iter_mut()
            .find(|p| p.id == id && p.status == PostStatus::Published)
            .map(|p| {
                p.views += 1;
                p.clone()
            }))
    }

    async fn create(&self, new: NewPost) -> Result<Post, AppError> {
        let mut posts = self.posts.lock().unwrap();
        let now = Utc::now();
        let post = Post {
            id: posts.len() as i64 + 1,
            title: new.title,
            slug: new.slug.unwrap_or_default(),
            body: new.body,
            author: AuthorRef {
                id: new.author_id,
                display_name: format!("Author {}", new.author_id),
            },
            category: None,
            status: new.status,
            published_at: new.published_at,
            views: new.views,
            created_at: now,
            updated_at: now,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        Ok(self.posts.lock().unwrap().iter().any(|p| p.slug == slug))
    }

    async fn count_by_status(&self, status: PostStatus) -> Result<i64, AppError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.status == status)
            .count() as i64)
    }
}

/// In-memory user accounts.
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn deactivate(&self, username: &str) {
        for user in self.users.lock().unwrap().iter_mut() {
            if user.username == username {
                user.is_active = false;
            }
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, new: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == new.username) {
            return Err(AppError::conflict("Duplicate username", json!({})));
        }
        let user = User {
            id: users.len() as i64 + 1,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            first_name: new.first_name,
            last_name: new.last_name,
            is_active: true,
            date_joined: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email)))
    }
}

/// Database probe whose outcome the test controls.
pub struct FakeProbe {
    healthy: AtomicBool,
}

impl FakeProbe {
    pub fn new(healthy: bool) -> Arc<Self> {
        Arc::new(Self {
            healthy: AtomicBool::new(healthy),
        })
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }
}

#[async_trait]
impl HealthProbe for FakeProbe {
    async fn probe(&self) -> Result<(), String> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err("connection refused".to_string())
        }
    }
}

pub fn blog_state(
    blog: Arc<InMemoryBlog>,
    probe: Arc<FakeProbe>,
    cache: Arc<dyn CacheStore>,
) -> BlogState {
    BlogState::new(
        blog.clone(),
        blog,
        probe,
        cache,
        CacheSettings::default(),
    )
}

/// Blog routes without path normalization: request paths carry no
/// trailing slash.
pub fn blog_app(state: BlogState) -> Router {
    blog_routes(&state).with_state(state)
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_ttl_seconds: 300,
        refresh_ttl_seconds: 86_400,
        bcrypt_cost: 4,
    }
}

pub fn auth_state(
    users: Arc<InMemoryUsers>,
    probe: Arc<FakeProbe>,
    cache: Arc<dyn CacheStore>,
) -> AuthState {
    let users: Arc<dyn UserRepository> = users;
    let auth_service = AuthService::new(users, TokenService::new(&jwt_config()), 4);
    AuthState::new(auth_service, HealthService::new(probe, cache))
}

/// Auth routes without rate limiting or path normalization.
pub fn auth_app(state: AuthState) -> Router {
    auth_routes(state.clone(), credential_routes()).with_state(state)
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}
