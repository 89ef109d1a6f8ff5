//! Shared application state for the blog and auth routers.

use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{
    AuthService, CategoryService, HealthProbe, HealthService, PostService,
};
use crate::config::Config;
use crate::domain::repositories::{CategoryRepository, PostRepository, UserRepository};
use crate::infrastructure::cache::CacheStore;

/// Response cache namespace and lifetimes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub key_prefix: String,
    pub category_ttl: Duration,
    pub post_detail_ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            key_prefix: "blog".to_string(),
            category_ttl: Duration::from_secs(120),
            post_detail_ttl: Duration::from_secs(60),
        }
    }
}

impl From<&Config> for CacheSettings {
    fn from(config: &Config) -> Self {
        Self {
            key_prefix: config.cache_key_prefix.clone(),
            category_ttl: Duration::from_secs(config.category_cache_ttl),
            post_detail_ttl: Duration::from_secs(config.post_detail_cache_ttl),
        }
    }
}

/// State of the blog service.
#[derive(Clone)]
pub struct BlogState {
    pub category_service: Arc<CategoryService<dyn CategoryRepository>>,
    pub post_service: Arc<PostService<dyn PostRepository>>,
    pub health_service: Arc<HealthService>,
    pub cache: Arc<dyn CacheStore>,
    pub cache_settings: CacheSettings,
}

impl BlogState {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        posts: Arc<dyn PostRepository>,
        database: Arc<dyn HealthProbe>,
        cache: Arc<dyn CacheStore>,
        cache_settings: CacheSettings,
    ) -> Self {
        Self {
            category_service: Arc::new(CategoryService::new(categories)),
            post_service: Arc::new(PostService::new(posts)),
            health_service: Arc::new(HealthService::new(database, cache.clone())),
            cache,
            cache_settings,
        }
    }
}

/// State of the auth service.
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub health_service: Arc<HealthService>,
}

impl AuthState {
    pub fn new(
        auth_service: AuthService<dyn UserRepository>,
        health_service: HealthService,
    ) -> Self {
        Self {
            auth_service: Arc::new(auth_service),
            health_service: Arc::new(health_service),
        }
    }
}

impl FromRef<BlogState> for Arc<HealthService> {
    fn from_ref(state: &BlogState) -> Self {
        state.health_service.clone()
    }
}

impl FromRef<AuthState> for Arc<HealthService> {
    fn from_ref(state: &AuthState) -> Self {
        state.health_service.clone()
    }
}
