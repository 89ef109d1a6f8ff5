//! HTTP server initialization and runtime setup.
//!
//! Handles logging, database and cache connections, migrations and the Axum
//! server lifecycle for both services.

use crate::application::services::{AuthService, HealthService, TokenService};
use crate::config::{Config, JwtConfig};
use crate::domain::repositories::UserRepository;
use crate::infrastructure::cache::{CacheStore, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    PgCategoryRepository, PgHealthProbe, PgPostRepository, PgUserRepository,
};
use crate::routes::{auth_app, blog_app};
use crate::state::{AuthState, BlogState, CacheSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::normalize_path::NormalizePath;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level`; `LOG_FORMAT=json`
/// switches to one JSON object per line.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if no connection can be established.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Connects the cache store.
///
/// Without `REDIS_URL` caching is disabled. When Redis is configured but
/// unreachable the service still starts; responses are computed every time
/// and the health check reports the cache as failed.
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheStore> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Serving without cache.", e);
            Arc::new(NullCache::unreachable(e.to_string()))
        }
    }
}

/// Runs the blog service.
///
/// # Errors
///
/// Returns an error if the database is unreachable, a migration fails, or
/// the listener cannot bind.
pub async fn run_blog(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;

    let mut migrator = sqlx::migrate!("./migrations/blog");
    migrator.set_ignore_missing(true);
    migrator
        .run(&pool)
        .await
        .context("Failed to run blog migrations")?;

    let cache = connect_cache(&config).await;

    let pool = Arc::new(pool);
    let state = BlogState::new(
        Arc::new(PgCategoryRepository::new(pool.clone())),
        Arc::new(PgPostRepository::new(pool.clone())),
        Arc::new(PgHealthProbe::new(pool)),
        cache,
        CacheSettings::from(&config),
    );

    serve(blog_app(state), &config.listen_addr).await
}

/// Runs the auth service.
///
/// # Errors
///
/// Returns an error if the database is unreachable, a migration fails, or
/// the listener cannot bind.
pub async fn run_auth(config: Config, jwt: JwtConfig) -> Result<()> {
    let pool = connect_database(&config).await?;

    let mut migrator = sqlx::migrate!("./migrations/auth");
    migrator.set_ignore_missing(true);
    migrator
        .run(&pool)
        .await
        .context("Failed to run auth migrations")?;

    let cache = connect_cache(&config).await;

    let pool = Arc::new(pool);
    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let auth_service = AuthService::new(
        users,
        TokenService::new(&jwt),
        jwt.bcrypt_cost,
    );
    let health_service = HealthService::new(Arc::new(PgHealthProbe::new(pool)), cache);
    let state = AuthState::new(auth_service, health_service);

    serve(auth_app(state)?, &config.listen_addr).await
}

/// Binds `listen_addr` and serves `app` until Ctrl+C or SIGTERM.
async fn serve(app: NormalizePath<axum::Router>, listen_addr: &str) -> Result<()> {
    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{listen_addr}'"))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
