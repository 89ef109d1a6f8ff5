//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-checked queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgCategoryRepository`] - Categories
//! - [`PgAuthorRepository`] - Authors
//! - [`PgPostRepository`] - Posts, listing filters and view counting
//! - [`PgUserRepository`] - Auth service accounts
//! - [`PgHealthProbe`] - `SELECT 1` round-trip for health checks

pub mod pg_author_repository;
pub mod pg_category_repository;
pub mod pg_health_probe;
pub mod pg_post_repository;
pub mod pg_user_repository;

pub use pg_author_repository::PgAuthorRepository;
pub use pg_category_repository::PgCategoryRepository;
pub use pg_health_probe::PgHealthProbe;
pub use pg_post_repository::PgPostRepository;
pub use pg_user_repository::PgUserRepository;
