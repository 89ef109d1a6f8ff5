//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests, and `tests/common` carries in-memory
//! implementations for HTTP tests.
//!
//! # Available Repositories
//!
//! - [`CategoryRepository`] - Categories
//! - [`AuthorRepository`] - Authors
//! - [`PostRepository`] - Posts, listing filters and view counting
//! - [`UserRepository`] - Auth service accounts

pub mod author_repository;
pub mod category_repository;
pub mod post_repository;
pub mod user_repository;

pub use author_repository::AuthorRepository;
pub use category_repository::CategoryRepository;
pub use post_repository::{PostFilter, PostRepository};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use author_repository::MockAuthorRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use post_repository::MockPostRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
