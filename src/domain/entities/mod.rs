//! Core domain entities.
//!
//! Entities are plain data structures; creation inputs live next to them as
//! `New*` structs.
//!
//! # Entity Types
//!
//! - [`Category`] - Post category
//! - [`Author`] - Post author
//! - [`Post`] - Blog post with [`PostStatus`]
//! - [`User`] - Auth service account

pub mod author;
pub mod category;
pub mod post;
pub mod user;

pub use author::{Author, NewAuthor};
pub use category::{Category, NewCategory};
pub use post::{AuthorRef, CategoryRef, EXCERPT_CHARS, NewPost, Post, PostStatus};
pub use user::{NewUser, User};
