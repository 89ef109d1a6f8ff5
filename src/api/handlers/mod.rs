//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod categories;
pub mod health;
pub mod posts;

pub use auth::{
    login_handler, logout_handler, me_handler, register_handler, token_obtain_handler,
    token_refresh_handler,
};
pub use categories::category_list_handler;
pub use health::health_handler;
pub use posts::{post_detail_handler, post_list_handler};
