//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::CategoryService`] - Active category listing and creation
//! - [`services::PostService`] - Published post listing, view counting, creation
//! - [`services::AuthService`] - Registration, credentials and tokens
//! - [`services::HealthService`] - Database and cache probes
//! - [`services::SeedService`] - Sample data generation
//!
//! [`pagination`] holds the page-number pagination shared by list endpoints.

pub mod pagination;
pub mod services;
