//! Business logic services for the application layer.

pub mod auth_service;
pub mod category_service;
pub mod health_service;
pub mod post_service;
pub mod seed_service;
pub mod token_service;

pub use auth_service::{AuthService, Registration};
pub use category_service::CategoryService;
pub use health_service::{HealthProbe, HealthReport, HealthService};
pub use post_service::PostService;
pub use seed_service::{SeedOptions, SeedService, SeedSummary};
pub use token_service::{Claims, TokenError, TokenPair, TokenService, TokenType};
