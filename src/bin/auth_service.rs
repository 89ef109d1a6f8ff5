//! Auth service entry point.
//!
//! Requires `JWT_SECRET` in addition to the shared configuration.

use blog_platform::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    let jwt = config::load_jwt_from_env()?;
    server::init_tracing(&config);
    config.print_summary();
    tracing::info!(
        "  Token lifetimes: access {}s, refresh {}s",
        jwt.access_ttl_seconds,
        jwt.refresh_ttl_seconds
    );

    server::run_auth(config, jwt).await
}
