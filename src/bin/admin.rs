//! CLI administration tool for the blog platform.
//!
//! Seeds sample content, inspects and flushes the response cache, and checks
//! the database without going through the HTTP services.
//!
//! # Usage
//!
//! ```bash
//! # Populate the blog with sample categories, authors and posts
//! cargo run --bin admin -- seed --posts 50
//!
//! # Cache maintenance
//! cargo run --bin admin -- cache stats
//! cargo run --bin admin -- cache invalidate 'blog:response:/api/posts*'
//! cargo run --bin admin -- cache clear -y
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the services: `DATABASE_URL` (or `DB_*`), `REDIS_URL` (or
//! `REDIS_*`), `CACHE_KEY_PREFIX`.

use blog_platform::application::services::{SeedOptions, SeedService, SeedSummary};
use blog_platform::config::{self, Config};
use blog_platform::infrastructure::cache::{CacheKey, CacheManager};
use blog_platform::infrastructure::persistence::{
    PgAuthorRepository, PgCategoryRepository, PgPostRepository,
};
use blog_platform::server::{connect_cache, connect_database};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the blog platform.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Populate the database with sample data
    Seed {
        /// Number of categories to get or create
        #[arg(long, default_value_t = 5)]
        categories: usize,

        /// Number of authors to get or create (at most 5)
        #[arg(long, default_value_t = 3)]
        authors: usize,

        /// Number of posts to create
        #[arg(long, default_value_t = 30)]
        posts: usize,
    },

    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Cache subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Show key count, memory use and hit/miss counters
    Stats,

    /// Delete keys matching a glob pattern
    Invalidate {
        /// Glob pattern, e.g. `blog:response:*`
        pattern: String,
    },

    /// Delete every key in the cache database
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Seed {
            categories,
            authors,
            posts,
        } => {
            let options = SeedOptions {
                categories,
                authors,
                posts,
            };
            handle_seed(&config, options).await?
        }
        Commands::Cache { action } => handle_cache_action(&config, action).await?,
        Commands::Db { action } => handle_db_action(&config, action).await?,
    }

    Ok(())
}

/// Seeds sample content, then drops every cached response so the new posts
/// show up immediately.
async fn handle_seed(config: &Config, options: SeedOptions) -> Result<()> {
    println!("{}", "🌱 Seeding blog data".bright_blue().bold());
    println!();

    let pool = connect_database(config).await?;
    let mut migrator = sqlx::migrate!("./migrations/blog");
    migrator.set_ignore_missing(true);
    migrator.run(&pool).await?;

    let pool = Arc::new(pool);
    let seeder = SeedService::new(
        Arc::new(PgCategoryRepository::new(pool.clone())),
        Arc::new(PgAuthorRepository::new(pool.clone())),
        Arc::new(PgPostRepository::new(pool)),
    );

    let summary = seeder
        .run(options, &mut rand::rng(), chrono::Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e))?;

    print_summary(&summary);

    let cache = CacheManager::new(connect_cache(config).await);
    let pattern = CacheKey::namespace_pattern(&config.cache_key_prefix);
    let removed = cache.invalidate(&pattern).await;
    println!(
        "  Cache:       {} keys invalidated ({})",
        removed.to_string().bright_white(),
        pattern.bright_black()
    );
    println!();

    Ok(())
}

fn print_summary(summary: &SeedSummary) {
    println!("{}", "✅ Seeding complete".green().bold());
    println!();
    println!(
        "  Categories:  {}",
        summary.categories.to_string().bright_green().bold()
    );
    println!(
        "  Authors:     {}",
        summary.authors.to_string().bright_green().bold()
    );
    println!(
        "  Posts:       {} created",
        summary.posts_created.to_string().bright_green().bold()
    );
    println!(
        "  Published:   {}",
        summary.published.to_string().bright_green().bold()
    );
    println!(
        "  Drafts:      {}",
        summary.drafts.to_string().bright_yellow().bold()
    );
}

/// Dispatches cache maintenance commands.
async fn handle_cache_action(config: &Config, action: CacheAction) -> Result<()> {
    if !config.is_cache_enabled() {
        println!("{}", "⚠️  Redis is not configured (set REDIS_URL)".yellow());
        return Ok(());
    }

    let cache = CacheManager::new(connect_cache(config).await);

    match action {
        CacheAction::Stats => {
            println!("{}", "📊 Cache statistics".bright_blue().bold());
            println!();

            match cache.stats().await {
                Some(stats) => {
                    println!("  Keys:    {}", stats.total_keys.to_string().bright_green().bold());
                    println!("  Memory:  {}", stats.memory_used.bright_white());
                    println!("  Hits:    {}", stats.hits.to_string().bright_green());
                    println!("  Misses:  {}", stats.misses.to_string().bright_yellow());
                }
                None => println!("{}", "  Statistics unavailable".red()),
            }
            println!();
        }
        CacheAction::Invalidate { pattern } => {
            let removed = cache.invalidate(&pattern).await;
            println!(
                "{} {} keys matching {}",
                "🧹 Removed".green().bold(),
                removed.to_string().bright_white().bold(),
                pattern.cyan()
            );
        }
        CacheAction::Clear { yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete every key in the cache database?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            if cache.clear_all().await {
                println!("{}", "✅ Cache cleared".green().bold());
            } else {
                println!("{}", "❌ Cache clear failed".red().bold());
            }
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(config: &Config, action: DbAction) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool: PgPool = connect_database(config).await?;
            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
