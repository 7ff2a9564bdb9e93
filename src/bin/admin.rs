//! CLI administration tool for tinyurl.
//!
//! Provides commands for inspecting and deactivating short URLs, viewing
//! statistics, and performing database checks without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all short URLs
//! cargo run --bin tinyurl-admin -- list
//!
//! # Show one short URL by key
//! cargo run --bin tinyurl-admin -- show abc12
//!
//! # Deactivate a short URL by its secret key
//! cargo run --bin tinyurl-admin -- deactivate abc12_AbCd1234
//!
//! # View statistics
//! cargo run --bin tinyurl-admin -- stats
//!
//! # Check database connection
//! cargo run --bin tinyurl-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or the `DB_*` components (required): PostgreSQL connection
//! - `BASE_URL` (optional): used to print full short links

use tinyurl::application::services::UrlService;
use tinyurl::config::{self, Config};
use tinyurl::domain::entities::UrlEntity;
use tinyurl::domain::repositories::UrlRepository;
use tinyurl::infrastructure::persistence::PgUrlRepository;
use tinyurl::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinyurl.
#[derive(Parser)]
#[command(name = "tinyurl-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// List short URLs
    List {
        /// Include deactivated URLs
        #[arg(short, long)]
        all: bool,
    },

    /// Show a short URL by key
    Show {
        /// Public key of the short URL
        key: String,
    },

    /// Deactivate a short URL by secret key
    Deactivate {
        /// Secret key of the short URL
        secret_key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL or DB_USER/DB_PASSWORD/DB_NAME must be set")?;

    let pool = connect_pool(&config, &database_url).await?;

    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    let service = UrlService::new(repository.clone());

    match cli.command {
        Commands::List { all } => list_urls(&service, &config, all).await?,
        Commands::Show { key } => show_url(repository.as_ref(), &config, &key).await?,
        Commands::Deactivate { secret_key, yes } => {
            deactivate_url(&service, repository.as_ref(), &secret_key, yes).await?
        }
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Lists short URLs with status indicators.
///
/// Deactivated URLs are hidden unless `all` is set. Secret keys are never printed.
async fn list_urls(service: &UrlService<PgUrlRepository>, config: &Config, all: bool) -> Result<()> {
    println!("{}", "📋 Short URLs".bright_blue().bold());
    println!();

    let urls: Vec<UrlEntity> = service
        .list_urls()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?
        .into_iter()
        .filter(|url| all || url.is_active)
        .collect();

    if urls.is_empty() {
        println!("{}", "  No short URLs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<14} {:<8} {:<10} {:<18} {}",
        "Key".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Status".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for url in &urls {
        println!(
            "  {:<14} {:<8} {:<10} {:<18} {}",
            url.key.cyan(),
            url.clicks.to_string(),
            status_label(url.is_active),
            created_label(url).bright_black(),
            url.target_url
        );
    }

    println!();
    println!(
        "  Total: {}  ({})",
        urls.len().to_string().bright_white().bold(),
        config.base_url.bright_black()
    );
    println!();

    Ok(())
}

/// Prints one short URL, including deactivated ones.
async fn show_url(repository: &PgUrlRepository, config: &Config, key: &str) -> Result<()> {
    let url = repository
        .get_by_key(key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Short URL '{}' not found", key))?;

    println!("{}", "🔗 Short URL".bright_blue().bold());
    println!();
    println!("  Key:     {}", url.key.cyan());
    println!("  Link:    {}/{}", config.base_url, url.key);
    println!("  Target:  {}", url.target_url);
    println!("  Clicks:  {}", url.clicks.to_string().bright_green().bold());
    println!("  Status:  {}", status_label(url.is_active));
    println!("  Created: {}", created_label(&url).bright_black());
    println!();

    Ok(())
}

/// Deactivates a short URL with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes`
/// - Deactivation is permanent, the key is never reassigned
/// - Repeating it for an inactive URL succeeds again, like the HTTP delete
async fn deactivate_url(
    service: &UrlService<PgUrlRepository>,
    repository: &PgUrlRepository,
    secret_key: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔒 Deactivate Short URL".bright_blue().bold());
    println!();

    let url = repository
        .get_by_secret_key(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(url) = url else {
        println!("{}", "⚠️  No short URL for this secret key".yellow());
        return Ok(());
    };

    println!("  Key:    {}", url.key.cyan());
    println!("  Target: {}", url.target_url);
    println!("  Clicks: {}", url.clicks.to_string().bright_black());
    println!("  Status: {}", status_label(url.is_active));
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Deactivate this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_url_by_secret_key(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to deactivate URL: {}", e))?;

    println!();
    println!("{}", "✅ Short URL deactivated".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total and active short URLs
/// - Total clicks
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE is_active")
        .fetch_one(pool)
        .await?;

    let clicks: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM urls")
        .fetch_one(pool)
        .await?;

    println!("  URLs:        {}", total.to_string().bright_green().bold());
    println!("  Active URLs: {}", active.to_string().bright_green().bold());
    println!("  Clicks:      {}", clicks.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

fn status_label(is_active: bool) -> ColoredString {
    if is_active {
        "ACTIVE".green()
    } else {
        "INACTIVE".red()
    }
}

fn created_label(url: &UrlEntity) -> String {
    url.created_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
