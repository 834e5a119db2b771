use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::config::DbConfig;

/// Migrations embedded at compile time from `crates/weekplan-db/migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Create a connection pool with sensible defaults.
///
/// The database file is created when missing and foreign keys are enforced
/// on every connection.
pub async fn create_pool(config: &DbConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid database URL {}", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to database at {}", config.database_url))?;
    Ok(pool)
}

/// Run all pending embedded migrations against the pool, then bring
/// databases written before the `active` column existed up to date.
///
/// Returns the number of migrations applied by this call; zero means the
/// schema was already current.
pub async fn run_migrations(pool: &SqlitePool) -> Result<u64> {
    let before = applied_migration_count(pool).await?;

    MIGRATOR
        .run(pool)
        .await
        .context("failed to run database migrations")?;

    let upgraded = upgrade_legacy_schema(pool).await?;

    let applied = applied_migration_count(pool).await?.saturating_sub(before);
    if applied > 0 || upgraded {
        info!(applied, "migrations applied successfully");
    } else {
        debug!("database schema is up to date");
    }
    Ok(applied)
}

/// Rows in the migration bookkeeping table, or zero before it exists.
async fn applied_migration_count(pool: &SqlitePool) -> Result<u64> {
    let (exists,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await
    .context("failed to look up migration table")?;
    if exists == 0 {
        return Ok(0);
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
        .fetch_one(pool)
        .await
        .context("failed to count applied migrations")?;
    Ok(u64::try_from(count).unwrap_or_default())
}

/// Add the `active` column to a `recipes` table that predates it.
///
/// Existing rows default to active. Returns `true` when the column was added.
pub async fn upgrade_legacy_schema(pool: &SqlitePool) -> Result<bool> {
    let columns: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info('recipes')")
        .fetch_all(pool)
        .await
        .context("failed to inspect recipes table")?;

    if columns.iter().any(|(name,)| name == "active") {
        return Ok(false);
    }

    sqlx::query("ALTER TABLE recipes ADD COLUMN active INTEGER DEFAULT 1")
        .execute(pool)
        .await
        .context("failed to add active column to recipes")?;

    info!("upgraded legacy recipes table with active column");
    Ok(true)
}

/// Ensure the target database file exists, creating it if necessary.
///
/// Returns `true` when a new database was created. In-memory databases are
/// never created up front.
pub async fn ensure_database_exists(config: &DbConfig) -> Result<bool> {
    if config.is_in_memory() {
        return Ok(false);
    }

    let url = &config.database_url;
    let exists = Sqlite::database_exists(url)
        .await
        .with_context(|| format!("failed to check for database at {url}"))?;

    if exists {
        info!(db = url.as_str(), "database already exists");
        return Ok(false);
    }

    Sqlite::create_database(url)
        .await
        .with_context(|| format!("failed to create database at {url}"))?;
    info!(db = url.as_str(), "database created");
    Ok(true)
}

/// Return the row count for every user table, excluding SQLite internals
/// and the migration bookkeeping table.
///
/// Useful for the `weekplan db-init` success message.
pub async fn table_counts(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' \
           AND name NOT LIKE 'sqlite_%' \
           AND name <> '_sqlx_migrations' \
         ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .context("failed to list tables")?;

    let mut counts = Vec::with_capacity(tables.len());
    for (table_name,) in &tables {
        // Table names come from sqlite_master so they are safe identifiers.
        let query = format!("SELECT COUNT(*) FROM \"{table_name}\"");
        let count: (i64,) = sqlx::query_as(&query)
            .fetch_one(pool)
            .await
            .with_context(|| format!("failed to count rows in {table_name}"))?;
        counts.push((table_name.clone(), count.0));
    }
    Ok(counts)
}
