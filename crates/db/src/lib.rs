//! SQLite pool factory and migration runner for roster.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use roster_kernel::settings::DatabaseSettings;
use roster_kernel::{DbPool, Migration};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const MIGRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS schema_migrations (
        module     TEXT NOT NULL,
        id         TEXT NOT NULL,
        applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (module, id)
    );
"#;

/// Open a connection pool for the configured database.
///
/// Foreign keys are enforced on every connection and the database file is
/// created when missing.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<DbPool> {
    tracing::info!(
        target: "roster-db",
        url = %settings.url,
        max_connections = settings.max_connections,
        "opening database pool"
    );

    let options = SqliteConnectOptions::from_str(&settings.url)
        .with_context(|| format!("invalid database url '{}'", settings.url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms));

    // Each connection to `:memory:` is its own database; never recycle it.
    if settings.url.contains(":memory:") {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    pool_options
        .connect_with(options)
        .await
        .context("failed to connect to database")
}

/// Single-connection in-memory pool, used by tests and throwaway runs.
pub async fn connect_in_memory() -> anyhow::Result<DbPool> {
    connect(&DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        ..DatabaseSettings::default()
    })
    .await
}

/// Apply module migrations that have not run yet.
///
/// Each migration runs in its own transaction together with its bookkeeping
/// row, so a failed migration leaves no trace. Returns the number applied.
pub async fn migrate(pool: &DbPool, migrations: &[(String, Migration)]) -> anyhow::Result<usize> {
    sqlx::raw_sql(MIGRATIONS_TABLE)
        .execute(pool)
        .await
        .context("failed to create schema_migrations table")?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let already: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM schema_migrations WHERE module = ? AND id = ?",
        )
        .bind(module)
        .bind(migration.id)
        .fetch_one(pool)
        .await
        .context("failed to read schema_migrations")?;

        if already > 0 {
            tracing::debug!(target: "roster-db", module = %module, id = migration.id, "migration already applied");
            continue;
        }

        let mut tx = pool.begin().await.context("failed to begin migration")?;

        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("migration '{}/{}' failed", module, migration.id))?;

        sqlx::query("INSERT INTO schema_migrations (module, id) VALUES (?, ?)")
            .bind(module)
            .bind(migration.id)
            .execute(&mut *tx)
            .await
            .context("failed to record migration")?;

        tx.commit()
            .await
            .with_context(|| format!("failed to commit migration '{}/{}'", module, migration.id))?;

        tracing::info!(target: "roster-db", module = %module, id = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
