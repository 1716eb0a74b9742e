//! Roster application library
//!
//! Department and employee record keeping served over HTTP, plus the
//! bootstrap sequence shared by the server binary and the CLI.

pub mod modules;

use anyhow::Context;
use roster_kernel::{settings::Settings, DbPool, InitCtx, ModuleRegistry};

/// A booted application: modules initialized, schema migrated, modules started.
pub struct App {
    pub settings: Settings,
    pub db: DbPool,
    pub registry: ModuleRegistry,
}

impl App {
    /// Build the HTTP router for this application
    pub fn router(&self) -> anyhow::Result<axum::Router> {
        roster_http::build_router(&self.registry, &self.settings)
    }

    /// Serve HTTP until shutdown, then stop every module
    pub async fn serve(self) -> anyhow::Result<()> {
        let served = roster_http::start_server(&self.registry, &self.settings).await;
        self.registry
            .stop_modules()
            .await
            .context("failed to stop modules")?;
        self.db.close().await;
        served
    }
}

/// Registry holding every application module
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Apply all pending module migrations
pub async fn migrate(db: &DbPool) -> anyhow::Result<usize> {
    roster_db::migrate(db, &registry().collect_migrations()).await
}

/// Run the startup sequence against an already opened pool
pub async fn boot_with(settings: Settings, db: DbPool) -> anyhow::Result<App> {
    let registry = registry();

    let ctx = InitCtx {
        settings: &settings,
        db: &db,
    };

    registry.init_modules(&ctx).await?;

    let applied = roster_db::migrate(&db, &registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;
    tracing::info!(applied, "migrations complete");

    registry.start_modules(&ctx).await?;

    Ok(App {
        settings,
        db,
        registry,
    })
}

/// Connect to the configured database and run the startup sequence
pub async fn boot(settings: Settings) -> anyhow::Result<App> {
    let db = roster_db::connect(&settings.database).await?;
    boot_with(settings, db).await
}
