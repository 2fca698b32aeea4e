//! Startup and shutdown sequence shared by the server binary and the CLI.

use acervo_authz::TokenService;
use acervo_db::DbPool;
use acervo_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use anyhow::Context;
use axum::Router;

use crate::{modules, state::AppState};

/// Registry holding every application module in mount order
pub fn build_registry() -> anyhow::Result<ModuleRegistry<AppState>> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry)?;
    Ok(registry)
}

/// Full HTTP application: module routes, docs, fallback and middleware
pub fn build_app(registry: &ModuleRegistry<AppState>, settings: &Settings, state: AppState) -> Router {
    acervo_http::build_router(registry, settings, state)
}

/// Open the configured database and bring its schema up to date.
pub async fn prepare_database(
    registry: &ModuleRegistry<AppState>,
    settings: &Settings,
) -> anyhow::Result<DbPool> {
    let (pool, applied) = open_and_migrate(registry, settings).await?;
    tracing::info!(applied, "database schema up to date");
    Ok(pool)
}

/// Apply pending migrations and exit. Returns how many were applied.
pub async fn run_migrations(settings: &Settings) -> anyhow::Result<usize> {
    let registry = build_registry()?;
    let (pool, applied) = open_and_migrate(&registry, settings).await?;
    pool.close().await;
    Ok(applied)
}

async fn open_and_migrate(
    registry: &ModuleRegistry<AppState>,
    settings: &Settings,
) -> anyhow::Result<(DbPool, usize)> {
    let pool = acervo_db::create_pool(&settings.database)
        .await
        .with_context(|| format!("failed to open database {}", settings.database.url))?;

    let applied = acervo_db::migrate(&pool, &registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;

    Ok((pool, applied))
}

/// Run the service until a shutdown signal arrives.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let registry = build_registry()?;
    let ctx = InitCtx { settings };

    registry.init_modules(&ctx).await?;

    let pool = prepare_database(&registry, settings).await?;
    let tokens = TokenService::from_settings(&settings.auth).context("invalid auth settings")?;
    let state = AppState::new(pool.clone(), tokens);

    registry.start_modules(&ctx).await?;
    tracing::info!(modules = registry.module_count(), "modules started");

    let router = build_app(&registry, settings, state);
    let served = acervo_http::start_server(router, settings).await;

    // Stop modules and release the pool even when the server failed.
    if let Err(e) = registry.stop_modules().await {
        tracing::warn!(error = ?e, "module shutdown reported an error");
    }
    pool.close().await;
    tracing::info!("shutdown complete");

    served
}
