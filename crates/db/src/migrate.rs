//! Applies module migrations and records them in `_migrations`.

use std::collections::HashSet;

use acervo_kernel::Migration;
use chrono::Utc;

use crate::{DbError, DbPool};

const CREATE_LEDGER: &str = "CREATE TABLE IF NOT EXISTS _migrations (
    module     TEXT NOT NULL,
    id         TEXT NOT NULL,
    applied_at TEXT NOT NULL,
    PRIMARY KEY (module, id)
)";

/// Apply every migration not yet recorded, in the given order.
///
/// Each migration runs in its own transaction together with its ledger row,
/// so a failing migration leaves neither schema changes nor a record behind.
/// Returns the number of migrations applied by this call.
pub async fn migrate(pool: &DbPool, migrations: &[(String, Migration)]) -> Result<usize, DbError> {
    sqlx::query(CREATE_LEDGER).execute(pool).await?;

    let applied: HashSet<(String, String)> =
        sqlx::query_as::<_, (String, String)>("SELECT module, id FROM _migrations")
            .fetch_all(pool)
            .await?
            .into_iter()
            .collect();

    let mut count = 0;
    for (module, migration) in migrations {
        if applied.contains(&(module.clone(), migration.id.to_string())) {
            tracing::debug!(module = %module, id = migration.id, "migration already applied");
            continue;
        }

        let mut tx = pool.begin().await?;

        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(|source| DbError::Migration {
                module: module.clone(),
                id: migration.id.to_string(),
                source,
            })?;

        sqlx::query("INSERT INTO _migrations (module, id, applied_at) VALUES (?, ?, ?)")
            .bind(module)
            .bind(migration.id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(module = %module, id = migration.id, "migration applied");
        count += 1;
    }

    Ok(count)
}
