//! Category persistence.

use acervo_db::{DbError, DbPool};

use super::models::CategoryRow;

const CATEGORY_COLUMNS: &str = "id, nome AS name";

pub async fn create_category(pool: &DbPool, name: &str) -> Result<CategoryRow, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>(&format!(
        "INSERT INTO categorias (nome) VALUES (?) RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_categories(pool: &DbPool) -> Result<Vec<CategoryRow>, DbError> {
    let rows = sqlx::query_as::<_, CategoryRow>(&format!(
        "SELECT {CATEGORY_COLUMNS} FROM categorias ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_category(pool: &DbPool, id: i64) -> Result<CategoryRow, DbError> {
    sqlx::query_as::<_, CategoryRow>(&format!(
        "SELECT {CATEGORY_COLUMNS} FROM categorias WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Rename a category. Taking a name held by another row is a unique violation.
pub async fn update_category(pool: &DbPool, id: i64, name: &str) -> Result<CategoryRow, DbError> {
    sqlx::query_as::<_, CategoryRow>(&format!(
        "UPDATE categorias SET nome = ? WHERE id = ? RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(name)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Delete a category; its books go with it through the foreign key.
pub async fn delete_category(pool: &DbPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM categorias WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
