//! User persistence.

use acervo_db::{DbError, DbPool};

use super::models::UserRow;

const USER_COLUMNS: &str = "id, nome_usuario AS username, senha_hash AS password_hash";

/// Insert a user. A taken username surfaces as a unique violation.
pub async fn create_user(
    pool: &DbPool,
    username: &str,
    password_hash: &str,
) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO usuarios (nome_usuario, senha_hash) VALUES (?, ?) RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn find_by_username(pool: &DbPool, username: &str) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM usuarios WHERE nome_usuario = ?"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn username_exists(pool: &DbPool, username: &str) -> Result<bool, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios WHERE nome_usuario = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}
