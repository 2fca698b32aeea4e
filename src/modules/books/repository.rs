//! Book persistence.

use acervo_db::{DbError, DbPool};
use chrono::Utc;

use super::models::{BookRow, CreateBook, UpdateBook};

const BOOK_COLUMNS: &str = "id, titulo AS title, autor AS author, ano AS year, \
     genero AS genre, categoria_id AS category_id, created_at, updated_at";

/// Insert a book stamped with the current time.
///
/// An unknown `category_id` surfaces as a foreign-key violation.
pub async fn create_book(pool: &DbPool, book: &CreateBook) -> Result<BookRow, DbError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, BookRow>(&format!(
        "INSERT INTO livros (titulo, autor, ano, genero, categoria_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {BOOK_COLUMNS}"
    ))
    .bind(&book.title)
    .bind(&book.author)
    .bind(book.year)
    .bind(&book.genre)
    .bind(book.category_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_books(pool: &DbPool) -> Result<Vec<BookRow>, DbError> {
    let rows = sqlx::query_as::<_, BookRow>(&format!(
        "SELECT {BOOK_COLUMNS} FROM livros ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_book(pool: &DbPool, id: i64) -> Result<BookRow, DbError> {
    sqlx::query_as::<_, BookRow>(&format!("SELECT {BOOK_COLUMNS} FROM livros WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)
}

/// Overwrite the editable fields and bump `updated_at` in one statement.
pub async fn update_book(pool: &DbPool, id: i64, book: &UpdateBook) -> Result<BookRow, DbError> {
    sqlx::query_as::<_, BookRow>(&format!(
        "UPDATE livros SET titulo = ?, autor = ?, ano = ?, genero = ?, updated_at = ? \
         WHERE id = ? RETURNING {BOOK_COLUMNS}"
    ))
    .bind(&book.title)
    .bind(&book.author)
    .bind(book.year)
    .bind(&book.genre)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

pub async fn delete_book(pool: &DbPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM livros WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
