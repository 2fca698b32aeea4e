use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `livros` table
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookResponse {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "categoria_id")]
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookRow> for BookResponse {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            year: row.year,
            genre: row.genre,
            category_id: row.category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Request to create a book
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBook {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "categoria_id", default)]
    pub category_id: Option<i64>,
}

/// Request to replace the editable fields of a book
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBook {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "genero")]
    pub genre: String,
}
