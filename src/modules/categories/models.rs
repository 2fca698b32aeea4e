use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `categorias` table
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
}

/// Category as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

impl From<CategoryRow> for CategoryResponse {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Body of create and update requests
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    #[serde(rename = "nome")]
    pub name: String,
}
