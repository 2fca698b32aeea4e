use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `usuarios` table. Never serialized: it carries the hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Credentials accepted by both `/register` and `/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(rename = "nome_usuario")]
    pub username: String,
    #[serde(rename = "senha")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "nome_usuario")]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
