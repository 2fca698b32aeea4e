use acervo_authz::PLACEHOLDER_HASH;
use acervo_http::{AppError, AppJson};
use anyhow::Context;
use axum::{extract::State, Json};
use serde_json::json;

use super::models::{Credentials, RegisterResponse, TokenResponse};
use super::repository;
use crate::state::AppState;
use crate::utils::require_non_blank;

const INVALID_CREDENTIALS: &str = "Credenciais inválidas";

/// Register endpoint
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> Result<Json<RegisterResponse>, AppError> {
    require_non_blank(&[
        ("nome_usuario", payload.username.as_str()),
        ("senha", payload.password.as_str()),
    ])?;

    if repository::username_exists(&state.db, &payload.username).await? {
        return Err(username_taken(&payload.username));
    }

    // Argon2 is deliberately slow; keep it off the async workers.
    let hasher = state.passwords.clone();
    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash_password(&password))
        .await
        .context("password hashing task failed")??;

    let user = match repository::create_user(&state.db, &payload.username, &password_hash).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration of the same name.
        Err(e) if e.is_unique_violation() => return Err(username_taken(&payload.username)),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok(Json(RegisterResponse {
        message: "Usuário registrado com sucesso".to_string(),
        username: user.username,
    }))
}

/// Login endpoint
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = repository::find_by_username(&state.db, &payload.username).await?;

    // Unknown names still pay for one verification so timing does not leak them.
    let hasher = state.passwords.clone();
    let password = payload.password;
    let stored_hash = user
        .as_ref()
        .map_or(PLACEHOLDER_HASH, |user| user.password_hash.as_str())
        .to_owned();
    let matches =
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &stored_hash))
            .await
            .context("password verification task failed")??;

    let user = match user {
        Some(user) if matches => user,
        Some(user) => {
            tracing::info!(user_id = user.id, "login with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }
        None => {
            tracing::info!(username = %payload.username, "login for unknown user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    let issued = state.tokens.issue(&user.username)?;
    tracing::info!(
        user_id = user.id,
        expires_at = %issued.expires_at,
        "access token issued"
    );

    Ok(Json(TokenResponse::bearer(issued.token)))
}

fn username_taken(username: &str) -> AppError {
    AppError::conflict(
        vec![json!({ "field": "nome_usuario", "error": "taken" })],
        format!("Nome de usuário '{username}' já está em uso"),
    )
}
