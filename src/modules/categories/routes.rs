use acervo_db::DbError;
use acervo_http::{AppError, AppJson, AppPath};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::models::{CategoryPayload, CategoryResponse};
use super::repository;
use crate::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::require_non_blank;

const NOT_FOUND: &str = "Categoria não encontrada";

/// Create category endpoint
pub async fn create_category(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(payload): AppJson<CategoryPayload>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    require_non_blank(&[("nome", payload.name.as_str())])?;

    let row = repository::create_category(&state.db, &payload.name)
        .await
        .map_err(|e| write_error(e, &payload.name))?;

    tracing::info!(category_id = row.id, user = %user.username, "category created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// List categories endpoint
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let rows = repository::list_categories(&state.db).await?;
    Ok(Json(rows.into_iter().map(CategoryResponse::from).collect()))
}

/// Get category endpoint
pub async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<CategoryResponse>, AppError> {
    let row = repository::get_category(&state.db, id)
        .await
        .map_err(not_found)?;
    Ok(Json(row.into()))
}

/// Update category endpoint
pub async fn update_category(
    State(state): State<AppState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CategoryPayload>,
) -> Result<Json<CategoryResponse>, AppError> {
    require_non_blank(&[("nome", payload.name.as_str())])?;

    let row = repository::update_category(&state.db, id, &payload.name)
        .await
        .map_err(|e| write_error(e, &payload.name))?;

    tracing::info!(category_id = row.id, user = %user.username, "category updated");
    Ok(Json(row.into()))
}

/// Delete category endpoint
pub async fn delete_category(
    State(state): State<AppState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    repository::delete_category(&state.db, id)
        .await
        .map_err(not_found)?;

    tracing::info!(category_id = id, user = %user.username, "category deleted");
    Ok(Json(json!({ "message": "Categoria deletada com sucesso" })))
}

fn not_found(err: DbError) -> AppError {
    match err {
        DbError::NotFound => AppError::not_found(NOT_FOUND),
        other => other.into(),
    }
}

fn write_error(err: DbError, name: &str) -> AppError {
    if err.is_unique_violation() {
        return AppError::conflict(
            vec![json!({ "field": "nome", "error": "taken" })],
            format!("Categoria '{name}' já existe"),
        );
    }
    not_found(err)
}
