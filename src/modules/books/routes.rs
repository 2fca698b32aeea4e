use acervo_db::DbError;
use acervo_http::{AppError, AppJson, AppPath};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::models::{BookResponse, CreateBook, UpdateBook};
use super::repository;
use crate::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::require_non_blank;

const NOT_FOUND: &str = "Livro não encontrado";

/// Create book endpoint
pub async fn create_book(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(payload): AppJson<CreateBook>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    require_non_blank(&[
        ("titulo", payload.title.as_str()),
        ("autor", payload.author.as_str()),
        ("genero", payload.genre.as_str()),
    ])?;

    let row = match repository::create_book(&state.db, &payload).await {
        Ok(row) => row,
        Err(e) if e.is_foreign_key_violation() => {
            return Err(AppError::validation(
                vec![json!({ "field": "categoria_id", "error": "not_found" })],
                format!(
                    "Categoria {} não existe",
                    payload.category_id.unwrap_or_default()
                ),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(book_id = row.id, user = %user.username, "book created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// List books endpoint
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookResponse>>, AppError> {
    let rows = repository::list_books(&state.db).await?;
    Ok(Json(rows.into_iter().map(BookResponse::from).collect()))
}

/// Get book endpoint
pub async fn get_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BookResponse>, AppError> {
    let row = repository::get_book(&state.db, id).await.map_err(not_found)?;
    Ok(Json(row.into()))
}

/// Update book endpoint
pub async fn update_book(
    State(state): State<AppState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateBook>,
) -> Result<Json<BookResponse>, AppError> {
    require_non_blank(&[
        ("titulo", payload.title.as_str()),
        ("autor", payload.author.as_str()),
        ("genero", payload.genre.as_str()),
    ])?;

    let row = repository::update_book(&state.db, id, &payload)
        .await
        .map_err(not_found)?;

    tracing::info!(book_id = row.id, user = %user.username, "book updated");
    Ok(Json(row.into()))
}

/// Delete book endpoint
pub async fn delete_book(
    State(state): State<AppState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    repository::delete_book(&state.db, id)
        .await
        .map_err(not_found)?;

    tracing::info!(book_id = id, user = %user.username, "book deleted");
    Ok(Json(json!({ "message": "Livro deletado com sucesso" })))
}

fn not_found(err: DbError) -> AppError {
    match err {
        DbError::NotFound => AppError::not_found(NOT_FOUND),
        other => other.into(),
    }
}
