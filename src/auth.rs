//! Caller identity for protected endpoints.

use acervo_http::AppError;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::modules::users::repository as users;
use crate::state::AppState;

const CREDENTIALS_REJECTED: &str = "Não foi possível validar as credenciais";

/// Authenticated user extracted from `Authorization: Bearer <token>`.
///
/// Rejects with 401 when the header is missing or malformed, the token does
/// not verify, or its subject no longer names a user.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| AppError::unauthorized("Não autenticado"))?;

        let claims = state.tokens.verify(token)?;

        let user = users::find_by_username(&state.db, &claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::debug!(subject = %claims.sub, "token subject no longer exists");
                AppError::unauthorized(CREDENTIALS_REJECTED)
            })?;

        Ok(CurrentUser {
            id: user.id,
            username: user.username,
        })
    }
}

/// Token part of a `Bearer` authorization header; the scheme is matched
/// case-insensitively.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
