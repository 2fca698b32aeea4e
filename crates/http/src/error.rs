//! Error type returned by every handler, and its JSON rendering.
//!
//! Body shape:
//! `{"error": {"code", "message", "details", "trace_id", "timestamp"}}`

use acervo_authz::AuthError;
use acervo_db::DbError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AppError {
    /// Input that parsed but breaks a field rule. Rendered as 422.
    #[error("validation error: {message}")]
    Validation { message: String, details: Vec<Value> },

    /// Write collides with a uniqueness rule. Rendered as 409.
    #[error("conflict: {message}")]
    Conflict { message: String, details: Vec<Value> },

    /// Body or path segment the extractors could not read. Keeps the
    /// rejection's status.
    #[error("bad request: {message}")]
    BadRequest { status: StatusCode, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or rejected credentials. Rendered as 401 with a
    /// `WWW-Authenticate: Bearer` challenge.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(details: Vec<Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(details: Vec<Value>, message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::BadRequest { status, .. } => *status,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code placed in the body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Conflict { .. } => "conflict",
            Self::BadRequest { .. } => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Unauthorized(_) => "unauthorized",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => Self::not_found("registro não encontrado"),
            other => Self::Internal(anyhow::Error::new(other)),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        DbError::from(err).into()
    }
}

/// Well-formed JSON that does not fit the payload type is a validation
/// failure; anything unreadable keeps axum's 4xx status.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => Self::validation(
                vec![json!({ "error": err.body_text() })],
                "Corpo da requisição inválido",
            ),
            other => Self::BadRequest {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Token problems become 401; broken configuration or hashing is a 500.
impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Expired | AuthError::InvalidToken(_) => {
                tracing::debug!(error = %err, "rejecting access token");
                Self::unauthorized("Não foi possível validar as credenciais")
            }
            other => Self::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let trace_id = Uuid::new_v4();
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(%trace_id, code, error = ?self, "request failed");
        } else {
            tracing::info!(%trace_id, code, status = status.as_u16(), "request rejected");
        }

        let (message, details) = match self {
            Self::Validation { message, details } | Self::Conflict { message, details } => {
                (message, details)
            }
            Self::BadRequest { message, .. }
            | Self::NotFound(message)
            | Self::Unauthorized(message) => (message, Vec::new()),
            // Internal details stay in the logs for release builds.
            Self::Internal(e) if cfg!(debug_assertions) => (e.to_string(), Vec::new()),
            Self::Internal(_) => ("An internal server error occurred".to_string(), Vec::new()),
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
                "details": details,
                "trace_id": trace_id.to_string(),
                "timestamp": Utc::now().to_rfc3339(),
            }
        });

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_body_has_every_field() {
        let response = AppError::not_found("Livro não encontrado").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "Livro não encontrado");
        assert!(json["error"]["details"].as_array().unwrap().is_empty());
        assert!(Uuid::parse_str(json["error"]["trace_id"].as_str().unwrap()).is_ok());
        assert!(
            chrono::DateTime::parse_from_rfc3339(json["error"]["timestamp"].as_str().unwrap())
                .is_ok()
        );
    }

    #[tokio::test]
    async fn validation_carries_details() {
        let details = vec![json!({"field": "nome", "error": "required"})];
        let response = AppError::validation(details, "invalid").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["details"][0]["field"], "nome");
    }

    #[test]
    fn unauthorized_sets_challenge_header() {
        let response = AppError::unauthorized("no token").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn status_and_code_per_variant() {
        let cases = [
            (AppError::conflict(vec![], "taken"), StatusCode::CONFLICT, "conflict"),
            (AppError::not_found("x"), StatusCode::NOT_FOUND, "not_found"),
            (
                AppError::BadRequest {
                    status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    message: "expected application/json".into(),
                },
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "bad_request",
            ),
            (
                AppError::Internal(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status(), status);
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn db_not_found_maps_to_404() {
        assert_eq!(AppError::from(DbError::NotFound).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_errors_split_by_cause() {
        assert_eq!(AppError::from(AuthError::Expired).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::from(AuthError::InvalidToken("bad signature".into())).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::Hashing("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
