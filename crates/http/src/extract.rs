//! `Json` and `Path` extractors whose rejections render as [`AppError`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body. Undecodable payloads answer with the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters. A segment that does not parse answers with the error
/// envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn echo_json(AppJson(payload): AppJson<HashMap<String, i64>>) -> String {
        payload.len().to_string()
    }

    async fn echo_id(AppPath(id): AppPath<i64>) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/items", post(echo_json))
            .route("/items/{id}", get(echo_id))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post_json(body: &'static str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn wrong_field_type_is_a_validation_error() {
        let (status, body) = send(post_json(r#"{"ano": "dois mil"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");
        assert!(body["error"]["details"][0]["error"].is_string());
    }

    #[tokio::test]
    async fn broken_json_keeps_bad_request_status() {
        let (status, body) = send(post_json("{\"ano\": ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn missing_content_type_is_enveloped() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/items")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn non_numeric_path_id_is_enveloped() {
        let request = Request::builder()
            .uri("/items/abc")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
        assert!(body["error"]["trace_id"].is_string());
    }

    #[tokio::test]
    async fn valid_input_reaches_the_handler() {
        let response = app().oneshot(post_json(r#"{"ano": 1965}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
