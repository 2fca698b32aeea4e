//! Shared harness: the full router over a private in-memory database.

#![allow(dead_code)]

use acervo_app::{build_app, build_registry, AppState};
use acervo_authz::TokenService;
use acervo_kernel::settings::Settings;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let registry = build_registry().unwrap();
        let pool = acervo_db::create_memory_pool().await.unwrap();
        acervo_db::migrate(&pool, &registry.collect_migrations())
            .await
            .unwrap();

        let tokens = TokenService::new(SECRET, chrono::Duration::minutes(30)).unwrap();
        let state = AppState::new(pool, tokens);
        let router = build_app(&registry, &Settings::default(), state.clone());

        Self { router, state }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/register",
            None,
            Some(json!({ "nome_usuario": username, "senha": password })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "nome_usuario": username, "senha": password })),
        )
        .await
    }

    /// Register `username` and return a fresh access token for it.
    pub async fn token_for(&self, username: &str) -> String {
        let registered = self.register(username, "s3nha-forte").await;
        assert_eq!(registered.status, StatusCode::OK, "{:?}", registered.body);

        let login = self.login(username, "s3nha-forte").await;
        assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);
        login.body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_category(&self, token: &str, name: &str) -> Value {
        let response = self
            .request(
                Method::POST,
                "/categorias/",
                Some(token),
                Some(json!({ "nome": name })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    pub async fn create_book(&self, token: &str, book: Value) -> Value {
        let response = self
            .request(Method::POST, "/livros/", Some(token), Some(book))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }
}

pub fn duna() -> Value {
    json!({ "titulo": "Duna", "autor": "Herbert", "ano": 1965, "genero": "Ficção" })
}

/// Sign claims directly, bypassing the service's lifetime checks.
pub fn sign_token(secret: &str, sub: &str, iat: i64, exp: i64) -> String {
    let claims = acervo_authz::Claims {
        sub: sub.to_string(),
        iat,
        exp,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
