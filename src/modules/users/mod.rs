pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use acervo_kernel::{InitCtx, Migration, Module};
use axum::{routing::post, Router};
use serde_json::json;

use crate::state::AppState;

/// Account registration and token issuance
pub struct UsersModule;

impl UsersModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module<AppState> for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            token_ttl_minutes = ctx.settings.auth.access_token_expire_minutes,
            "users module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router<AppState> {
        Router::new()
            .route("/register", post(routes::register))
            .route("/login", post(routes::login))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/register": {
                    "post": {
                        "summary": "Register a user",
                        "tags": ["Users"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Credentials" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "User registered",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/RegisterResponse" }
                                    }
                                }
                            },
                            "409": {
                                "description": "Username already taken",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "422": {
                                "description": "Blank username or password",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/login": {
                    "post": {
                        "summary": "Exchange credentials for a bearer token",
                        "tags": ["Users"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Credentials" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Access token",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/TokenResponse" }
                                    }
                                }
                            },
                            "401": {
                                "description": "Invalid credentials",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Credentials": {
                        "type": "object",
                        "properties": {
                            "nome_usuario": { "type": "string" },
                            "senha": { "type": "string", "format": "password" }
                        },
                        "required": ["nome_usuario", "senha"]
                    },
                    "RegisterResponse": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" },
                            "nome_usuario": { "type": "string" }
                        },
                        "required": ["message", "nome_usuario"]
                    },
                    "TokenResponse": {
                        "type": "object",
                        "properties": {
                            "access_token": { "type": "string" },
                            "token_type": { "type": "string", "enum": ["bearer"] }
                        },
                        "required": ["access_token", "token_type"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> &'static [Migration] {
        &[Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE usuarios (
                    id           INTEGER PRIMARY KEY AUTOINCREMENT,
                    nome_usuario TEXT NOT NULL UNIQUE CHECK (nome_usuario <> ''),
                    senha_hash   TEXT NOT NULL
                );
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "users module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "users module stopped");
        Ok(())
    }
}

/// Create a new instance of the users module
pub fn create_module() -> std::sync::Arc<dyn Module<AppState>> {
    std::sync::Arc::new(UsersModule::new())
}
