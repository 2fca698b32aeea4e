pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use acervo_kernel::{InitCtx, Migration, Module};
use axum::{routing::get, Router};
use serde_json::json;

use crate::state::AppState;

/// Category CRUD under `/categorias`
pub struct CategoriesModule;

impl CategoriesModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module<AppState> for CategoriesModule {
    fn name(&self) -> &'static str {
        "categories"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "categories module initialized");
        Ok(())
    }

    fn routes(&self) -> Router<AppState> {
        let collection = get(routes::list_categories).post(routes::create_category);
        Router::new()
            .route("/categorias/", collection.clone())
            .route("/categorias", collection)
            .route(
                "/categorias/{id}",
                get(routes::get_category)
                    .put(routes::update_category)
                    .delete(routes::delete_category),
            )
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let with_description = |description: &str| {
            let mut response = error.clone();
            response["description"] = json!(description);
            response
        };
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });
        let payload = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/CategoryPayload" }
                }
            }
        });
        let category = json!({
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Category" }
                }
            }
        });
        let with_category = |description: &str| {
            let mut response = category.clone();
            response["description"] = json!(description);
            response
        };

        Some(json!({
            "paths": {
                "/categorias/": {
                    "get": {
                        "summary": "List categories",
                        "tags": ["Categories"],
                        "responses": {
                            "200": {
                                "description": "All categories ordered by id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Category" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a category",
                        "tags": ["Categories"],
                        "security": [{ "bearerAuth": [] }],
                        "requestBody": payload,
                        "responses": {
                            "201": with_category("Category created"),
                            "401": with_description("Missing or invalid token"),
                            "409": with_description("Name already in use"),
                            "422": with_description("Blank name")
                        }
                    }
                },
                "/categorias/{id}": {
                    "get": {
                        "summary": "Get a category",
                        "tags": ["Categories"],
                        "parameters": [id_param],
                        "responses": {
                            "200": with_category("The category"),
                            "404": with_description("Category not found")
                        }
                    },
                    "put": {
                        "summary": "Rename a category",
                        "tags": ["Categories"],
                        "security": [{ "bearerAuth": [] }],
                        "parameters": [id_param],
                        "requestBody": payload,
                        "responses": {
                            "200": with_category("Category updated"),
                            "401": with_description("Missing or invalid token"),
                            "404": with_description("Category not found"),
                            "409": with_description("Name already in use")
                        }
                    },
                    "delete": {
                        "summary": "Delete a category and its books",
                        "tags": ["Categories"],
                        "security": [{ "bearerAuth": [] }],
                        "parameters": [id_param],
                        "responses": {
                            "200": {
                                "description": "Category deleted",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
                                    }
                                }
                            },
                            "401": with_description("Missing or invalid token"),
                            "404": with_description("Category not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Category": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "nome": { "type": "string" }
                        },
                        "required": ["id", "nome"]
                    },
                    "CategoryPayload": {
                        "type": "object",
                        "properties": {
                            "nome": { "type": "string" }
                        },
                        "required": ["nome"]
                    },
                    "Message": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" }
                        },
                        "required": ["message"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> &'static [Migration] {
        &[Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE categorias (
                    id   INTEGER PRIMARY KEY AUTOINCREMENT,
                    nome TEXT NOT NULL UNIQUE
                );
                "#,
        }]
    }
}

/// Create a new instance of the categories module
pub fn create_module() -> std::sync::Arc<dyn Module<AppState>> {
    std::sync::Arc::new(CategoriesModule::new())
}
