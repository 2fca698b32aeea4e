pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use acervo_kernel::{InitCtx, Migration, Module};
use axum::{routing::get, Router};
use serde_json::json;

use crate::state::AppState;

/// Book CRUD under `/livros`
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module<AppState> for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router<AppState> {
        let collection = get(routes::list_books).post(routes::create_book);
        Router::new()
            .route("/livros/", collection.clone())
            .route("/livros", collection)
            .route(
                "/livros/{id}",
                get(routes::get_book)
                    .put(routes::update_book)
                    .delete(routes::delete_book),
            )
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
                    }
                }
            })
        };
        let body = |schema: &str| {
            json!({
                "required": true,
                "content": {
                    "application/json": {
                        "schema": { "$ref": format!("#/components/schemas/{schema}") }
                    }
                }
            })
        };
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });

        Some(json!({
            "paths": {
                "/livros/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books ordered by id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "security": [{ "bearerAuth": [] }],
                        "requestBody": body("CreateBook"),
                        "responses": {
                            "201": book("Book created"),
                            "401": error("Missing or invalid token"),
                            "422": error("Blank fields or unknown category")
                        }
                    }
                },
                "/livros/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": {
                            "200": book("The book"),
                            "404": error("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Replace the editable fields of a book",
                        "tags": ["Books"],
                        "security": [{ "bearerAuth": [] }],
                        "parameters": [id_param],
                        "requestBody": body("UpdateBook"),
                        "responses": {
                            "200": book("Book updated"),
                            "401": error("Missing or invalid token"),
                            "404": error("Book not found"),
                            "422": error("Blank fields")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "security": [{ "bearerAuth": [] }],
                        "parameters": [id_param],
                        "responses": {
                            "200": {
                                "description": "Book deleted",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
                                    }
                                }
                            },
                            "401": error("Missing or invalid token"),
                            "404": error("Book not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "titulo": { "type": "string" },
                            "autor": { "type": "string" },
                            "ano": { "type": "integer", "format": "int32" },
                            "genero": { "type": "string" },
                            "categoria_id": { "type": ["integer", "null"], "format": "int64" },
                            "created_at": { "type": "string", "format": "date-time" },
                            "updated_at": { "type": "string", "format": "date-time" }
                        },
                        "required": ["id", "titulo", "autor", "ano", "genero", "created_at", "updated_at"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "titulo": { "type": "string" },
                            "autor": { "type": "string" },
                            "ano": { "type": "integer", "format": "int32" },
                            "genero": { "type": "string" },
                            "categoria_id": { "type": ["integer", "null"], "format": "int64" }
                        },
                        "required": ["titulo", "autor", "ano", "genero"]
                    },
                    "UpdateBook": {
                        "type": "object",
                        "properties": {
                            "titulo": { "type": "string" },
                            "autor": { "type": "string" },
                            "ano": { "type": "integer", "format": "int32" },
                            "genero": { "type": "string" }
                        },
                        "required": ["titulo", "autor", "ano", "genero"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> &'static [Migration] {
        &[Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE livros (
                    id           INTEGER PRIMARY KEY AUTOINCREMENT,
                    titulo       TEXT NOT NULL,
                    autor        TEXT NOT NULL,
                    ano          INTEGER NOT NULL,
                    genero       TEXT NOT NULL,
                    categoria_id INTEGER REFERENCES categorias (id) ON DELETE CASCADE,
                    created_at   TEXT NOT NULL,
                    updated_at   TEXT NOT NULL
                );
                CREATE INDEX idx_livros_titulo ON livros (titulo);
                CREATE INDEX idx_livros_categoria_id ON livros (categoria_id);
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module<AppState>> {
    std::sync::Arc::new(BooksModule::new())
}
