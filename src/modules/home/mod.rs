use acervo_kernel::Module;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Welcome message at `/`
pub struct HomeModule;

impl Module<AppState> for HomeModule {
    fn name(&self) -> &'static str {
        "home"
    }

    fn routes(&self) -> Router<AppState> {
        Router::new().route("/", get(welcome))
    }

    fn openapi(&self) -> Option<Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Welcome message",
                        "responses": {
                            "200": {
                                "description": "Greeting",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
    }
}

async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Bem-vindo à API de Gerenciamento de Livros!" }))
}

pub fn create_module() -> std::sync::Arc<dyn Module<AppState>> {
    std::sync::Arc::new(HomeModule)
}
