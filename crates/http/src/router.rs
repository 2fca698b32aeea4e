//! Router builder for the Acervo HTTP server

use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use acervo_kernel::ModuleRegistry;

use crate::{error::AppError, MakeRequestUuid};

/// Builder for constructing the main HTTP router
///
/// Layers wrap only what has been added before them, so add routes and
/// modules first and middleware last.
pub struct RouterBuilder<S = ()> {
    router: Router<S>,
}

impl<S> RouterBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter<S>) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge a module's router; module routes carry absolute paths
    pub fn mount_module(mut self, module_name: &str, module_router: Router<S>) -> Self {
        tracing::info!(module = module_name, "mounting module routes");
        self.router = self.router.merge(module_router);
        self
    }

    /// Provide the shared state and finish the stateful part of the router
    pub fn with_state(self, state: S) -> RouterBuilder<()> {
        RouterBuilder {
            router: self.router.with_state(state),
        }
    }

    /// Build the final router
    pub fn build(self) -> Router<S> {
        self.router
    }
}

impl RouterBuilder<()> {
    /// Answer unknown paths with the standard error body
    pub fn with_fallback(mut self) -> Self {
        self.router = self
            .router
            .fallback(|| async { AppError::not_found("Rota não encontrada") });
        self
    }

    /// Add tracing middleware
    ///
    /// Headers are left out of spans: they carry bearer tokens.
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(false))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Add request ID middleware
    ///
    /// Generates `x-request-id` when the caller did not send one and echoes
    /// it on the response.
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Serve Swagger UI and the merged OpenAPI document of every module
    pub fn with_openapi<T>(mut self, registry: &ModuleRegistry<T>) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let openapi_doc = merge_openapi(registry);

        // Swagger UI needs a typed utoipa document
        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(openapi_doc.clone())
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "merged OpenAPI document is invalid; serving a stub");
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("Acervo API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        // Raw merged document for external consumers
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_doc.clone()) }),
        );

        self
    }
}

impl<S> Default for RouterBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Base document plus every module's `paths` and `components.schemas`
pub fn merge_openapi<T>(registry: &ModuleRegistry<T>) -> serde_json::Value
where
    T: Clone + Send + Sync + 'static,
{
    let mut openapi_doc = serde_json::json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Acervo API",
            "version": "1.0.0",
            "description": "Gerenciamento de livros, categorias e usuários"
        },
        "paths": {},
        "components": {
            "schemas": {},
            "securitySchemes": {
                "bearerAuth": {
                    "type": "http",
                    "scheme": "bearer",
                    "bearerFormat": "JWT"
                }
            }
        }
    });

    openapi_doc["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": {} },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    openapi_doc["paths"]["/healthz"] = serde_json::json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": { "text/plain": { "schema": { "type": "string" } } }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(fragment) = module.openapi() else {
            continue;
        };

        if let Some(paths) = fragment.get("paths").and_then(|p| p.as_object()) {
            for (path, path_item) in paths {
                openapi_doc["paths"][path] = path_item.clone();
            }
        }

        if let Some(schemas) = fragment
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
        {
            for (schema_name, schema_def) in schemas {
                openapi_doc["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use acervo_kernel::Module;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    struct DocModule;

    #[async_trait::async_trait]
    impl Module for DocModule {
        fn name(&self) -> &'static str {
            "doc"
        }

        fn routes(&self) -> Router {
            Router::new().route("/doc/", get(|| async { "doc" }))
        }

        fn openapi(&self) -> Option<serde_json::Value> {
            Some(serde_json::json!({
                "paths": { "/doc/": { "get": { "summary": "Doc" } } },
                "components": { "schemas": { "Doc": { "type": "object" } } }
            }))
        }
    }

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(DocModule)).unwrap();
        registry
    }

    async fn status_of(router: Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_module_mounting() {
        let registry = registry();
        let mut builder = RouterBuilder::new();
        for module in registry.modules() {
            builder = builder.mount_module(module.name(), module.routes());
        }
        let router = builder.with_state(()).build();

        assert_eq!(status_of(router, "/doc/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_chain_and_request_id() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "ok" }))
            .with_state(())
            .with_fallback()
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .build();

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_fallback_returns_json_404() {
        let router = RouterBuilder::<()>::new()
            .with_state(())
            .with_fallback()
            .build();

        assert_eq!(status_of(router, "/nope").await, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_openapi_merges_module_fragments() {
        let doc = merge_openapi(&registry());

        assert_eq!(doc["paths"]["/doc/"]["get"]["summary"], "Doc");
        assert!(doc["paths"]["/healthz"].is_object());
        assert!(doc["components"]["schemas"]["Doc"].is_object());
        assert!(doc["components"]["schemas"]["ErrorResponse"].is_object());
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let router = RouterBuilder::<()>::new()
            .with_state(())
            .with_openapi(&registry())
            .build();

        assert_eq!(status_of(router, "/docs/openapi.json").await, StatusCode::OK);
    }
}
