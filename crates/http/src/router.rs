//! Router builder for the courselib HTTP server

use std::time::Duration;

use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use courselib_kernel::ModuleRegistry;

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/api/{module_name}`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        let api_path = format!("/api/{}", module_name);
        self.router = self.router.nest(&api_path, module_router);
        self
    }

    /// Add request/response tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add permissive CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(CorsLayer::permissive());
        self
    }

    /// Stamp every request with an `x-request-id` uuid
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    /// Abort requests that exceed the configured timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.router = self.router.layer(TimeoutLayer::new(timeout));
        self
    }

    /// Merge every module's OpenAPI fragment into one document and serve it,
    /// both raw and through Swagger UI
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let mut document = base_document();

        for module in registry.modules() {
            if let Some(fragment) = module.openapi() {
                merge_module_fragment(&mut document, module.name(), &fragment);
            }
        }

        // Swagger UI wants a typed document; fall back to a bare one if the
        // merged JSON does not deserialize.
        let typed: utoipa::openapi::OpenApi =
            serde_json::from_value(document.clone()).unwrap_or_else(|_| {
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("Course Library API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", typed),
        );

        // Raw JSON for external consumers
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(document.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Skeleton OpenAPI document: info, the health endpoint, and the error
/// envelope schema shared by every module.
fn base_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Course Library API",
            "version": "1.0.0",
            "description": "Authors and their courses, with filtering and search"
        },
        "paths": {
            "/healthz": {
                "get": {
                    "summary": "Health check",
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ErrorResponse": {
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
                }
            }
        }
    })
}

/// Fold one module's fragment into the merged document. Module paths are
/// re-rooted under `/api/{module_name}`; schemas merge by name.
fn merge_module_fragment(document: &mut Value, module_name: &str, fragment: &Value) {
    if let Some(paths) = fragment.get("paths").and_then(Value::as_object) {
        for (path, item) in paths {
            let prefixed = format!("/api/{}{}", module_name, path);
            document["paths"][prefixed] = item.clone();
        }
    }

    let schemas = fragment
        .get("components")
        .and_then(|components| components.get("schemas"))
        .and_then(Value::as_object);
    if let Some(schemas) = schemas {
        for (name, schema) in schemas {
            document["components"]["schemas"][name] = schema.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn router_builder_builds_with_plain_routes() {
        let _router = RouterBuilder::new()
            .route("/test", get(|| async { "test" }))
            .build();
    }

    #[tokio::test]
    async fn module_routers_nest_under_api() {
        let module_router = Router::new().route("/", get(|| async { "module" }));

        let _router = RouterBuilder::new()
            .mount_module("authors", module_router)
            .build();
    }

    #[tokio::test]
    async fn middleware_chain_builds() {
        let _router = RouterBuilder::new()
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(Duration::from_millis(5000))
            .route("/health", get(|| async { "ok" }))
            .build();
    }

    #[test]
    fn module_fragments_are_rerooted_and_merged() {
        let mut document = base_document();
        let fragment = json!({
            "paths": { "/": { "get": { "summary": "List authors" } } },
            "components": { "schemas": { "AuthorView": { "type": "object" } } }
        });

        merge_module_fragment(&mut document, "authors", &fragment);

        assert!(document["paths"].get("/api/authors/").is_some());
        assert!(document["components"]["schemas"].get("AuthorView").is_some());
        // The shared error schema survives the merge.
        assert!(document["components"]["schemas"]
            .get("ErrorResponse")
            .is_some());
    }
}
