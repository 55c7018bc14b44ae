//! # HTTP Server
//!
//! Combines the health, form and table routers behind one CORS layer.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::HttpServerConfig;
use super::form_routes::form_routes;
use super::health_routes::health_routes;
use super::table_routes::{table_routes, TableState};
use crate::forms::FormRegistry;
use crate::table::TableLimits;

/// HTTP server for form validation and table queries
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `registry`, paging table queries by `limits`
    pub fn with_config(
        config: HttpServerConfig,
        registry: Arc<FormRegistry>,
        limits: TableLimits,
    ) -> Self {
        let router = Self::build_router(&config, registry, limits);
        Self { config, router }
    }

    fn build_router(
        config: &HttpServerConfig,
        registry: Arc<FormRegistry>,
        limits: TableLimits,
    ) -> Router {
        Router::new()
            .merge(health_routes())
            .nest("/forms", form_routes(registry))
            .nest("/table", table_routes(TableState { limits }))
            .layer(TraceLayer::new_for_http())
            .layer(config.cors_layer())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.bind_addr()?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "folio-forms HTTP server listening");
        info!("routes: /health, /forms, /forms/:name/validate, /table/query");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn server(config: HttpServerConfig) -> HttpServer {
        server_with_limits(config, TableLimits::default())
    }

    fn server_with_limits(config: HttpServerConfig, limits: TableLimits) -> HttpServer {
        let registry = Arc::new(FormRegistry::with_builtin_forms().unwrap());
        HttpServer::with_config(config, registry, limits)
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = server(HttpServerConfig::with_port(8080));
        assert_eq!(server.socket_addr(), "127.0.0.1:8080");
    }

    #[tokio::test]
    async fn test_health() {
        let router = server(HttpServerConfig::default()).router();
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_contact_validation_through_server() {
        let router = server(HttpServerConfig::default()).router();
        let request = Request::post("/forms/contact/validate")
            .header("content-type", "application/json")
            .body(Body::from(json!({"iAmA": "developer"}).to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "invalid");
        assert!(!body["errors"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_table_query_pages_by_configured_default() {
        let limits = TableLimits {
            default_page_size: 3,
            max_page_size: 100,
        };
        let router = server_with_limits(HttpServerConfig::default(), limits).router();
        let rows: Vec<Value> = (1..=7).map(|i| json!({"id": i})).collect();
        let request = Request::post("/table/query")
            .header("content-type", "application/json")
            .body(Body::from(json!({"rows": rows}).to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["pageSize"], 3);
        assert_eq!(body["totalPages"], 3);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let router = server(HttpServerConfig::default()).router();
        let response = router
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
