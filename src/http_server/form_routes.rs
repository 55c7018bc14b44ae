//! Form HTTP Routes
//!
//! Endpoints for listing registered forms and validating submissions.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::errors::{ApiError, ApiResult};
use crate::forms::FormRegistry;
use crate::schema::{FormDescription, FormValues};

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct FormsListResponse {
    pub forms: Vec<FormDescription>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ValidatedResponse {
    pub status: &'static str,
    pub data: FormValues,
}

// ==================
// Form Routes
// ==================

/// Create form routes
pub fn form_routes(registry: Arc<FormRegistry>) -> Router {
    Router::new()
        .route("/", get(list_forms_handler))
        .route("/:name", get(describe_form_handler))
        .route("/:name/validate", post(validate_handler))
        .with_state(registry)
}

async fn list_forms_handler(State(registry): State<Arc<FormRegistry>>) -> Json<FormsListResponse> {
    let forms = registry.describe();
    Json(FormsListResponse {
        total: forms.len(),
        forms,
    })
}

async fn describe_form_handler(
    State(registry): State<Arc<FormRegistry>>,
    Path(name): Path<String>,
) -> ApiResult<Json<FormDescription>> {
    registry
        .get(&name)
        .map(|schema| Json(schema.describe()))
        .ok_or(ApiError::FormNotFound(name))
}

async fn validate_handler(
    State(registry): State<Arc<FormRegistry>>,
    Path(name): Path<String>,
    Json(submission): Json<Value>,
) -> ApiResult<Json<ValidatedResponse>> {
    let schema = registry
        .get(&name)
        .ok_or_else(|| ApiError::FormNotFound(name.clone()))?;

    let data = schema.parse(&submission)?;
    info!(form = %name, "submission accepted");
    Ok(Json(ValidatedResponse { status: "ok", data }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn router() -> Router {
        form_routes(Arc::new(FormRegistry::with_builtin_forms().unwrap()))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_forms() {
        let (status, body) = send(router(), Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], json!(5));
        assert!(body["forms"]
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f["name"] == "contact"));
    }

    #[tokio::test]
    async fn test_validate_login_ok() {
        let (status, body) = send(
            router(),
            post_json(
                "/login/validate",
                json!({"email": " Dev@Example.COM ", "password": "hunter2"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["data"]["email"], "dev@example.com");
    }

    #[tokio::test]
    async fn test_validate_login_invalid() {
        let (status, body) = send(router(), post_json("/login/validate", json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], "invalid");
        let paths: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["email", "password"]);
    }

    #[tokio::test]
    async fn test_unknown_form() {
        let (status, body) = send(router(), post_json("/newsletter/validate", json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn test_describe_form() {
        let (status, body) =
            send(router(), Request::get("/account").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "account");
    }
}
