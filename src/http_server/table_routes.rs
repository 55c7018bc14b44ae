//! Table HTTP Routes
//!
//! Stateless filter/sort/paginate over rows supplied by the caller.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::errors::ApiResult;
use crate::table::{Page, TableLimits, TableQuery};

// ==================
// Shared State
// ==================

/// Paging limits shared across handlers
#[derive(Debug, Clone, Copy)]
pub struct TableState {
    pub limits: TableLimits,
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct TableQueryRequest {
    #[serde(default)]
    pub rows: Vec<Value>,
    #[serde(flatten)]
    pub query: TableQuery,
}

// ==================
// Table Routes
// ==================

/// Create table routes
pub fn table_routes(state: TableState) -> Router {
    Router::new()
        .route("/query", post(query_handler))
        .with_state(state)
}

async fn query_handler(
    State(state): State<TableState>,
    Json(request): Json<TableQueryRequest>,
) -> ApiResult<Json<Page>> {
    let page = request
        .query
        .run(&request.rows, state.limits)
        .map_err(|e| {
            warn!(error = %e, "table query rejected");
            e
        })?;
    debug!(
        rows = request.rows.len(),
        matched = page.total_rows,
        page = page.page,
        "table query"
    );
    Ok(Json(page))
}
