//! # HTTP Server Module
//!
//! Axum service exposing the form registry and the table pipeline.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /forms` - Registered forms and their fields
//! - `GET /forms/:name` - One form's description
//! - `POST /forms/:name/validate` - Validate a submission (422 on failure)
//! - `POST /table/query` - Filter, sort and paginate caller-supplied rows

pub mod config;
pub mod errors;
pub mod form_routes;
pub mod health_routes;
pub mod server;
pub mod table_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
