//! Service Settings
//!
//! Where the re-validation service listens and which front-end origins may
//! call it. Read from the `http` section of the app config file.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Bind address and browser origins for the form service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Loopback unless deployed behind a proxy
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins of the portfolio front end. An empty list lets any origin in.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

/// Next.js and Vite dev servers
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` as written in the config
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.socket_addr(), e),
            )
        })
    }

    /// Configured origins that parse as header values; bad entries are skipped
    pub fn allowed_origins(&self) -> Vec<HeaderValue> {
        self.cors_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "ignoring unusable CORS origin");
                    None
                }
            })
            .collect()
    }

    /// Any method and header, from the listed origins or from anywhere when
    /// none are listed
    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        if self.cors_origins.is_empty() {
            layer.allow_origin(Any)
        } else {
            layer.allow_origin(AllowOrigin::list(self.allowed_origins()))
        }
    }
}
