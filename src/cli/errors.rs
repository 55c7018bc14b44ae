//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::io;

use thiserror::Error;

use crate::schema::SchemaDefinitionError;
use crate::table::TableError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error
    #[error("{0}")]
    Config(String),

    /// I/O error (files, stdin/stdout)
    #[error("{0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A built-in form failed to build
    #[error("Form definition error: {0}")]
    Schema(#[from] SchemaDefinitionError),

    /// Invalid table query
    #[error("{0}")]
    Table(#[from] TableError),

    /// Input parsed as JSON but has the wrong shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested form does not exist
    #[error("Unknown form '{0}'")]
    UnknownForm(String),

    /// HTTP server failed
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "FOLIO_CLI_CONFIG_ERROR",
            Self::Io(_) => "FOLIO_CLI_IO_ERROR",
            Self::Json(_) => "FOLIO_CLI_JSON_ERROR",
            Self::Schema(_) => "FOLIO_CLI_STARTUP_FAILED",
            Self::Table(_) => "FOLIO_CLI_INVALID_QUERY",
            Self::InvalidInput(_) => "FOLIO_CLI_INVALID_INPUT",
            Self::UnknownForm(_) => "FOLIO_CLI_UNKNOWN_FORM",
            Self::Server(_) => "FOLIO_CLI_SERVER_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
