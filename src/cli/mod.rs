//! CLI module for folio-forms
//!
//! Provides command-line interface for:
//! - forms: List registered forms
//! - validate: Validate one JSON submission
//! - table: Filter, sort and paginate a JSON rows file
//! - serve: Run the HTTP service

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod logging;

pub use args::{Cli, Command};
pub use commands::{
    build_query, forms, run, run_command, serve, table, validate, Outcome, TableOverrides,
};
pub use config::{AppConfig, TableConfig};
pub use errors::{CliError, CliResult};
pub use io::{invalid_envelope, ok_envelope, read_json, write_invalid, write_response};
pub use logging::init_logging;
