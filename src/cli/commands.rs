//! CLI command implementations
//!
//! Every command loads configuration, installs logging and builds the
//! form registry before doing any work. A broken built-in form aborts
//! startup.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use super::args::{Cli, Command};
use super::config::AppConfig;
use super::errors::{CliError, CliResult};
use super::io::{read_json, write_invalid, write_response};
use super::logging::init_logging;
use crate::forms::FormRegistry;
use crate::http_server::HttpServer;
use crate::table::{FilterSet, SortSpec, TableQuery};

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command completed
    Ok,
    /// The submission was rejected
    Invalid,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Ok => 0,
            Outcome::Invalid => 2,
        }
    }
}

/// Main entry point for CLI
pub fn run() -> CliResult<Outcome> {
    let cli = Cli::parse_args();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging(&config.log_filter, cli.verbose);
    run_command(cli.command, &config)
}

/// Dispatch a parsed command
pub fn run_command(cmd: Command, config: &AppConfig) -> CliResult<Outcome> {
    let registry = FormRegistry::with_builtin_forms()?;

    match cmd {
        Command::Forms => forms(&registry),
        Command::Validate { form, input } => validate(&registry, &form, input.as_deref()),
        Command::Table {
            rows,
            query,
            filters,
            sort,
            page,
            page_size,
        } => {
            let overrides = TableOverrides {
                filters,
                sort,
                page,
                page_size,
            };
            table(config, &rows, query.as_deref(), overrides)
        }
        Command::Serve => serve(config, registry),
    }
}

/// List registered forms
pub fn forms(registry: &FormRegistry) -> CliResult<Outcome> {
    write_response(&registry.describe())?;
    Ok(Outcome::Ok)
}

/// Validate one submission and print the envelope
pub fn validate(registry: &FormRegistry, form: &str, input: Option<&Path>) -> CliResult<Outcome> {
    let submission = read_json(input)?;
    let result = registry
        .validate(form, &submission)
        .ok_or_else(|| CliError::UnknownForm(form.to_string()))?;

    match result {
        Ok(values) => {
            info!(form, "submission accepted");
            write_response(&values)?;
            Ok(Outcome::Ok)
        }
        Err(errors) => {
            info!(form, issues = errors.len(), "submission rejected");
            write_invalid(&errors)?;
            Ok(Outcome::Invalid)
        }
    }
}

/// Command-line adjustments applied on top of a query file
#[derive(Debug, Default)]
pub struct TableOverrides {
    pub filters: Vec<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Run the table pipeline over a rows file
pub fn table(
    config: &AppConfig,
    rows_path: &Path,
    query_path: Option<&Path>,
    overrides: TableOverrides,
) -> CliResult<Outcome> {
    let rows = load_rows(rows_path)?;
    let query = build_query(config, query_path, overrides)?;
    debug!(rows = rows.len(), ?query, "running table query");

    let page = query.run(&rows, config.table.limits())?;
    write_response(&page)?;
    Ok(Outcome::Ok)
}

fn load_rows(path: &Path) -> CliResult<Vec<Value>> {
    match read_json(Some(path))? {
        Value::Array(rows) => Ok(rows),
        other => Err(CliError::InvalidInput(format!(
            "rows file must hold a JSON array, found {}",
            json_type(&other)
        ))),
    }
}

/// Merge the optional query file with flag overrides. Flag filters are
/// ANDed onto the file's filters; the other flags replace. A query without a
/// page size gets `table.default_page_size`.
pub fn build_query(
    config: &AppConfig,
    query_path: Option<&Path>,
    overrides: TableOverrides,
) -> CliResult<TableQuery> {
    let mut query = match query_path {
        Some(path) => serde_json::from_value(read_json(Some(path))?)?,
        None => TableQuery::default(),
    };

    for expr in &overrides.filters {
        let (column, filter) = FilterSet::parse_entry(expr)?;
        query.filters.add(column, filter);
    }
    if let Some(sort) = overrides.sort {
        query.sort = Some(SortSpec::parse(&sort)?);
    }
    if let Some(page) = overrides.page {
        query.page = page;
    }
    if let Some(page_size) = overrides.page_size {
        query.page_size = Some(page_size);
    }
    if query.page_size.is_none() {
        query.page_size = Some(config.table.default_page_size);
    }

    Ok(query)
}

/// Run the HTTP service until interrupted
pub fn serve(config: &AppConfig, registry: FormRegistry) -> CliResult<Outcome> {
    let server = HttpServer::with_config(
        config.http.clone(),
        Arc::new(registry),
        config.table.limits(),
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::Server(e.to_string()))?;

    Ok(Outcome::Ok)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
