//! Configuration file handling
//!
//! The configuration file is JSON. Every key is optional; a missing file
//! argument means all defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::table::{TableLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const DEFAULT_LOG_FILTER: &str = "folio_forms=info";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub table: TableConfig,

    /// tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// Paging limits for table queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    MAX_PAGE_SIZE
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl TableConfig {
    pub fn limits(&self) -> TableLimits {
        TableLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            table: TableConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    CliError::config_error(format!(
                        "Failed to read config file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    CliError::config_error(format!("Failed to parse config file: {}", e))
                })?
            }
            None => AppConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.table.max_page_size == 0 {
            return Err(CliError::config_error("table.max_page_size must be at least 1"));
        }

        if self.table.default_page_size == 0
            || self.table.default_page_size > self.table.max_page_size
        {
            return Err(CliError::config_error(format!(
                "table.default_page_size must be between 1 and {}",
                self.table.max_page_size
            )));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host cannot be empty"));
        }

        if self.log_filter.trim().is_empty() {
            return Err(CliError::config_error("log_filter cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_no_path_gives_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.table.max_page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_partial_file() {
        let file = write_config(r#"{"http": {"port": 9100}, "table": {"max_page_size": 20}}"#);
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.http.port, 9100);
        assert_eq!(config.table.max_page_size, 20);
        assert_eq!(config.table.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_default_page_size_over_max_rejected() {
        let file = write_config(r#"{"table": {"default_page_size": 50, "max_page_size": 20}}"#);
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code(), "FOLIO_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("{not json");
        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/folio.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
