//! # Table Errors
//!
//! Error types for table queries.

use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Table query errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Page size of zero
    #[error("Page size must be at least 1")]
    InvalidPageSize,

    /// Page size above the configured maximum
    #[error("Page size {0} exceeds maximum {1}")]
    PageSizeExceeded(usize, usize),

    /// Filter action name not recognised
    #[error("Unknown filter action: {0}")]
    UnknownFilterAction(String),

    /// Malformed filter expression
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Malformed sort expression
    #[error("Invalid sort: {0}")]
    InvalidSort(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            TableError::PageSizeExceeded(500, 100).to_string(),
            "Page size 500 exceeds maximum 100"
        );
        assert_eq!(
            TableError::UnknownFilterAction("LIKE".into()).to_string(),
            "Unknown filter action: LIKE"
        );
    }
}
