//! # Table Pipeline
//!
//! filter → stable sort → paginate over an in-memory list of records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{TableError, TableResult};
use super::filter::FilterSet;
use super::sort::{sort_records, SortSpec};

/// Default page size if not specified
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum page size if not configured
pub const MAX_PAGE_SIZE: usize = 100;

/// Declarative table query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery {
    #[serde(default)]
    pub filters: FilterSet,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,

    /// 1-based page number; 0 is read as 1
    #[serde(default = "default_page")]
    pub page: usize,

    /// Falls back to the caller's default page size when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

fn default_page() -> usize {
    1
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            filters: FilterSet::default(),
            sort: None,
            page: default_page(),
            page_size: None,
        }
    }
}

/// Page size used when a query names none, and the largest one accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLimits {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl TableQuery {
    /// Page size after applying `limits.default_page_size`
    pub fn effective_page_size(&self, limits: TableLimits) -> usize {
        self.page_size.unwrap_or(limits.default_page_size)
    }

    /// Check the effective page size against `limits.max_page_size`
    pub fn validate(&self, limits: TableLimits) -> TableResult<()> {
        check_page_size(self.effective_page_size(limits), limits.max_page_size)
    }

    /// Runs the query over `records`
    pub fn run(&self, records: &[Value], limits: TableLimits) -> TableResult<Page> {
        self.validate(limits)?;
        Ok(apply(
            records,
            &self.filters,
            self.sort.as_ref(),
            self.page,
            self.effective_page_size(limits),
        ))
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub rows: Vec<Value>,
    pub page: usize,
    pub page_size: usize,
    /// Rows remaining after filtering
    pub total_rows: usize,
    pub total_pages: usize,
}

pub(crate) fn check_page_size(page_size: usize, max_page_size: usize) -> TableResult<()> {
    if page_size == 0 {
        return Err(TableError::InvalidPageSize);
    }
    if page_size > max_page_size {
        return Err(TableError::PageSizeExceeded(page_size, max_page_size));
    }
    Ok(())
}

/// Records passing every filter, in input order
pub fn filter_records(records: &[Value], filters: &FilterSet) -> Vec<Value> {
    records
        .iter()
        .filter(|r| filters.matches(r))
        .cloned()
        .collect()
}

/// Slice `(page-1)*page_size .. page*page_size`, clipped to the input
pub fn paginate(records: &[Value], page: usize, page_size: usize) -> &[Value] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(records.len());
    let end = page.saturating_mul(page_size).min(records.len());
    &records[start..end]
}

/// Full pipeline. `page_size` must already be checked.
pub(crate) fn apply(
    records: &[Value],
    filters: &FilterSet,
    sort: Option<&SortSpec>,
    page: usize,
    page_size: usize,
) -> Page {
    let mut rows = filter_records(records, filters);
    if let Some(spec) = sort {
        sort_records(&mut rows, spec);
    }

    let page = page.max(1);
    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(page_size);

    Page {
        rows: paginate(&rows, page, page_size).to_vec(),
        page,
        page_size,
        total_rows,
        total_pages,
    }
}
