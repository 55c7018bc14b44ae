//! # Data Table Store
//!
//! Explicit table state with a view recomputed on demand. Nothing is cached:
//! `view()` runs the whole pipeline against the current state every call.

use serde_json::Value;
use tracing::trace;

use super::errors::TableResult;
use super::filter::{ColumnFilter, FilterSet};
use super::pipeline::{apply, check_page_size, Page, TableQuery};
use super::sort::{SortDirection, SortSpec};

/// Rows plus the filter, sort and paging state of one grid
#[derive(Debug, Clone)]
pub struct DataTable {
    rows: Vec<Value>,
    filters: FilterSet,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
    max_page_size: usize,
}

impl DataTable {
    /// Creates a table on page 1 with no filters or sort
    pub fn new(rows: Vec<Value>, page_size: usize, max_page_size: usize) -> TableResult<Self> {
        check_page_size(page_size, max_page_size)?;
        Ok(Self {
            rows,
            filters: FilterSet::new(),
            sort: None,
            page: 1,
            page_size,
            max_page_size,
        })
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replaces the data; back to page 1
    pub fn set_rows(&mut self, rows: Vec<Value>) {
        self.rows = rows;
        self.page = 1;
    }

    /// Replaces all filters; back to page 1
    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
        self.page = 1;
    }

    /// Adds one predicate on a column; back to page 1
    pub fn add_filter(&mut self, column: impl Into<String>, filter: ColumnFilter) {
        self.filters.add(column, filter);
        self.page = 1;
    }

    /// Drops every predicate on a column; back to page 1 if anything changed
    pub fn remove_filter(&mut self, column: &str) {
        if self.filters.remove_column(column) {
            self.page = 1;
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Cycles the sort on `key`: none → asc → desc → none.
    /// A different key starts again at ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = match self.sort.take() {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Asc => Some(SortSpec::desc(key)),
                SortDirection::Desc => None,
            },
            _ => Some(SortSpec::asc(key)),
        };
    }

    /// Moves to `page` (0 is read as 1). Pages past the end show no rows.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Changes the page size; back to page 1
    pub fn set_page_size(&mut self, page_size: usize) -> TableResult<()> {
        check_page_size(page_size, self.max_page_size)?;
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    /// Snapshot of the current state as a query
    pub fn query(&self) -> TableQuery {
        TableQuery {
            filters: self.filters.clone(),
            sort: self.sort.clone(),
            page: self.page,
            page_size: Some(self.page_size),
        }
    }

    /// Recomputes the visible page
    pub fn view(&self) -> Page {
        trace!(
            rows = self.rows.len(),
            page = self.page,
            page_size = self.page_size,
            "recomputing table view"
        );
        apply(
            &self.rows,
            &self.filters,
            self.sort.as_ref(),
            self.page,
            self.page_size,
        )
    }
}
