//! # Table Module
//!
//! Client-side data grid pipeline over JSON records: column filters,
//! single-key stable sort and 1-based pagination, plus a recompute-on-demand
//! table store.

pub mod errors;
pub mod filter;
pub mod pipeline;
pub mod sort;
pub mod store;

pub use errors::{TableError, TableResult};
pub use filter::{ColumnFilter, FilterAction, FilterSet};
pub use pipeline::{
    filter_records, paginate, Page, TableLimits, TableQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use sort::{compare_cells, sort_records, SortDirection, SortSpec};
pub use store::DataTable;
