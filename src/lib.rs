//! folio-forms - validation and data table plumbing for a portfolio site
//!
//! - [`schema`]: field constraints, form composition and cross-field refinements
//! - [`fields`]: reusable field factories (email, phone, password, choices)
//! - [`forms`]: the site's forms and a registry over them
//! - [`table`]: filter, sort and paginate JSON records
//! - [`cli`] and [`http_server`]: command-line and HTTP surfaces

pub mod cli;
pub mod fields;
pub mod forms;
pub mod http_server;
pub mod schema;
pub mod table;
