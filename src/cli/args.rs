//! CLI argument definitions using clap
//!
//! Commands:
//! - folio-forms forms
//! - folio-forms validate <form> [--input <path>]
//! - folio-forms table --rows <path> [--query <path>] [--filter ...] [--sort ...]
//! - folio-forms serve

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// folio-forms - form validation and data table tooling for the portfolio site
#[derive(Parser, Debug)]
#[command(name = "folio-forms")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered forms and their fields
    Forms,

    /// Validate a JSON submission against a form
    Validate {
        /// Form name (see `forms`)
        form: String,

        /// Submission file; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Filter, sort and paginate a JSON array of rows
    Table {
        /// JSON file holding an array of objects
        #[arg(long)]
        rows: PathBuf,

        /// JSON file holding a table query
        #[arg(long)]
        query: Option<PathBuf>,

        /// Column filter as column:ACTION[:value] (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Sort as key, key.asc or key.desc
        #[arg(long)]
        sort: Option<String>,

        /// 1-based page number
        #[arg(long)]
        page: Option<usize>,

        /// Rows per page
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Run the HTTP validation service
    Serve,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
