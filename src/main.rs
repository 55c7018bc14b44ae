//! folio-forms CLI entry point
//!
//! Exit codes: 0 success, 1 error, 2 submission rejected.

use folio_forms::cli;

fn main() {
    match cli::run() {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
