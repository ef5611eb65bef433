//! laneboard CLI entry point
//!
//! Parses arguments and dispatches to the CLI module. Any error is printed
//! as an error envelope on stdout and a plain line on stderr, and the
//! process exits non-zero.

use laneboard::cli;

fn main() {
    if let Err(e) = cli::run() {
        let _ = cli::write_error(e.code_str(), e.message());
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
