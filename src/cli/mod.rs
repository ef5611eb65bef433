//! CLI module for laneboard
//!
//! Provides command-line interface for:
//! - init: Create the data directory and an empty journal
//! - seed: Append clients from a file
//! - list: One-shot listing
//! - move: One-shot move
//! - serve: HTTP API until shutdown

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, list, move_client, run, run_command, seed, serve};
pub use config::BoardConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
