//! CLI argument definitions using clap
//!
//! Commands:
//! - laneboard init --config <path>
//! - laneboard seed --config <path> --file <clients.json>
//! - laneboard list --config <path> [--status <lane>]
//! - laneboard move --config <path> --id <id> [--status <lane>] [--priority <n>]
//! - laneboard serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// laneboard - a three-lane client board with contiguous priorities
#[derive(Parser, Debug)]
#[command(name = "laneboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new data directory with an empty journal
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./laneboard.json")]
        config: PathBuf,
    },

    /// Append clients from a JSON array; each lands at the end of its lane
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./laneboard.json")]
        config: PathBuf,

        /// JSON file holding an array of {"name", "status", ...}
        #[arg(long)]
        file: PathBuf,
    },

    /// Print the board, or one lane of it
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./laneboard.json")]
        config: PathBuf,

        /// Lane to list: backlog, in-progress or complete
        #[arg(long)]
        status: Option<String>,
    },

    /// Move a client and print the board
    Move {
        /// Path to configuration file
        #[arg(long, default_value = "./laneboard.json")]
        config: PathBuf,

        /// Client id
        #[arg(long)]
        id: String,

        /// Destination lane
        #[arg(long)]
        status: Option<String>,

        /// Destination priority (1 is first)
        #[arg(long)]
        priority: Option<String>,
    },

    /// Serve the HTTP API until ctrl-c or SIGTERM
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./laneboard.json")]
        config: PathBuf,

        /// Overrides http.port from the config file
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_arguments() {
        let cli = Cli::try_parse_from([
            "laneboard", "move", "--id", "4", "--status", "complete", "--priority", "2",
        ])
        .unwrap();

        match cli.command {
            Command::Move {
                config,
                id,
                status,
                priority,
            } => {
                assert_eq!(config, PathBuf::from("./laneboard.json"));
                assert_eq!(id, "4");
                assert_eq!(status.as_deref(), Some("complete"));
                assert_eq!(priority.as_deref(), Some("2"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_seed_requires_file() {
        assert!(Cli::try_parse_from(["laneboard", "seed"]).is_err());
    }
}
