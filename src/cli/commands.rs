//! CLI command implementations
//!
//! Every command except `init` boots the same way: load config, check the
//! data directory is initialized, open and replay the journal. One-shot
//! commands then print a single JSON line and exit; `serve` runs until a
//! shutdown signal and syncs the journal on the way out.

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::board::NewClient;
use crate::context::AppContext;
use crate::http_server::{shutdown_signal, HttpServer};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::storage::JournalStore;

use super::args::Command;
use super::config::BoardConfig;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Seed { config, file } => seed(&config, &file),
        Command::List { config, status } => list(&config, status.as_deref()),
        Command::Move {
            config,
            id,
            status,
            priority,
        } => move_client(&config, &id, status, priority),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Initialize a new data directory
///
/// Creates the journal directory and an empty journal. Writes no frames.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let data_dir = config.data_path();

    if JournalStore::exists(data_dir) {
        return Err(CliError::already_initialized());
    }

    let store = JournalStore::open(data_dir)?;
    store.sync()?;

    write_response(&json!({
        "initialized": true,
        "journal": store.path()?.display().to_string(),
    }))
}

/// Append clients from a JSON array file
pub fn seed(config_path: &Path, file: &Path) -> CliResult<()> {
    let context = boot(config_path)?;

    let content = fs::read_to_string(file).map_err(|e| {
        CliError::io_error(format!("Failed to read seed file {}: {}", file.display(), e))
    })?;
    let clients: Vec<NewClient> = serde_json::from_str(&content)?;

    let api = context.api();
    let appended = clients
        .into_iter()
        .map(|client| api.add_client(client))
        .collect::<Result<Vec<_>, _>>()?;

    context.shutdown()?;
    write_response(&appended)
}

/// Print the board, or one lane of it
pub fn list(config_path: &Path, status: Option<&str>) -> CliResult<()> {
    let context = boot(config_path)?;
    let records = context.api().list(status)?;
    write_response(&records)
}

/// Move a client, then print the board
///
/// Goes through the same validation as `PUT /clients/:id`.
pub fn move_client(
    config_path: &Path,
    id: &str,
    status: Option<String>,
    priority: Option<String>,
) -> CliResult<()> {
    let context = boot(config_path)?;

    let mut body = Map::new();
    if let Some(status) = status {
        body.insert("status".to_string(), Value::String(status));
    }
    if let Some(priority) = priority {
        body.insert("priority".to_string(), Value::String(priority));
    }

    let records = context.api().move_client(id, &body)?;
    context.shutdown()?;
    write_response(&records)
}

/// Serve the HTTP API until ctrl-c or SIGTERM
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let context = boot_with(&config)?;
    let server = HttpServer::new(config.http.clone(), context.api());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start(shutdown_signal())
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    context.shutdown()?;
    Ok(())
}

fn load_config(config_path: &Path) -> CliResult<BoardConfig> {
    log_event(Event::BootStart);
    let config = BoardConfig::load(config_path)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("data_dir", config.data_dir.as_str()),
            ("path", config_path.display().to_string().as_str()),
        ],
    );
    Ok(config)
}

fn boot(config_path: &Path) -> CliResult<AppContext> {
    let config = load_config(config_path)?;
    boot_with(&config)
}

fn boot_with(config: &BoardConfig) -> CliResult<AppContext> {
    let data_dir = config.data_path();
    if !JournalStore::exists(data_dir) {
        return Err(CliError::not_initialized());
    }
    Ok(AppContext::open(data_dir)?)
}
