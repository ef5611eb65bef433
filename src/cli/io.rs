//! JSON output for the CLI
//!
//! One JSON object per line on stdout, wrapped in a `status` envelope.
//! UTF-8 only.

use std::io::{self, Write};

use serde::Serialize;

use crate::api::{ErrorResponse, SuccessResponse};

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let response = SuccessResponse::new(serde_json::to_value(data)?);
    write_line(&response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_line(&ErrorResponse::new(code, message))
}

fn write_line<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
