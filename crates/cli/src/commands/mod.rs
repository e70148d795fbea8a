//! CLI command implementations.
//!
//! Each command builds a report that can be written as text or as JSON.

use std::fmt::Display;
use std::io::Write;

use serde::Serialize;
use thiserror::Error;

pub mod inspect;
pub mod render;
pub mod simulate;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The input could not be read as an amount.
    #[error("Cannot parse amount: {0}")]
    Parse(#[from] amount_field_core::ParseAmountError),

    /// Writing the report failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the report failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Write `report` to `out` in `format`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_report<T: Serialize + Display>(
    out: &mut impl Write,
    format: OutputFormat,
    report: &T,
) -> Result<(), CommandError> {
    match format {
        OutputFormat::Text => writeln!(out, "{report}")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
