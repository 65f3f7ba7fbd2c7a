//! Output formatters for duplicate reports.
//!
//! This module provides different output formats for the same report:
//! - Text for people (detail or summary mode)
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! All formats share the ordering rules of
//! [`sorted_for_display`](crate::duplicates::sorted_for_display).

pub mod csv;
pub mod json;
pub mod text;

// Re-export main types
pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::text::{TextReport, NO_DUPLICATES_MESSAGE};

use std::io;

use thiserror::Error;

use crate::cli::OutputFormat;
use crate::duplicates::KeyGroups;

/// Default width beyond which text paths are elided.
pub const DEFAULT_PATH_WIDTH: usize = 70;

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Presentation options shared by all formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Print aggregate counts only
    pub summary_only: bool,
    /// Never elide paths in text output
    pub full_paths: bool,
    /// Maximum displayed path length in text output
    pub path_width: usize,
    /// Style headings with ANSI escapes
    pub color: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            summary_only: false,
            full_paths: false,
            path_width: DEFAULT_PATH_WIDTH,
            color: false,
        }
    }
}

/// Write the report for `format` to `writer`.
///
/// # Errors
///
/// Returns [`OutputError`] if writing or serialization fails.
pub fn write_report<W: io::Write>(
    format: OutputFormat,
    all: &KeyGroups,
    duplicates: &KeyGroups,
    options: &ReportOptions,
    writer: W,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Text => TextReport::new(all, duplicates, *options).write_to(writer)?,
        OutputFormat::Json => JsonOutput::new(all, duplicates, options).write_to(writer)?,
        OutputFormat::Csv => CsvOutput::new(all, duplicates, options).write_to(writer)?,
    }
    Ok(())
}
