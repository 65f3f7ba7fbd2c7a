//! Inventory of annexed files.
//!
//! This module is the boundary to the content store. An [`InventorySource`]
//! produces raw text lines of the form `<key> <path>`, and [`parse_inventory`]
//! turns them into [`InventoryRecord`]s.
//!
//! Two sources are provided:
//! - [`GitAnnexSource`] runs `git annex find` in a repository
//! - [`ReaderSource`] reads a previously captured inventory (file or stdin)
//!
//! # Example
//!
//! ```
//! use annexdupe::inventory::{parse_inventory, InventorySource, ReaderSource};
//!
//! let source = ReaderSource::from_bytes("sample", "KEY1 a.txt\nKEY1 b.txt\nnoise\n");
//! let lines = source.fetch().unwrap();
//! let (records, stats) = parse_inventory(&lines);
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(stats.malformed_lines, 1);
//! ```

pub mod parse;
pub mod source;

pub use parse::{parse_inventory, parse_line, ParseStats};
pub use source::{GitAnnexSource, ReaderSource, ANNEX_FIND_FORMAT};

use std::process::ExitStatus;

use thiserror::Error;

/// One tracked file instance and its content-identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    /// Content-identity key assigned by the content store
    pub key: String,
    /// Path of the file, relative to the repository root
    pub path: String,
}

impl InventoryRecord {
    /// Create a new inventory record.
    #[must_use]
    pub fn new(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }
}

/// Errors raised while fetching the inventory.
///
/// Any of these is fatal to a run.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The inventory command could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The inventory command ran but exited unsuccessfully.
    #[error("'{command}' exited with {status}{}", format_stderr(.stderr))]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit status reported by the process
        status: ExitStatus,
        /// Captured standard error (trimmed)
        stderr: String,
    },

    /// A captured inventory could not be read.
    #[error("failed to read inventory from {origin}: {source}")]
    Read {
        /// Where the inventory was being read from
        origin: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// A producer of raw inventory lines.
///
/// Implementations return the complete result set or fail outright; partial
/// results are never returned.
pub trait InventorySource {
    /// Human-readable description of where the lines come from.
    fn describe(&self) -> String;

    /// Fetch every inventory line.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] if the inventory cannot be obtained.
    fn fetch(&self) -> Result<Vec<String>, InventoryError>;
}
