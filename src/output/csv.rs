//! CSV output formatter for duplicate reports.
//!
//! One row is generated for each path of each duplicate set.
//!
//! # Columns
//!
//! - `group_id`: 1-based position of the set in the report
//! - `key`: content key
//! - `size_bytes`: size decoded from the key (empty when unknown)
//! - `path`: file path, never elided
//!
//! In summary mode a single row of [`DuplicateSummary`] fields is written
//! instead.

use std::io;

use serde::Serialize;

use super::{OutputError, ReportOptions};
use crate::duplicates::{sorted_for_display, DuplicateSummary, KeyGroups};

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group_id: usize,
    key: &'a str,
    size_bytes: Option<u64>,
    path: &'a str,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    all: &'a KeyGroups,
    duplicates: &'a KeyGroups,
    summary_only: bool,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(all: &'a KeyGroups, duplicates: &'a KeyGroups, options: &ReportOptions) -> Self {
        Self {
            all,
            duplicates,
            summary_only: options.summary_only,
        }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), OutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.summary_only {
            csv_writer.serialize(DuplicateSummary::new(self.all, self.duplicates))?;
        } else {
            for set in sorted_for_display(self.duplicates) {
                let size_bytes = set.size_bytes();
                for path in &set.paths {
                    csv_writer.serialize(CsvRow {
                        group_id: set.index,
                        key: set.key,
                        size_bytes,
                        path: *path,
                    })?;
                }
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}
