//! JSON output formatter for duplicate reports.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "index": 1,
//!       "key": "MD5E-s2048--abcdef.png",
//!       "size_bytes": 2048,
//!       "size": "2.0 KB",
//!       "count": 2,
//!       "paths": ["a.png", "b.png"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 3,
//!     "duplicate_files": 2,
//!     "duplicate_groups": 1,
//!     "wasted_copies": 1,
//!     "reclaimable_bytes": 2048,
//!     "unknown_size_groups": 0
//!   }
//! }
//! ```
//!
//! In summary mode the `duplicates` array is omitted. Paths are never
//! elided in JSON.

use std::io::Write;

use serde::Serialize;

use super::{OutputError, ReportOptions};
use crate::duplicates::{sorted_for_display, DuplicateSet, DuplicateSummary, KeyGroups};

/// A single duplicate set in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateSet {
    /// 1-based position in the report
    pub index: usize,
    /// Raw content key
    pub key: String,
    /// Size decoded from the key, if any
    pub size_bytes: Option<u64>,
    /// Human-readable size or "unknown size"
    pub size: String,
    /// Number of paths
    pub count: usize,
    /// Paths, sorted lexicographically
    pub paths: Vec<String>,
}

impl From<&DuplicateSet<'_>> for JsonDuplicateSet {
    fn from(set: &DuplicateSet<'_>) -> Self {
        Self {
            index: set.index,
            key: set.key.to_string(),
            size_bytes: set.size_bytes(),
            size: set.size_label(),
            count: set.len(),
            paths: set.paths.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Duplicate sets in report order (absent in summary mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<Vec<JsonDuplicateSet>>,
    /// Aggregate statistics
    pub summary: DuplicateSummary,
}

impl JsonOutput {
    /// Build the JSON report.
    ///
    /// # Example
    ///
    /// ```
    /// use annexdupe::inventory::InventoryRecord;
    /// use annexdupe::duplicates::{filter_duplicates, group_by_key};
    /// use annexdupe::output::{JsonOutput, ReportOptions};
    ///
    /// let groups = group_by_key(vec![
    ///     InventoryRecord::new("K", "a"),
    ///     InventoryRecord::new("K", "b"),
    /// ]);
    /// let dupes = filter_duplicates(&groups, 2);
    ///
    /// let output = JsonOutput::new(&groups, &dupes, &ReportOptions::default());
    /// assert_eq!(output.duplicates.as_ref().unwrap().len(), 1);
    /// assert_eq!(output.summary.wasted_copies, 1);
    /// ```
    #[must_use]
    pub fn new(all: &KeyGroups, duplicates: &KeyGroups, options: &ReportOptions) -> Self {
        let sets: Option<Vec<JsonDuplicateSet>> = (!options.summary_only).then(|| {
            sorted_for_display(duplicates)
                .iter()
                .map(JsonDuplicateSet::from)
                .collect()
        });
        Self {
            duplicates: sets,
            summary: DuplicateSummary::new(all, duplicates),
        }
    }

    /// Serialize to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] on serialization or I/O failure.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), OutputError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}
