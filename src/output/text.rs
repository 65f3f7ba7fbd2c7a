//! Human-readable text report.
//!
//! Two modes are supported:
//! - **Detail** lists every duplicate set with its key, decoded size, copy
//!   count and paths
//! - **Summary** prints aggregate counts only
//!
//! # Example
//!
//! ```
//! use annexdupe::inventory::InventoryRecord;
//! use annexdupe::duplicates::{filter_duplicates, group_by_key};
//! use annexdupe::output::{ReportOptions, TextReport};
//!
//! let groups = group_by_key(vec![
//!     InventoryRecord::new("MD5E-s2048--abcdef.png", "b.png"),
//!     InventoryRecord::new("MD5E-s2048--abcdef.png", "a.png"),
//! ]);
//! let dupes = filter_duplicates(&groups, 2);
//!
//! let mut out = Vec::new();
//! TextReport::new(&groups, &dupes, ReportOptions::default())
//!     .write_to(&mut out)
//!     .unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("1. Duplicate set (Key: MD5E-s2048--abcdef.png)"));
//! assert!(text.contains("   Size: 2.0 KB"));
//! ```

use std::borrow::Cow;
use std::io::{self, Write};

use yansi::Paint;

use super::ReportOptions;
use crate::duplicates::{format_size, sorted_for_display, DuplicateSummary, KeyGroups};

/// Message printed when no group meets the threshold.
pub const NO_DUPLICATES_MESSAGE: &str = "No duplicate annexed files found!";

const RULE_WIDTH: usize = 60;
const ELLIPSIS: &str = "...";

/// Text report over a grouped inventory.
pub struct TextReport<'a> {
    all: &'a KeyGroups,
    duplicates: &'a KeyGroups,
    options: ReportOptions,
}

impl<'a> TextReport<'a> {
    /// Create a report from the full mapping and its filtered duplicates.
    #[must_use]
    pub fn new(all: &'a KeyGroups, duplicates: &'a KeyGroups, options: ReportOptions) -> Self {
        Self {
            all,
            duplicates,
            options,
        }
    }

    /// Write the report in the configured mode.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.options.summary_only {
            self.write_summary(&mut writer)
        } else {
            self.write_detail(&mut writer)
        }
    }

    fn write_summary<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let summary = DuplicateSummary::new(self.all, self.duplicates);

        writeln!(w, "{}", self.heading("Summary:"))?;
        writeln!(w, "Total annexed files: {}", summary.total_files)?;
        writeln!(w, "Files that are duplicates: {}", summary.duplicate_files)?;
        writeln!(w, "Duplicate groups: {}", summary.duplicate_groups)?;
        writeln!(
            w,
            "Space potentially wasted: {} file copies",
            summary.wasted_copies
        )?;
        writeln!(
            w,
            "Reclaimable space (known sizes): {}",
            format_size(summary.reclaimable_bytes)
        )?;
        if summary.unknown_size_groups > 0 {
            writeln!(w, "Groups with unknown size: {}", summary.unknown_size_groups)?;
        }
        Ok(())
    }

    fn write_detail<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if self.duplicates.is_empty() {
            writeln!(w, "{NO_DUPLICATES_MESSAGE}")?;
            return Ok(());
        }

        let header = format!("Found {} sets of duplicate files:", self.duplicates.len());
        writeln!(w, "{}", self.heading(&header))?;
        writeln!(w, "{}", "=".repeat(RULE_WIDTH))?;

        for set in sorted_for_display(self.duplicates) {
            let title = format!("{}. Duplicate set (Key: {})", set.index, set.key);
            writeln!(w)?;
            writeln!(w, "{}", self.heading(&title))?;
            writeln!(w, "   Size: {}", set.size_label())?;
            writeln!(w, "   {} copies:", set.len())?;
            for path in &set.paths {
                writeln!(w, "     {}", self.display_path(path))?;
            }
        }
        Ok(())
    }

    fn heading(&self, text: &str) -> String {
        if self.options.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn display_path<'p>(&self, path: &'p str) -> Cow<'p, str> {
        if self.options.full_paths {
            Cow::Borrowed(path)
        } else {
            elide_path(path, self.options.path_width)
        }
    }
}

/// Shorten `path` to at most `width` characters by keeping its tail.
///
/// A path longer than `width` becomes `...` followed by its last
/// `width - 3` characters. Widths of 3 or less disable elision.
///
/// # Example
///
/// ```
/// use annexdupe::output::text::elide_path;
///
/// let long = "a".repeat(80);
/// let shown = elide_path(&long, 70);
/// assert_eq!(shown.chars().count(), 70);
/// assert!(shown.starts_with("..."));
///
/// assert_eq!(elide_path("short.txt", 70), "short.txt");
/// ```
#[must_use]
pub fn elide_path(path: &str, width: usize) -> Cow<'_, str> {
    let keep = width.saturating_sub(ELLIPSIS.len());
    let len = path.chars().count();
    if keep == 0 || len <= width {
        return Cow::Borrowed(path);
    }

    let start = path
        .char_indices()
        .nth(len - keep)
        .map_or(path.len(), |(idx, _)| idx);
    Cow::Owned(format!("{ELLIPSIS}{}", &path[start..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::{filter_duplicates, group_by_key};
    use crate::inventory::InventoryRecord;

    fn render(records: Vec<InventoryRecord>, min: usize, options: ReportOptions) -> String {
        let groups = group_by_key(records);
        let dupes = filter_duplicates(&groups, min);
        let mut out = Vec::new();
        TextReport::new(&groups, &dupes, options)
            .write_to(&mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_detail_report_layout() {
        let text = render(
            vec![
                InventoryRecord::new("KEY1", "b.txt"),
                InventoryRecord::new("KEY1", "a.txt"),
                InventoryRecord::new("KEY2", "c.txt"),
            ],
            2,
            ReportOptions::default(),
        );

        let expected = "\
Found 1 sets of duplicate files:
============================================================

1. Duplicate set (Key: KEY1)
   Size: unknown size
   2 copies:
     a.txt
     b.txt
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_detail_report_no_duplicates() {
        let text = render(
            vec![
                InventoryRecord::new("KEY1", "a.txt"),
                InventoryRecord::new("KEY2", "b.txt"),
            ],
            2,
            ReportOptions::default(),
        );
        assert_eq!(text, format!("{NO_DUPLICATES_MESSAGE}\n"));
    }

    #[test]
    fn test_summary_report() {
        let options = ReportOptions {
            summary_only: true,
            ..ReportOptions::default()
        };
        let text = render(
            vec![
                InventoryRecord::new("MD5E-s1024--x", "a"),
                InventoryRecord::new("MD5E-s1024--x", "b"),
                InventoryRecord::new("MD5E-s1024--x", "c"),
                InventoryRecord::new("KEY2", "d"),
            ],
            2,
            options,
        );

        let expected = "\
Summary:
Total annexed files: 4
Files that are duplicates: 3
Duplicate groups: 1
Space potentially wasted: 2 file copies
Reclaimable space (known sizes): 2.0 KB
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_summary_report_ignores_detail_even_without_duplicates() {
        let options = ReportOptions {
            summary_only: true,
            ..ReportOptions::default()
        };
        let text = render(vec![InventoryRecord::new("K", "a")], 2, options);
        assert!(!text.contains(NO_DUPLICATES_MESSAGE));
        assert!(text.contains("Files that are duplicates: 0"));
        assert!(text.contains("Space potentially wasted: 0 file copies"));
    }

    #[test]
    fn test_long_paths_elided_unless_full() {
        let long = format!("{}/tail.txt", "d".repeat(100));
        let records = vec![
            InventoryRecord::new("K", long.as_str()),
            InventoryRecord::new("K", "short.txt"),
        ];

        let text = render(records.clone(), 2, ReportOptions::default());
        let expected_tail = &long[long.len() - 67..];
        assert!(text.contains(&format!("     ...{expected_tail}\n")));
        assert!(!text.contains(&long));
        assert!(text.contains("     short.txt\n"));

        let options = ReportOptions {
            full_paths: true,
            ..ReportOptions::default()
        };
        let text = render(records, 2, options);
        assert!(text.contains(&format!("     {long}\n")));
    }

    #[test]
    fn test_elide_path_boundary() {
        let exactly = "x".repeat(70);
        assert_eq!(elide_path(&exactly, 70), exactly.as_str());

        let over = "x".repeat(71);
        let shown = elide_path(&over, 70);
        assert_eq!(shown, format!("...{}", "x".repeat(67)));
    }

    #[test]
    fn test_elide_path_multibyte() {
        let path = "é".repeat(80);
        let shown = elide_path(&path, 70);
        assert_eq!(shown.chars().count(), 70);
        assert!(shown.ends_with('é'));
    }

    #[test]
    fn test_elide_path_tiny_width_disables() {
        assert_eq!(elide_path("abcdef", 3), "abcdef");
        assert_eq!(elide_path("abcdef", 0), "abcdef");
    }

    #[test]
    fn test_color_wraps_headings_only() {
        let options = ReportOptions {
            color: true,
            ..ReportOptions::default()
        };
        let text = render(
            vec![InventoryRecord::new("K", "a"), InventoryRecord::new("K", "b")],
            2,
            options,
        );
        assert!(text.contains('\u{1b}'));
        assert!(text.contains("     a\n"));
    }
}
