//! Aggregate statistics over a duplicate report.

use serde::Serialize;

use super::groups::KeyGroups;
use super::key::embedded_size;

/// Totals reported in summary mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateSummary {
    /// Number of annexed files in the whole inventory
    pub total_files: usize,
    /// Files belonging to a reported duplicate group
    pub duplicate_files: usize,
    /// Number of reported duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies: duplicate files minus one original per group
    pub wasted_copies: usize,
    /// Bytes held by redundant copies, over groups whose key records a size
    pub reclaimable_bytes: u64,
    /// Reported groups whose key records no size
    pub unknown_size_groups: usize,
}

impl DuplicateSummary {
    /// Compute the summary from the full mapping and its filtered subset.
    ///
    /// # Example
    ///
    /// ```
    /// use annexdupe::inventory::InventoryRecord;
    /// use annexdupe::duplicates::{filter_duplicates, group_by_key, DuplicateSummary};
    ///
    /// let groups = group_by_key(vec![
    ///     InventoryRecord::new("MD5E-s10--a", "x"),
    ///     InventoryRecord::new("MD5E-s10--a", "y"),
    ///     InventoryRecord::new("MD5E-s10--a", "z"),
    ///     InventoryRecord::new("KEY2", "w"),
    /// ]);
    /// let dupes = filter_duplicates(&groups, 2);
    /// let summary = DuplicateSummary::new(&groups, &dupes);
    ///
    /// assert_eq!(summary.total_files, 4);
    /// assert_eq!(summary.duplicate_files, 3);
    /// assert_eq!(summary.duplicate_groups, 1);
    /// assert_eq!(summary.wasted_copies, 2);
    /// assert_eq!(summary.reclaimable_bytes, 20);
    /// ```
    #[must_use]
    pub fn new(all: &KeyGroups, duplicates: &KeyGroups) -> Self {
        let duplicate_files = duplicates.total_files();
        let duplicate_groups = duplicates.len();

        let mut reclaimable_bytes = 0u64;
        let mut unknown_size_groups = 0usize;
        for (key, paths) in duplicates.iter() {
            let copies = paths.len().saturating_sub(1) as u64;
            match embedded_size(key) {
                Some(size) => {
                    reclaimable_bytes =
                        reclaimable_bytes.saturating_add(size.saturating_mul(copies));
                }
                None => unknown_size_groups += 1,
            }
        }

        Self {
            total_files: all.total_files(),
            duplicate_files,
            duplicate_groups,
            wasted_copies: duplicate_files.saturating_sub(duplicate_groups),
            reclaimable_bytes,
            unknown_size_groups,
        }
    }
}
