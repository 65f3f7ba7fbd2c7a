//! Key grouping and duplicate filtering.
//!
//! # Overview
//!
//! Every annexed file maps to exactly one content key. Files sharing a key
//! point to identical content, so grouping by key is all it takes to find
//! duplicates:
//!
//! 1. [`group_by_key`] builds an insertion-ordered key → paths mapping
//! 2. [`filter_duplicates`] keeps groups with at least `min_count` paths
//! 3. [`sorted_for_display`] orders the survivors for reporting
//!
//! # Example
//!
//! ```
//! use annexdupe::inventory::InventoryRecord;
//! use annexdupe::duplicates::{filter_duplicates, group_by_key, sorted_for_display};
//!
//! let records = vec![
//!     InventoryRecord::new("KEY1", "b.txt"),
//!     InventoryRecord::new("KEY1", "a.txt"),
//!     InventoryRecord::new("KEY2", "c.txt"),
//! ];
//!
//! let groups = group_by_key(records);
//! assert_eq!(groups.total_files(), 3);
//!
//! let duplicates = filter_duplicates(&groups, 2);
//! assert_eq!(duplicates.len(), 1);
//!
//! let sets = sorted_for_display(&duplicates);
//! assert_eq!(sets[0].key, "KEY1");
//! assert_eq!(sets[0].paths, vec!["a.txt", "b.txt"]);
//! ```

use indexmap::IndexMap;

use super::key::{describe_size, embedded_size};
use crate::inventory::InventoryRecord;

/// Default minimum number of paths for a group to count as duplicated.
pub const DEFAULT_MIN_DUPLICATES: usize = 2;

/// Paths sharing one content key, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyGroups {
    groups: IndexMap<String, Vec<String>>,
}

impl KeyGroups {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record's path to the group of its key.
    pub fn insert(&mut self, record: InventoryRecord) {
        self.groups.entry(record.key).or_default().push(record.path);
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no key has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of all group sizes.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Paths recorded for `key`, in insertion order.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Iterate over `(key, paths)` in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(key, paths)| (key.as_str(), paths.as_slice()))
    }
}

impl FromIterator<InventoryRecord> for KeyGroups {
    fn from_iter<I: IntoIterator<Item = InventoryRecord>>(iter: I) -> Self {
        let mut groups = Self::new();
        for record in iter {
            groups.insert(record);
        }
        groups
    }
}

/// Group inventory records by content key.
///
/// The first occurrence of a key fixes its position; later paths for the
/// same key are appended to that group.
#[must_use]
pub fn group_by_key(records: impl IntoIterator<Item = InventoryRecord>) -> KeyGroups {
    let groups: KeyGroups = records.into_iter().collect();
    log::debug!(
        "Grouped {} file(s) under {} distinct key(s)",
        groups.total_files(),
        groups.len()
    );
    groups
}

/// Keep only groups with at least `min_count` paths.
///
/// The input is left untouched and first-seen order is preserved. A
/// `min_count` of 1 (or 0) keeps every group, so every file is reported as a
/// "duplicate" of itself; the tool's default of 2 keeps true duplicates only.
#[must_use]
pub fn filter_duplicates(groups: &KeyGroups, min_count: usize) -> KeyGroups {
    let filtered = KeyGroups {
        groups: groups
            .groups
            .iter()
            .filter(|(_, paths)| paths.len() >= min_count)
            .map(|(key, paths)| (key.clone(), paths.clone()))
            .collect(),
    };
    log::info!(
        "{} of {} key(s) have at least {} file(s)",
        filtered.len(),
        groups.len(),
        min_count
    );
    filtered
}

/// A duplicate group prepared for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSet<'a> {
    /// 1-based position in the report
    pub index: usize,
    /// Raw content key
    pub key: &'a str,
    /// Paths sorted lexicographically
    pub paths: Vec<&'a str>,
}

impl DuplicateSet<'_> {
    /// Number of paths in this set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this set has no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Redundant copies: every path beyond one retained original.
    #[must_use]
    pub fn redundant_copies(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Content size in bytes, if the key records one.
    #[must_use]
    pub fn size_bytes(&self) -> Option<u64> {
        embedded_size(self.key)
    }

    /// Human-readable content size or `"unknown size"`.
    #[must_use]
    pub fn size_label(&self) -> String {
        describe_size(self.key)
    }
}

/// Order duplicate groups for display.
///
/// Groups are sorted by descending path count; ties keep first-seen key
/// order. Paths within each group are sorted lexicographically. No path is
/// dropped.
#[must_use]
pub fn sorted_for_display(groups: &KeyGroups) -> Vec<DuplicateSet<'_>> {
    let mut entries: Vec<(&str, &[String])> = groups.iter().collect();
    // stable: equal counts stay in first-seen order
    entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (key, paths))| {
            let mut sorted: Vec<&str> = paths.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            DuplicateSet {
                index: i + 1,
                key,
                paths: sorted,
            }
        })
        .collect()
}
