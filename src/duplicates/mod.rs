//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping annexed files by content key
//! - Filtering groups by a minimum duplicate count
//! - Decoding the content size embedded in a key
//! - Summary statistics over the reported groups

pub mod groups;
pub mod key;
pub mod summary;

pub use groups::{
    filter_duplicates, group_by_key, sorted_for_display, DuplicateSet, KeyGroups,
    DEFAULT_MIN_DUPLICATES,
};
pub use key::{describe_size, embedded_size, format_size, UNKNOWN_SIZE};
pub use summary::DuplicateSummary;
