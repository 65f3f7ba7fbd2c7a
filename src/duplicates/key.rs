//! Size decoding for git-annex keys.
//!
//! Keys from size-recording backends look like `MD5E-s2048--d41d8cd9.png`:
//! the `-s` field carries the content size in bytes. Decoding is best-effort.
//! Keys following any other convention simply have no known size.

/// Label shown when a key carries no decodable size.
pub const UNKNOWN_SIZE: &str = "unknown size";

const SIZE_MARKER: &str = "-s";
const FIELD_END: &str = "--";
const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Extract the byte size embedded in a key.
///
/// Takes the text after the first `-s` up to the next `--` (or the end of
/// the key when there is none) and parses it as an unsigned integer made
/// only of ASCII digits.
///
/// # Example
///
/// ```
/// use annexdupe::duplicates::embedded_size;
///
/// assert_eq!(embedded_size("MD5E-s2048--abcdef.png"), Some(2048));
/// assert_eq!(embedded_size("WORM-v1--xyz"), None);
/// ```
#[must_use]
pub fn embedded_size(key: &str) -> Option<u64> {
    let (_, rest) = key.split_once(SIZE_MARKER)?;
    let digits = rest.split_once(FIELD_END).map_or(rest, |(digits, _)| digits);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Render a byte count with 1024-based units and one decimal place.
///
/// Scaling stops at the first unit in which the value is below 1024;
/// anything that is still 1024 GB or more is reported in TB.
///
/// # Example
///
/// ```
/// use annexdupe::duplicates::format_size;
///
/// assert_eq!(format_size(512), "512.0 B");
/// assert_eq!(format_size(2048), "2.0 KB");
/// assert_eq!(format_size(1_572_864), "1.5 MB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} TB")
}

/// Human-readable size of a key, or [`UNKNOWN_SIZE`].
///
/// Never fails: any key the decoder does not understand yields the label.
#[must_use]
pub fn describe_size(key: &str) -> String {
    match embedded_size(key) {
        Some(bytes) => format_size(bytes),
        None => {
            log::trace!("No decodable size in key {key:?}");
            UNKNOWN_SIZE.to_string()
        }
    }
}
