//! Parsing of raw `<key> <path>` inventory lines.

use super::InventoryRecord;

/// Counters collected while parsing an inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines seen, including blank and malformed ones
    pub lines_read: usize,
    /// Empty or whitespace-only lines
    pub blank_lines: usize,
    /// Non-blank lines without a separating space
    pub malformed_lines: usize,
    /// Lines turned into records
    pub records: usize,
}

impl ParseStats {
    /// Describe the skipped lines, or `None` if every line was used.
    #[must_use]
    pub fn skipped_message(&self) -> Option<String> {
        (self.blank_lines > 0 || self.malformed_lines > 0).then(|| {
            format!(
                "Skipped {} blank and {} malformed inventory line(s)",
                self.blank_lines, self.malformed_lines
            )
        })
    }
}

/// Parse a single inventory line.
///
/// The line is split once at the first space; everything after it is the
/// path, spaces included. Returns `None` for blank lines and for lines that
/// contain no space.
///
/// # Example
///
/// ```
/// use annexdupe::inventory::parse_line;
///
/// let record = parse_line("MD5E-s4--abc.txt dir/my file.txt").unwrap();
/// assert_eq!(record.key, "MD5E-s4--abc.txt");
/// assert_eq!(record.path, "dir/my file.txt");
///
/// assert!(parse_line("noSpaceHere").is_none());
/// assert!(parse_line("   ").is_none());
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<InventoryRecord> {
    if line.trim().is_empty() {
        return None;
    }
    let (key, path) = line.split_once(' ')?;
    Some(InventoryRecord::new(key, path))
}

/// Parse every line of an inventory, skipping blank and malformed lines.
///
/// Skipped lines never cause an error; they are only counted in the
/// returned [`ParseStats`].
#[must_use]
pub fn parse_inventory<S: AsRef<str>>(lines: &[S]) -> (Vec<InventoryRecord>, ParseStats) {
    let mut stats = ParseStats::default();
    let mut records = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.as_ref();
        stats.lines_read += 1;

        if line.trim().is_empty() {
            stats.blank_lines += 1;
            continue;
        }

        match parse_line(line) {
            Some(record) => records.push(record),
            None => {
                stats.malformed_lines += 1;
                log::trace!("Skipping malformed inventory line: {line:?}");
            }
        }
    }

    stats.records = records.len();

    if let Some(message) = stats.skipped_message() {
        log::debug!("{message}");
    }
    log::info!(
        "Parsed {} annexed file(s) from {} line(s)",
        stats.records,
        stats.lines_read
    );

    (records, stats)
}
