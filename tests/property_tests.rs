use std::collections::HashSet;

use annexdupe::duplicates::{
    describe_size, filter_duplicates, group_by_key, sorted_for_display, DuplicateSummary,
    UNKNOWN_SIZE,
};
use annexdupe::inventory::parse_inventory;
use annexdupe::output::{ReportOptions, TextReport};
use proptest::prelude::*;

fn inventory_line() -> impl Strategy<Value = String> {
    prop_oneof![
        // well-formed, few keys so that groups form
        ("K[0-4]", "[a-z ]{0,12}").prop_map(|(k, p)| format!("{k} {p}")),
        // no separator at all
        "[A-Za-z0-9]{0,10}",
        // blank
        " {0,3}",
    ]
}

fn is_valid_size_label(label: &str) -> bool {
    let Some((number, unit)) = label.split_once(' ') else {
        return false;
    };
    let Some((whole, frac)) = number.split_once('.') else {
        return false;
    };
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && frac.len() == 1
        && frac.bytes().all(|b| b.is_ascii_digit())
        && ["B", "KB", "MB", "GB", "TB"].contains(&unit)
}

proptest! {
    #[test]
    fn test_grouping_completeness(lines in prop::collection::vec(inventory_line(), 0..60)) {
        let (records, stats) = parse_inventory(&lines);
        let parsed: Vec<String> = records.iter().map(|r| r.path.clone()).collect();
        let groups = group_by_key(records.clone());

        let mut grouped: Vec<String> = groups
            .iter()
            .flat_map(|(_, paths)| paths.iter().cloned())
            .collect();
        let mut expected = parsed;
        grouped.sort();
        expected.sort();
        prop_assert_eq!(grouped, expected);
        prop_assert_eq!(groups.total_files(), stats.records);

        // each record lands in the group of its own key
        for record in &records {
            prop_assert!(groups.get(&record.key).unwrap().contains(&record.path));
        }
    }

    #[test]
    fn test_threshold_monotonicity(
        lines in prop::collection::vec(inventory_line(), 0..60),
        m1 in 1usize..6,
        delta in 0usize..4,
    ) {
        let (records, _) = parse_inventory(&lines);
        let groups = group_by_key(records);
        let low = filter_duplicates(&groups, m1);
        let high = filter_duplicates(&groups, m1 + delta);

        let low_keys: HashSet<&str> = low.iter().map(|(k, _)| k).collect();
        for (key, paths) in high.iter() {
            prop_assert!(low_keys.contains(key));
            prop_assert!(paths.len() >= m1 + delta);
        }
    }

    #[test]
    fn test_wasted_copies_identity(
        lines in prop::collection::vec(inventory_line(), 0..60),
        m in 1usize..5,
    ) {
        let (records, _) = parse_inventory(&lines);
        let groups = group_by_key(records);
        let dupes = filter_duplicates(&groups, m);
        let summary = DuplicateSummary::new(&groups, &dupes);

        let expected: usize = dupes.iter().map(|(_, paths)| paths.len() - 1).sum();
        prop_assert_eq!(summary.duplicate_files - summary.duplicate_groups, expected);
        prop_assert_eq!(summary.wasted_copies, expected);
    }

    #[test]
    fn test_decoder_is_total(key in "\\PC*") {
        let label = describe_size(&key);
        prop_assert!(label == UNKNOWN_SIZE || is_valid_size_label(&label), "bad label {}", label);
    }

    #[test]
    fn test_decoder_accepts_structured_keys(size in any::<u64>(), suffix in "[a-f0-9]{0,32}(\\.[a-z]{1,4})?") {
        let label = describe_size(&format!("MD5E-s{size}--{suffix}"));
        prop_assert!(is_valid_size_label(&label), "bad label {}", label);
    }

    #[test]
    fn test_display_order_and_completeness(lines in prop::collection::vec(inventory_line(), 0..60)) {
        let (records, _) = parse_inventory(&lines);
        let groups = group_by_key(records);
        let dupes = filter_duplicates(&groups, 2);
        let sets = sorted_for_display(&dupes);

        prop_assert_eq!(sets.len(), dupes.len());
        for pair in sets.windows(2) {
            prop_assert!(pair[0].len() >= pair[1].len());
        }
        for set in &sets {
            prop_assert!(set.paths.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(set.len(), dupes.get(set.key).unwrap().len());
        }
    }

    #[test]
    fn test_text_report_idempotent(lines in prop::collection::vec(inventory_line(), 0..40), summary in any::<bool>()) {
        let options = ReportOptions { summary_only: summary, ..ReportOptions::default() };
        let render = || {
            let (records, _) = parse_inventory(&lines);
            let groups = group_by_key(records);
            let dupes = filter_duplicates(&groups, 2);
            let mut out = Vec::new();
            TextReport::new(&groups, &dupes, options).write_to(&mut out).unwrap();
            out
        };
        prop_assert_eq!(render(), render());
    }
}
