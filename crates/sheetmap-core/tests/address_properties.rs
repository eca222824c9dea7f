// Property-based tests for the A1 address codec.
// Override the case count with PROPTEST_CASES=10000.

use proptest::prelude::*;
use sheetmap_core::cell::{column_to_text, parse_range, text_to_column, to_range, CellRange};
use sheetmap_core::MAX_INDEX;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

/// Indices weighted toward the single/double/triple letter boundaries.
fn arb_index() -> impl Strategy<Value = u32> {
    prop_oneof![
        2 => 0u32..=800,
        1 => 16_000u32..=17_000,
        2 => 0u32..=MAX_INDEX,
        1 => (MAX_INDEX - 1000)..=MAX_INDEX,
    ]
}

fn column_order_key(text: &str) -> (usize, String) {
    (text.len(), text.to_string())
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn column_text_round_trips(index in arb_index()) {
        let text = column_to_text(index).unwrap();
        prop_assert_eq!(text_to_column(text.as_str()).unwrap(), index);
    }

    #[test]
    fn column_text_is_monotonic(a in arb_index(), b in arb_index()) {
        prop_assume!(a != b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let lo_text = column_to_text(lo).unwrap();
        let hi_text = column_to_text(hi).unwrap();
        prop_assert!(column_order_key(&lo_text) < column_order_key(&hi_text));
    }

    #[test]
    fn lowercase_column_text_is_accepted(index in arb_index()) {
        let text = column_to_text(index).unwrap().to_ascii_lowercase();
        prop_assert_eq!(text_to_column(text.as_str()).unwrap(), index);
    }

    #[test]
    fn cell_range_text_round_trips(
        r1 in arb_index(),
        c1 in arb_index(),
        r2 in arb_index(),
        c2 in arb_index(),
    ) {
        let text = to_range(Some(r1), Some(c1), Some(r2), Some(c2)).unwrap();
        let parsed = parse_range(&text).unwrap();
        prop_assert_eq!(
            parsed.to_cell_range(),
            Some(CellRange::from_indices(r1, c1, r2, c2))
        );
    }

    #[test]
    fn column_range_text_round_trips(c1 in arb_index(), c2 in arb_index()) {
        let text = to_range(None, Some(c1), None, Some(c2)).unwrap();
        let parsed = parse_range(&text).unwrap();
        prop_assert_eq!(parsed.row1, None);
        prop_assert_eq!(parsed.row2, None);
        let mut columns = [parsed.column1.unwrap(), parsed.column2.unwrap()];
        columns.sort_unstable();
        prop_assert_eq!(columns, [c1.min(c2), c1.max(c2)]);
    }
}

#[test]
fn test_boundary_column() {
    assert_eq!(column_to_text(MAX_INDEX).unwrap(), "FXSHRXX");
    assert_eq!(text_to_column("FXSHRXX").unwrap(), MAX_INDEX);
    assert!(text_to_column("FXSHRXY").unwrap_err().is_out_of_range());
    assert!(text_to_column("AAAAAAAA").unwrap_err().is_out_of_range());
}
