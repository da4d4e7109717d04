#![cfg(feature = "serde")]

//! Integration tests for JSON encoding of sets.
//!
//! Sets encode as JSON arrays in arbitrary order. Decoding replaces the
//! contents of the receiving set and leaves it untouched on malformed input.

use lockset::set::{AnySet, OrderedPair, SetError, SyncSet, UnsyncSet, Variant};
use proptest::prelude::*;
use rstest::rstest;

fn sorted_array(bytes: &[u8]) -> Vec<i64> {
    let mut values: Vec<i64> = serde_json::from_slice(bytes).unwrap();
    values.sort_unstable();
    values
}

// =============================================================================
// SyncSet
// =============================================================================

#[rstest]
fn test_sync_set_marshals_to_array() {
    let set: SyncSet<i64> = [3, 1, 2].into_iter().collect();
    let bytes = set.marshal_json().unwrap();
    assert_eq!(sorted_array(&bytes), vec![1, 2, 3]);
}

#[rstest]
fn test_empty_set_marshals_to_empty_array() {
    let set: SyncSet<i64> = SyncSet::new();
    assert_eq!(set.marshal_json().unwrap(), b"[]");
}

#[rstest]
fn test_sync_set_unmarshal_replaces_contents() {
    let set: SyncSet<i64> = [100, 200].into_iter().collect();
    set.unmarshal_json(b"[1, 2, 2, 3]").unwrap();

    assert_eq!(set.cardinality(), 3);
    assert!(set.contains_all(&[1, 2, 3]));
    assert!(!set.contains(&100));
}

#[rstest]
#[case::truncated(&b"[1, 2"[..])]
#[case::not_an_array(&b"{\"a\": 1}"[..])]
#[case::wrong_element_type(&b"[\"one\"]"[..])]
#[case::empty_input(&b""[..])]
fn test_sync_set_malformed_input_leaves_set_untouched(#[case] input: &[u8]) {
    let set: SyncSet<i64> = [7, 8].into_iter().collect();

    let error = set.unmarshal_json(input).unwrap_err();
    assert!(matches!(error, SetError::Json(_)));
    assert!(error.to_string().starts_with("set JSON encoding failed"));

    assert_eq!(set.cardinality(), 2);
    assert!(set.contains_all(&[7, 8]));
}

#[rstest]
fn test_sync_set_serde_json_roundtrip() {
    let set: SyncSet<String> = ["alpha", "beta"].into_iter().map(String::from).collect();
    let json = serde_json::to_string(&set).unwrap();
    let restored: SyncSet<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(set, restored);
}

#[rstest]
fn test_sync_set_deserialize_collapses_duplicates() {
    let restored: SyncSet<i64> = serde_json::from_str("[5, 5, 5]").unwrap();
    assert_eq!(restored.cardinality(), 1);
}

// =============================================================================
// UnsyncSet
// =============================================================================

#[rstest]
fn test_unsync_set_unmarshal_replaces_contents() {
    let mut set: UnsyncSet<i64> = [9].into_iter().collect();
    set.unmarshal_json(b"[4, 5]").unwrap();
    assert_eq!(set, [4, 5].into_iter().collect::<UnsyncSet<i64>>());
}

#[rstest]
fn test_unsync_set_malformed_input_leaves_set_untouched() {
    let mut set: UnsyncSet<i64> = [9].into_iter().collect();
    assert!(set.unmarshal_json(b"[4,").is_err());
    assert_eq!(set, [9].into_iter().collect::<UnsyncSet<i64>>());
}

#[rstest]
fn test_nested_sets_roundtrip() {
    let set: UnsyncSet<i64> = [1, 2].into_iter().collect();
    let power_set = set.power_set();

    let json = serde_json::to_vec(&power_set).unwrap();
    let restored: UnsyncSet<UnsyncSet<i64>> = serde_json::from_slice(&json).unwrap();
    assert_eq!(power_set, restored);
}

#[rstest]
fn test_ordered_pair_roundtrip() {
    let set_a: UnsyncSet<i64> = [1, 2].into_iter().collect();
    let set_b: UnsyncSet<char> = ['x'].into_iter().collect();
    let product = set_a.cartesian_product(&set_b);

    let json = serde_json::to_string(&product).unwrap();
    let restored: UnsyncSet<OrderedPair<i64, char>> = serde_json::from_str(&json).unwrap();
    assert_eq!(product, restored);
    assert!(restored.contains(&OrderedPair::new(2, 'x')));
}

// =============================================================================
// AnySet
// =============================================================================

#[rstest]
#[case(Variant::Synchronized)]
#[case(Variant::Unsynchronized)]
fn test_any_set_json_keeps_variant(#[case] variant: Variant) {
    let set = AnySet::from_elements(variant, [1_i64, 2, 3]);
    let bytes = set.marshal_json().unwrap();
    assert_eq!(sorted_array(&bytes), vec![1, 2, 3]);

    let mut restored: AnySet<i64> = AnySet::new(variant);
    restored.unmarshal_json(&bytes).unwrap();
    assert_eq!(restored.variant(), variant);
    assert_eq!(restored, set);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_marshal_then_unmarshal_is_equal(values in prop::collection::vec(any::<i64>(), 0..50)) {
        let original: SyncSet<i64> = values.into_iter().collect();
        let bytes = original.marshal_json().unwrap();

        let restored: SyncSet<i64> = SyncSet::new();
        restored.unmarshal_json(&bytes).unwrap();
        prop_assert_eq!(original, restored);
    }

    #[test]
    fn prop_marshal_length_matches_cardinality(values in prop::collection::vec(-100..100i64, 0..50)) {
        let set: UnsyncSet<i64> = values.into_iter().collect();
        let bytes = set.marshal_json().unwrap();
        prop_assert_eq!(sorted_array(&bytes).len(), set.cardinality());
    }
}
