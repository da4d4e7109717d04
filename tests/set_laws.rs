//! Property-based tests for set algebra laws.
//!
//! Each law is written once against the [`Set`] trait and checked for both
//! the locked and the unlocked variant.

use lockset::set::{Set, SyncSet, UnsyncSet};
use proptest::prelude::*;

fn build<S: Set<i32>>(elements: &[i32]) -> S {
    let mut set = S::default();
    for element in elements {
        set.add(*element);
    }
    set
}

fn elements() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50..50i32, 0..30)
}

// =============================================================================
// Commutativity Laws
// Description: A ∪ B = B ∪ A and A ∩ B = B ∩ A
// =============================================================================

fn check_commutativity<S: Set<i32>>(left: &[i32], right: &[i32]) -> Result<(), TestCaseError> {
    let set_a: S = build(left);
    let set_b: S = build(right);

    prop_assert!(set_a.union(&set_b).equal(&set_b.union(&set_a)));
    prop_assert!(set_a.intersect(&set_b).equal(&set_b.intersect(&set_a)));
    prop_assert!(
        set_a
            .symmetric_difference(&set_b)
            .equal(&set_b.symmetric_difference(&set_a))
    );
    Ok(())
}

proptest! {
    #[test]
    fn prop_commutativity_sync(left in elements(), right in elements()) {
        check_commutativity::<SyncSet<i32>>(&left, &right)?;
    }

    #[test]
    fn prop_commutativity_unsync(left in elements(), right in elements()) {
        check_commutativity::<UnsyncSet<i32>>(&left, &right)?;
    }
}

// =============================================================================
// Idempotence Laws
// Description: A ∪ A = A, A ∩ A = A, A - A = ∅
// =============================================================================

fn check_idempotence<S: Set<i32>>(values: &[i32]) -> Result<(), TestCaseError> {
    let set: S = build(values);

    prop_assert!(set.union(&set).equal(&set));
    prop_assert!(set.intersect(&set).equal(&set));
    prop_assert_eq!(set.difference(&set).cardinality(), 0);
    prop_assert_eq!(set.symmetric_difference(&set).cardinality(), 0);
    Ok(())
}

proptest! {
    #[test]
    fn prop_idempotence_sync(values in elements()) {
        check_idempotence::<SyncSet<i32>>(&values)?;
    }

    #[test]
    fn prop_idempotence_unsync(values in elements()) {
        check_idempotence::<UnsyncSet<i32>>(&values)?;
    }
}

// =============================================================================
// Subset Laws
// Description: A ⊆ A ∪ B; proper when |A| < |A ∪ B|; superset mirrors subset
// =============================================================================

fn check_subset<S: Set<i32>>(left: &[i32], right: &[i32]) -> Result<(), TestCaseError> {
    let subset: S = build(left);
    let superset = subset.union(&build(right));

    prop_assert!(subset.is_subset(&superset));
    prop_assert!(superset.is_superset(&subset));
    prop_assert_eq!(
        subset.is_proper_subset(&superset),
        subset.cardinality() < superset.cardinality()
    );
    prop_assert_eq!(
        superset.is_proper_superset(&subset),
        subset.is_proper_subset(&superset)
    );
    Ok(())
}

proptest! {
    #[test]
    fn prop_subset_sync(left in elements(), right in elements()) {
        check_subset::<SyncSet<i32>>(&left, &right)?;
    }

    #[test]
    fn prop_subset_unsync(left in elements(), right in elements()) {
        check_subset::<UnsyncSet<i32>>(&left, &right)?;
    }
}

// =============================================================================
// Partition Law
// Description: |A ∪ B| = |A - B| + |B - A| + |A ∩ B|
// =============================================================================

fn check_partition<S: Set<i32>>(left: &[i32], right: &[i32]) -> Result<(), TestCaseError> {
    let set_a: S = build(left);
    let set_b: S = build(right);

    let union = set_a.union(&set_b).cardinality();
    let parts = set_a.difference(&set_b).cardinality()
        + set_b.difference(&set_a).cardinality()
        + set_a.intersect(&set_b).cardinality();

    prop_assert_eq!(union, parts);
    prop_assert_eq!(
        set_a.symmetric_difference(&set_b).cardinality(),
        union - set_a.intersect(&set_b).cardinality()
    );
    Ok(())
}

proptest! {
    #[test]
    fn prop_partition_sync(left in elements(), right in elements()) {
        check_partition::<SyncSet<i32>>(&left, &right)?;
    }

    #[test]
    fn prop_partition_unsync(left in elements(), right in elements()) {
        check_partition::<UnsyncSet<i32>>(&left, &right)?;
    }
}

// =============================================================================
// Add-Contains and Pop Laws
// =============================================================================

fn check_add_and_pop<S: Set<i32>>(values: &[i32], extra: i32) -> Result<(), TestCaseError> {
    let mut set: S = build(values);
    let was_present = set.contains(&extra);
    let before = set.cardinality();

    prop_assert_eq!(set.add(extra), !was_present);
    prop_assert!(set.contains(&extra));
    prop_assert!(set.contains_all(values));
    prop_assert!(!set.add(extra));

    let size = set.cardinality();
    prop_assert_eq!(size, before + usize::from(!was_present));

    let popped = set.pop();
    prop_assert!(popped.is_some());
    prop_assert_eq!(set.cardinality(), size - 1);
    prop_assert!(!set.contains(&popped.unwrap_or_default()));
    Ok(())
}

proptest! {
    #[test]
    fn prop_add_and_pop_sync(values in elements(), extra in -60..60i32) {
        check_add_and_pop::<SyncSet<i32>>(&values, extra)?;
    }

    #[test]
    fn prop_add_and_pop_unsync(values in elements(), extra in -60..60i32) {
        check_add_and_pop::<UnsyncSet<i32>>(&values, extra)?;
    }
}

// =============================================================================
// Power Set Law
// Description: |P(A)| = 2^|A|, ∅ ∈ P(A), A ∈ P(A)
// =============================================================================

proptest! {
    #[test]
    fn prop_power_set_cardinality(values in prop::collection::vec(0..20i32, 0..8)) {
        let set: SyncSet<i32> = values.iter().copied().collect();
        let power_set = set.power_set();

        prop_assert_eq!(power_set.cardinality(), 1usize << set.cardinality());
        prop_assert!(power_set.contains(&SyncSet::new()));
        prop_assert!(power_set.contains(&set));
    }

    #[test]
    fn prop_power_set_members_are_subsets(values in prop::collection::vec(0..20i32, 0..7)) {
        let set: UnsyncSet<i32> = values.iter().copied().collect();
        let power_set = set.power_set();

        prop_assert_eq!(power_set.cardinality(), 1usize << set.cardinality());
        for subset in &power_set {
            prop_assert!(subset.is_subset(&set));
        }
    }
}

// =============================================================================
// Cartesian Product Law
// Description: |A × B| = |A| * |B|
// =============================================================================

proptest! {
    #[test]
    fn prop_cartesian_product_cardinality(left in elements(), right in elements()) {
        let set_a: SyncSet<i32> = left.into_iter().collect();
        let set_b: SyncSet<i32> = right.into_iter().collect();

        let product = set_a.cartesian_product(&set_b);
        prop_assert_eq!(product.cardinality(), set_a.cardinality() * set_b.cardinality());
    }
}

// =============================================================================
// Clone Law
// Description: a clone is equal but shares no storage
// =============================================================================

fn check_clone<S: Set<i32>>(values: &[i32]) -> Result<(), TestCaseError> {
    let original: S = build(values);
    let mut copy = original.clone();

    prop_assert!(copy.equal(&original));
    copy.add(1_000);
    prop_assert!(!original.contains(&1_000));
    Ok(())
}

proptest! {
    #[test]
    fn prop_clone_sync(values in elements()) {
        check_clone::<SyncSet<i32>>(&values)?;
    }

    #[test]
    fn prop_clone_unsync(values in elements()) {
        check_clone::<UnsyncSet<i32>>(&values)?;
    }
}
