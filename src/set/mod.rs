//! Hash sets with the full set algebra.
//!
//! This module provides two variants of the same set:
//!
//! - [`UnsyncSet`]: a hash set with no internal locking
//! - [`SyncSet`]: an [`UnsyncSet`] behind a reader-writer lock, safe to share
//!   between threads
//!
//! Both variants implement the sealed [`Set`] trait. [`AnySet`] chooses its
//! variant at run time and reports operand mismatches as
//! [`SetError::VariantMismatch`].
//!
//! # Examples
//!
//! ## `SyncSet`
//!
//! ```rust
//! use lockset::set::SyncSet;
//!
//! let set_a: SyncSet<i32> = [1, 2].into_iter().collect();
//! let set_b: SyncSet<i32> = [2, 3].into_iter().collect();
//!
//! let set_of = |elements: &[i32]| elements.iter().copied().collect::<SyncSet<i32>>();
//!
//! assert_eq!(set_a.union(&set_b), set_of(&[1, 2, 3]));
//! assert_eq!(set_a.intersect(&set_b), set_of(&[2]));
//! assert_eq!(set_a.difference(&set_b), set_of(&[1]));
//! assert_eq!(set_a.symmetric_difference(&set_b), set_of(&[1, 3]));
//! ```
//!
//! ## Factory functions
//!
//! ```rust
//! use lockset::set::{new_set_from, new_unsync_set};
//!
//! let locked = new_set_from([1, 2, 3]);
//! assert!(locked.contains(&2));
//!
//! let mut plain = new_unsync_set();
//! plain.add("a");
//! assert_eq!(format!("{plain}"), "Set{a}");
//! ```

use std::hash::Hash;

mod error;
mod hash;
pub mod iter;
mod pair;
mod sync;
mod unsync;
mod variant;

pub use error::SetError;
pub use hash::DefaultHashBuilder;
pub use iter::{Iter, SetIterator};
pub use pair::OrderedPair;
pub use sync::SyncSet;
pub use unsync::{UnsyncSet, UnsyncSetIntoIterator, UnsyncSetIterator};
pub use variant::{AnySet, Set, Variant};

/// Creates an empty thread-safe set.
#[must_use]
pub fn new_set<T>() -> SyncSet<T> {
    SyncSet::new()
}

/// Creates a thread-safe set holding `elements`.
pub fn new_set_from<T, I>(elements: I) -> SyncSet<T>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    elements.into_iter().collect()
}

/// Creates an empty set with no internal locking.
#[must_use]
pub fn new_unsync_set<T>() -> UnsyncSet<T> {
    UnsyncSet::new()
}

/// Creates a set with no internal locking holding `elements`.
pub fn new_unsync_set_from<T, I>(elements: I) -> UnsyncSet<T>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    elements.into_iter().collect()
}

#[cfg(test)]
mod factory_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_factories_build_expected_variants() {
        let locked: SyncSet<i32> = new_set();
        let plain: UnsyncSet<i32> = new_unsync_set();
        assert!(locked.is_empty());
        assert!(plain.is_empty());

        assert_eq!(new_set_from([1, 1, 2]).cardinality(), 2);
        assert_eq!(new_unsync_set_from([1, 1, 2]).cardinality(), 2);
    }
}
