//! Hash builder selection.
//!
//! Every engine hashes its elements with [`DefaultHashBuilder`]. The concrete
//! builder is chosen at compile time:
//!
//! - `fxhash` feature: [`rustc_hash::FxBuildHasher`]
//! - `ahash` feature (without `fxhash`): [`ahash::RandomState`]
//! - neither: [`std::collections::hash_map::RandomState`]

use std::hash::{BuildHasher, DefaultHasher, Hash, Hasher};

/// The hash builder used by set engines.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// The hash builder used by set engines.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// The hash builder used by set engines.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

pub(crate) fn default_hash_builder() -> DefaultHashBuilder {
    DefaultHashBuilder::default()
}

/// Hashes a collection of elements independently of iteration order.
///
/// Each element is hashed with a fixed-key hasher so that two equal sets
/// built with differently seeded engines produce the same digest.
pub(crate) fn hash_unordered<'a, T, I, H>(elements: I, length: usize, state: &mut H)
where
    T: Hash + 'a,
    I: IntoIterator<Item = &'a T>,
    H: Hasher,
{
    let digest = elements.into_iter().fold(0u64, |accumulator, element| {
        let mut hasher = DefaultHasher::new();
        element.hash(&mut hasher);
        accumulator.wrapping_add(hasher.finish())
    });
    length.hash(state);
    digest.hash(state);
}

static_assertions::assert_impl_all!(DefaultHashBuilder: BuildHasher, Default, Clone, Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn digest(elements: &[i32]) -> u64 {
        let mut hasher = DefaultHasher::new();
        hash_unordered(elements.iter(), elements.len(), &mut hasher);
        hasher.finish()
    }

    #[rstest]
    fn test_hash_unordered_ignores_order() {
        assert_eq!(digest(&[1, 2, 3]), digest(&[3, 1, 2]));
    }

    #[rstest]
    fn test_hash_unordered_distinguishes_contents() {
        assert_ne!(digest(&[1, 2, 3]), digest(&[1, 2, 4]));
    }

    #[rstest]
    fn test_hash_unordered_empty_is_stable() {
        assert_eq!(digest(&[]), digest(&[]));
    }
}
