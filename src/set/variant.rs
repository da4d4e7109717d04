//! The two set variants and the interface they share.
//!
//! - [`Set`] is a sealed trait implemented by exactly [`UnsyncSet`] and
//!   [`SyncSet`]. Its binary operations take `&Self`, so mixing variants is a
//!   compile error.
//! - [`AnySet`] picks its variant at run time. Its binary operations check
//!   the operand's variant and return [`SetError::VariantMismatch`] when the
//!   two differ.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{OrderedPair, SetError, SyncSet, UnsyncSet};

// =============================================================================
// Variant
// =============================================================================

/// Selects between the locked and the unlocked set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// [`SyncSet`]: every operation takes a reader-writer lock.
    #[default]
    Synchronized,
    /// [`UnsyncSet`]: no locking.
    Unsynchronized,
}

impl fmt::Display for Variant {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synchronized => formatter.write_str("synchronized"),
            Self::Unsynchronized => formatter.write_str("unsynchronized"),
        }
    }
}

// =============================================================================
// Set Trait
// =============================================================================

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for super::UnsyncSet<T> {}
    impl<T> Sealed for super::SyncSet<T> {}
}

/// Operations shared by both set variants.
///
/// This trait is sealed. Code generic over `S: Set<T>` works with either
/// variant, and binary operations only accept an operand of the same variant.
///
/// # Examples
///
/// ```rust
/// use lockset::set::{Set, SyncSet, UnsyncSet};
///
/// fn overlap<S: Set<i32>>(left: &S, right: &S) -> usize {
///     left.intersect(right).cardinality()
/// }
///
/// let locked_a: SyncSet<i32> = [1, 2, 3].into_iter().collect();
/// let locked_b: SyncSet<i32> = [2, 3, 4].into_iter().collect();
/// assert_eq!(overlap(&locked_a, &locked_b), 2);
///
/// let plain_a: UnsyncSet<i32> = [1, 2].into_iter().collect();
/// let plain_b: UnsyncSet<i32> = [5].into_iter().collect();
/// assert_eq!(overlap(&plain_a, &plain_b), 0);
/// ```
pub trait Set<T>: sealed::Sealed + Clone + Default + fmt::Debug {
    /// The variant implementing this trait.
    const VARIANT: Variant;

    /// Inserts an element, returning `true` if it was not already present.
    fn add(&mut self, element: T) -> bool;

    /// Removes an element. Does nothing if it is absent.
    fn remove(&mut self, element: &T);

    /// Removes every element.
    fn clear(&mut self);

    /// Removes and returns an arbitrary element.
    fn pop(&mut self) -> Option<T>;

    /// Returns `true` if the set contains `element`.
    fn contains(&self, element: &T) -> bool;

    /// Returns `true` if the set contains all of `elements`.
    fn contains_all(&self, elements: &[T]) -> bool;

    /// Returns the number of distinct elements.
    fn cardinality(&self) -> usize;

    /// Returns `true` if the set contains no elements.
    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// Returns `true` if every element of `self` is in `other`.
    fn is_subset(&self, other: &Self) -> bool;

    /// Returns `true` if `self` is a subset of `other` and the two differ.
    fn is_proper_subset(&self, other: &Self) -> bool;

    /// Returns `true` if every element of `other` is in `self`.
    fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and the two differ.
    fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    /// Returns a new set with every element of either set.
    #[must_use]
    fn union(&self, other: &Self) -> Self;

    /// Returns a new set with the elements present in both sets.
    #[must_use]
    fn intersect(&self, other: &Self) -> Self;

    /// Returns a new set with the elements of `self` that are not in `other`.
    #[must_use]
    fn difference(&self, other: &Self) -> Self;

    /// Returns a new set with the elements in exactly one of the two sets.
    #[must_use]
    fn symmetric_difference(&self, other: &Self) -> Self;

    /// Returns `true` if both sets hold exactly the same elements.
    fn equal(&self, other: &Self) -> bool;

    /// Returns the elements as a vector in arbitrary order.
    fn to_vec(&self) -> Vec<T>;

    /// Calls `function` on each element until it returns `true`.
    fn each<F: FnMut(&T) -> bool>(&self, function: F);
}

impl<T: Clone + Hash + Eq + fmt::Debug> Set<T> for UnsyncSet<T> {
    const VARIANT: Variant = Variant::Unsynchronized;

    fn add(&mut self, element: T) -> bool {
        Self::add(self, element)
    }

    fn remove(&mut self, element: &T) {
        Self::remove(self, element);
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn pop(&mut self) -> Option<T> {
        Self::pop(self)
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn contains_all(&self, elements: &[T]) -> bool {
        Self::contains_all(self, elements)
    }

    fn cardinality(&self) -> usize {
        Self::cardinality(self)
    }

    fn is_subset(&self, other: &Self) -> bool {
        Self::is_subset(self, other)
    }

    fn is_proper_subset(&self, other: &Self) -> bool {
        Self::is_proper_subset(self, other)
    }

    fn union(&self, other: &Self) -> Self {
        Self::union(self, other)
    }

    fn intersect(&self, other: &Self) -> Self {
        Self::intersect(self, other)
    }

    fn difference(&self, other: &Self) -> Self {
        Self::difference(self, other)
    }

    fn symmetric_difference(&self, other: &Self) -> Self {
        Self::symmetric_difference(self, other)
    }

    fn equal(&self, other: &Self) -> bool {
        Self::equal(self, other)
    }

    fn to_vec(&self) -> Vec<T> {
        Self::to_vec(self)
    }

    fn each<F: FnMut(&T) -> bool>(&self, function: F) {
        Self::each(self, function);
    }
}

impl<T: Clone + Hash + Eq + fmt::Debug> Set<T> for SyncSet<T> {
    const VARIANT: Variant = Variant::Synchronized;

    fn add(&mut self, element: T) -> bool {
        Self::add(self, element)
    }

    fn remove(&mut self, element: &T) {
        Self::remove(self, element);
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn pop(&mut self) -> Option<T> {
        Self::pop(self)
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn contains_all(&self, elements: &[T]) -> bool {
        Self::contains_all(self, elements)
    }

    fn cardinality(&self) -> usize {
        Self::cardinality(self)
    }

    fn is_subset(&self, other: &Self) -> bool {
        Self::is_subset(self, other)
    }

    fn is_proper_subset(&self, other: &Self) -> bool {
        Self::is_proper_subset(self, other)
    }

    fn union(&self, other: &Self) -> Self {
        Self::union(self, other)
    }

    fn intersect(&self, other: &Self) -> Self {
        Self::intersect(self, other)
    }

    fn difference(&self, other: &Self) -> Self {
        Self::difference(self, other)
    }

    fn symmetric_difference(&self, other: &Self) -> Self {
        Self::symmetric_difference(self, other)
    }

    fn equal(&self, other: &Self) -> bool {
        Self::equal(self, other)
    }

    fn to_vec(&self) -> Vec<T> {
        Self::to_vec(self)
    }

    fn each<F: FnMut(&T) -> bool>(&self, function: F) {
        Self::each(self, function);
    }
}

// =============================================================================
// AnySet
// =============================================================================

/// A set whose variant is chosen at run time.
///
/// Single-set operations delegate to the wrapped set. Binary operations
/// return [`SetError::VariantMismatch`] when the operand holds the other
/// variant.
///
/// # Examples
///
/// ```rust
/// use lockset::set::{AnySet, Variant};
///
/// let mut left = AnySet::from_elements(Variant::Unsynchronized, [1, 2]);
/// let right = AnySet::from_elements(Variant::Unsynchronized, [2, 3]);
///
/// assert!(left.add(5));
/// let union = left.union(&right).unwrap();
/// assert_eq!(union.cardinality(), 4);
/// assert_eq!(union.variant(), Variant::Unsynchronized);
/// ```
#[derive(Clone)]
pub enum AnySet<T> {
    /// A locked set.
    Sync(SyncSet<T>),
    /// An unlocked set.
    Unsync(UnsyncSet<T>),
}

/// Two operands of the same variant.
enum Operands<'a, T> {
    Sync(&'a SyncSet<T>, &'a SyncSet<T>),
    Unsync(&'a UnsyncSet<T>, &'a UnsyncSet<T>),
}

impl<T> AnySet<T> {
    /// Creates an empty set of the given variant.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        match variant {
            Variant::Synchronized => Self::Sync(SyncSet::new()),
            Variant::Unsynchronized => Self::Unsync(UnsyncSet::new()),
        }
    }

    /// Returns the variant of the wrapped set.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Sync(_) => Variant::Synchronized,
            Self::Unsync(_) => Variant::Unsynchronized,
        }
    }

    /// Returns the number of distinct elements.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        match self {
            Self::Sync(set) => set.cardinality(),
            Self::Unsync(set) => set.cardinality(),
        }
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        match self {
            Self::Sync(set) => set.clear(),
            Self::Unsync(set) => set.clear(),
        }
    }

    /// Calls `function` on each element until it returns `true`.
    pub fn each<F>(&self, function: F)
    where
        F: FnMut(&T) -> bool,
    {
        match self {
            Self::Sync(set) => set.each(function),
            Self::Unsync(set) => set.each(function),
        }
    }

    fn operands<'a>(&'a self, other: &'a Self) -> Result<Operands<'a, T>, SetError> {
        match (self, other) {
            (Self::Sync(left), Self::Sync(right)) => Ok(Operands::Sync(left, right)),
            (Self::Unsync(left), Self::Unsync(right)) => Ok(Operands::Unsync(left, right)),
            _ => {
                let (expected, found) = (self.variant(), other.variant());
                tracing::debug!(%expected, %found, "set operands have different variants");
                Err(SetError::VariantMismatch { expected, found })
            }
        }
    }
}

impl<T: Hash + Eq> AnySet<T> {
    /// Creates a set of the given variant holding `elements`.
    pub fn from_elements<I>(variant: Variant, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        match variant {
            Variant::Synchronized => Self::Sync(elements.into_iter().collect()),
            Variant::Unsynchronized => Self::Unsync(elements.into_iter().collect()),
        }
    }

    /// Inserts an element, returning `true` if it was not already present.
    pub fn add(&mut self, element: T) -> bool {
        match self {
            Self::Sync(set) => set.add(element),
            Self::Unsync(set) => set.add(element),
        }
    }

    /// Removes an element. Does nothing if it is absent.
    pub fn remove(&mut self, element: &T) {
        match self {
            Self::Sync(set) => set.remove(element),
            Self::Unsync(set) => set.remove(element),
        }
    }

    /// Removes and returns an arbitrary element.
    pub fn pop(&mut self) -> Option<T> {
        match self {
            Self::Sync(set) => set.pop(),
            Self::Unsync(set) => set.pop(),
        }
    }

    /// Returns `true` if the set contains `element`.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        match self {
            Self::Sync(set) => set.contains(element),
            Self::Unsync(set) => set.contains(element),
        }
    }

    /// Returns `true` if the set contains all of `elements`.
    #[must_use]
    pub fn contains_all(&self, elements: &[T]) -> bool {
        match self {
            Self::Sync(set) => set.contains_all(elements),
            Self::Unsync(set) => set.contains_all(elements),
        }
    }

    /// Returns `true` if every element of `self` is in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::VariantMismatch`] if the variants differ.
    pub fn is_subset(&self, other: &Self) -> Result<bool, SetError> {
        Ok(match self.operands(other)? {
            Operands::Sync(left, right) => left.is_subset(right),
            Operands::Unsync(left, right) => left.is_subset(right),
        })
    }

    /// Returns `true` if `self` is a subset of `other` and the two differ.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::VariantMismatch`] if the variants differ.
    pub fn is_proper_subset(&self, other: &Self) -> Result<bool, SetError> {
        Ok(match self.operands(other)? {
            Operands::Sync(left, right) => left.is_proper_subset(right),
            Operands::Unsync(left, right) => left.is_proper_subset(right),
        })
    }

    /// Returns `true` if every element of `other` is in `self`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::VariantMismatch`] if the variants differ.
    pub fn is_superset(&self, other: &Self) -> Result<bool, SetError> {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and the two differ.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::VariantMismatch`] if the variants differ.
    pub fn is_proper_superset(&self, other: &Self) -> Result<bool, SetError> {
        other.is_proper_subset(self)
    }

    /// Returns `true` if both sets hold exactly the same elements.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::VariantMismatch`] if the variants differ.
    pub fn equal(&self, other: &Self) -> Result<bool, SetError> {
        Ok(match self.operands(other)? {
            Operands::Sync(left, right) => left.equal(right),
            Operands::Unsync(left, right) => left.equal(right),
        })
    }
}

impl<T: Clone + Hash + Eq> AnySet<T> {
    /// Returns the elements as a vector in arbitrary order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Self::Sync(set) => set.to_vec(),
            Self::Unsync(set) => set.to_vec(),
        }
    }

    /// Returns a new set with every element of either set.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::VariantMismatch`] if the variants differ.
    pub fn union(&self, other: &Self) -> Result<Self, SetError> {
        Ok(match self.operands(other)? {
            Operands::Sync(left, right) => Self::Sync(left.union(right)),
            Operands::Unsync(left, right) => Self::Unsync(left.union(right)),
        })
    }

    /// Returns a new set with the elements present in both sets.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::VariantMismatch`] if the variants differ.
    pub fn intersect(&self, other: &Self) -> Result<Self, SetError> {
        Ok(match self.operands(other)? {
            Operands::Sync(left, right) => Self::Sync(left.intersect(right)),
            Operands::Unsync(left, right) => Self::Unsync(left.intersect(right)),
        })
    }

    /// Returns a new set with the elements of `self` that are not in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::VariantMismatch`] if the variants differ.
    pub fn difference(&self, other: &Self) -> Result<Self, SetError> {
        Ok(match self.operands(other)? {
            Operands::Sync(left, right) => Self::Sync(left.difference(right)),
            Operands::Unsync(left, right) => Self::Unsync(left.difference(right)),
        })
    }

    /// Returns a new set with the elements in exactly one of the two sets.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::VariantMismatch`] if the variants differ.
    pub fn symmetric_difference(&self, other: &Self) -> Result<Self, SetError> {
        Ok(match self.operands(other)? {
            Operands::Sync(left, right) => Self::Sync(left.symmetric_difference(right)),
            Operands::Unsync(left, right) => Self::Unsync(left.symmetric_difference(right)),
        })
    }

    /// Returns the set of ordered pairs `(a, b)` with `a` from `self` and `b`
    /// from `other`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::VariantMismatch`] if the variants differ.
    pub fn cartesian_product(
        &self,
        other: &Self,
    ) -> Result<AnySet<OrderedPair<T, T>>, SetError> {
        Ok(match self.operands(other)? {
            Operands::Sync(left, right) => AnySet::Sync(left.cartesian_product(right)),
            Operands::Unsync(left, right) => AnySet::Unsync(left.cartesian_product(right)),
        })
    }

    /// Returns the set of all subsets, each of the same variant as `self`.
    #[must_use]
    #[allow(clippy::mutable_key_type)]
    pub fn power_set(&self) -> AnySet<Self> {
        match self {
            Self::Sync(set) => AnySet::Sync(
                set.power_set()
                    .into_unsync()
                    .into_iter()
                    .map(Self::Sync)
                    .collect(),
            ),
            Self::Unsync(set) => {
                AnySet::Unsync(set.power_set().into_iter().map(Self::Unsync).collect())
            }
        }
    }
}

#[cfg(feature = "serde")]
impl<T: Hash + Eq> AnySet<T> {
    /// Encodes the set as a JSON array in arbitrary element order.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Json`] if an element fails to serialize.
    pub fn marshal_json(&self) -> Result<Vec<u8>, SetError>
    where
        T: serde::Serialize,
    {
        match self {
            Self::Sync(set) => set.marshal_json(),
            Self::Unsync(set) => set.marshal_json(),
        }
    }

    /// Replaces the contents of the set with the elements of a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Json`] if `input` is not a JSON array of elements.
    pub fn unmarshal_json(&mut self, input: &[u8]) -> Result<(), SetError>
    where
        T: serde::de::DeserializeOwned,
    {
        match self {
            Self::Sync(set) => set.unmarshal_json(input),
            Self::Unsync(set) => set.unmarshal_json(input),
        }
    }
}

impl<T> Default for AnySet<T> {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

/// Sets of different variants are never equal.
impl<T: Hash + Eq> PartialEq for AnySet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other).unwrap_or(false)
    }
}

impl<T: Hash + Eq> Eq for AnySet<T> {}

impl<T: Hash> Hash for AnySet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variant().hash(state);
        match self {
            Self::Sync(set) => set.hash(state),
            Self::Unsync(set) => set.hash(state),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AnySet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(set) => formatter.debug_tuple("Sync").field(set).finish(),
            Self::Unsync(set) => formatter.debug_tuple("Unsync").field(set).finish(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for AnySet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(set) => fmt::Display::fmt(set, formatter),
            Self::Unsync(set) => fmt::Display::fmt(set, formatter),
        }
    }
}

impl<T> From<SyncSet<T>> for AnySet<T> {
    fn from(set: SyncSet<T>) -> Self {
        Self::Sync(set)
    }
}

impl<T> From<UnsyncSet<T>> for AnySet<T> {
    fn from(set: UnsyncSet<T>) -> Self {
        Self::Unsync(set)
    }
}

// =============================================================================
// Tests
// =============================================================================
