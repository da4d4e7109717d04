//! Unsynchronized hash set.
//!
//! This module provides [`UnsyncSet`], the engine behind every set in this
//! crate. It stores elements as keys of a `HashMap<T, ()>` and implements the
//! whole set algebra without any locking. [`SyncSet`](super::SyncSet) wraps
//! one engine behind a reader-writer lock and delegates to it.
//!
//! Binary operations never modify either operand; they build and return a
//! new set.
//!
//! # Examples
//!
//! ```rust
//! use lockset::set::UnsyncSet;
//!
//! let mut set = UnsyncSet::new();
//! assert!(set.add(1));
//! assert!(set.add(2));
//! assert!(!set.add(2));
//!
//! assert_eq!(set.cardinality(), 2);
//! assert!(set.contains(&1));
//! ```
//!
//! # Set Operations
//!
//! ```rust
//! use lockset::set::UnsyncSet;
//!
//! let set_a: UnsyncSet<i32> = [1, 2, 3].into_iter().collect();
//! let set_b: UnsyncSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! assert_eq!(set_a.union(&set_b).cardinality(), 4);         // {1, 2, 3, 4}
//! assert_eq!(set_a.intersect(&set_b).cardinality(), 2);     // {2, 3}
//! assert_eq!(set_a.difference(&set_b).cardinality(), 1);    // {1}
//! assert_eq!(set_a.symmetric_difference(&set_b).cardinality(), 2); // {1, 4}
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use super::OrderedPair;
use super::hash::{DefaultHashBuilder, default_hash_builder, hash_unordered};

// =============================================================================
// UnsyncSet Definition
// =============================================================================

/// A hash set with no internal synchronization.
///
/// # Time Complexity
///
/// | Operation              | Complexity        |
/// |------------------------|-------------------|
/// | `add`                  | O(1) amortized    |
/// | `remove`               | O(1)              |
/// | `contains`             | O(1)              |
/// | `cardinality`          | O(1)              |
/// | `union`                | O(n + m)          |
/// | `intersect`            | O(min(n, m))      |
/// | `difference`           | O(n)              |
/// | `symmetric_difference` | O(n + m)          |
/// | `is_subset`            | O(n)              |
/// | `cartesian_product`    | O(n * m)          |
/// | `power_set`            | O(n * 2^n)        |
///
/// # Examples
///
/// ```rust
/// use lockset::set::UnsyncSet;
///
/// let set = UnsyncSet::from_iter([1, 2, 3]);
/// assert_eq!(format!("{}", UnsyncSet::<i32>::new()), "Set{}");
/// assert_eq!(set.cardinality(), 3);
/// ```
#[derive(Clone)]
pub struct UnsyncSet<T> {
    elements: HashMap<T, (), DefaultHashBuilder>,
}

impl<T> UnsyncSet<T> {
    /// Creates a new empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::UnsyncSet;
    ///
    /// let set: UnsyncSet<i32> = UnsyncSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: HashMap::with_hasher(default_hash_builder()),
        }
    }

    /// Creates a new empty set with room for at least `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: HashMap::with_capacity_and_hasher(capacity, default_hash_builder()),
        }
    }

    /// Returns the number of distinct elements in the set.
    #[inline]
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Removes every element.
    ///
    /// The backing storage is replaced with a fresh, empty one.
    pub fn clear(&mut self) {
        self.elements = HashMap::with_hasher(default_hash_builder());
    }

    /// Returns an iterator over the elements in arbitrary order.
    #[must_use]
    pub fn iter(&self) -> UnsyncSetIterator<'_, T> {
        UnsyncSetIterator {
            inner: self.elements.keys(),
        }
    }

    /// Calls `function` on each element until it returns `true`.
    ///
    /// The return value of `function` answers "stop now?".
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::UnsyncSet;
    ///
    /// let set: UnsyncSet<i32> = (1..=10).collect();
    /// let mut visited = 0;
    /// set.each(|_| {
    ///     visited += 1;
    ///     visited == 3
    /// });
    /// assert_eq!(visited, 3);
    /// ```
    pub fn each<F>(&self, mut function: F)
    where
        F: FnMut(&T) -> bool,
    {
        for element in self.elements.keys() {
            if function(element) {
                break;
            }
        }
    }
}

impl<T: Hash + Eq> UnsyncSet<T> {
    /// Inserts an element.
    ///
    /// Returns `true` if the element was not already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::UnsyncSet;
    ///
    /// let mut set: UnsyncSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert!(set.add(4));
    /// assert!(!set.add(4));
    /// assert_eq!(set.cardinality(), 4);
    /// ```
    pub fn add(&mut self, element: T) -> bool {
        self.elements.insert(element, ()).is_none()
    }

    /// Removes an element. Does nothing if it is absent.
    pub fn remove<Q>(&mut self, element: &Q)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.elements.remove(element);
    }

    /// Removes and returns an arbitrary element, or `None` if the set is empty.
    ///
    /// Which element is returned is unspecified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::UnsyncSet;
    ///
    /// let mut set: UnsyncSet<i32> = [7].into_iter().collect();
    /// assert_eq!(set.pop(), Some(7));
    /// assert_eq!(set.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        // A dropped `ExtractIf` retains everything it has not yielded.
        self.elements
            .extract_if(|_, _| true)
            .next()
            .map(|(element, ())| element)
    }

    /// Returns `true` if the set contains `element`.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.elements.contains_key(element)
    }

    /// Returns `true` if the set contains every one of `elements`.
    ///
    /// Vacuously `true` when `elements` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::UnsyncSet;
    ///
    /// let set: UnsyncSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert!(set.contains_all(&[1, 3]));
    /// assert!(!set.contains_all(&[1, 4]));
    ///
    /// let none: [i32; 0] = [];
    /// assert!(set.contains_all(&none));
    /// ```
    #[must_use]
    pub fn contains_all<'a, Q, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        elements
            .into_iter()
            .all(|element| self.elements.contains_key(element))
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        if self.cardinality() > other.cardinality() {
            return false;
        }
        self.iter().all(|element| other.contains(element))
    }

    /// Returns `true` if `self` is a subset of `other` and the two differ.
    #[must_use]
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.cardinality() != other.cardinality() && self.is_subset(other)
    }

    /// Returns `true` if every element of `other` is in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and the two differ.
    #[must_use]
    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    /// Returns `true` if both sets hold exactly the same elements.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self.cardinality() == other.cardinality() && self.is_subset(other)
    }
}

impl<T: Clone + Hash + Eq> UnsyncSet<T> {
    /// Returns the elements as a vector in arbitrary order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.keys().cloned().collect()
    }

    /// Returns a new set with every element of either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = Self::with_capacity(self.cardinality().max(other.cardinality()));
        result.extend(self.iter().cloned());
        result.extend(other.iter().cloned());
        result
    }

    /// Returns a new set with the elements present in both sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        // Iterate over the smaller set
        let (smaller, larger) = if self.cardinality() <= other.cardinality() {
            (self, other)
        } else {
            (other, self)
        };

        smaller
            .iter()
            .filter(|element| larger.contains(*element))
            .cloned()
            .collect()
    }

    /// Returns a new set with the elements of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.iter()
            .filter(|element| !other.contains(*element))
            .cloned()
            .collect()
    }

    /// Returns a new set with the elements in exactly one of the two sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut result = self.difference(other);
        result.extend(
            other
                .iter()
                .filter(|element| !self.contains(*element))
                .cloned(),
        );
        result
    }

    /// Returns the set of every ordered pair `(a, b)` with `a` from `self`
    /// and `b` from `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::{OrderedPair, UnsyncSet};
    ///
    /// let left: UnsyncSet<i32> = [1, 2].into_iter().collect();
    /// let right: UnsyncSet<char> = ['x', 'y', 'z'].into_iter().collect();
    ///
    /// let product = left.cartesian_product(&right);
    /// assert_eq!(product.cardinality(), 6);
    /// assert!(product.contains(&OrderedPair::new(2, 'y')));
    /// ```
    #[must_use]
    pub fn cartesian_product<U>(&self, other: &UnsyncSet<U>) -> UnsyncSet<OrderedPair<T, U>>
    where
        U: Clone + Hash + Eq,
    {
        let mut product = UnsyncSet::with_capacity(self.cardinality() * other.cardinality());
        for first in self {
            for second in other {
                product.add(OrderedPair::new(first.clone(), second.clone()));
            }
        }
        product
    }

    /// Returns the set of all subsets of `self`.
    ///
    /// The result has `2^n` members, including the empty set and a copy of
    /// `self`. Each member is an independent set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::UnsyncSet;
    ///
    /// let set: UnsyncSet<i32> = [1, 2, 3].into_iter().collect();
    /// let power_set = set.power_set();
    ///
    /// assert_eq!(power_set.cardinality(), 8);
    /// assert!(power_set.contains(&UnsyncSet::<i32>::new()));
    /// assert!(power_set.contains(&set));
    /// ```
    #[must_use]
    pub fn power_set(&self) -> UnsyncSet<Self> {
        let mut subsets = Vec::with_capacity(1 << self.cardinality().min(16));
        subsets.push(Self::new());

        for element in self {
            let extended: Vec<Self> = subsets
                .iter()
                .map(|subset| {
                    let mut subset = subset.clone();
                    subset.add(element.clone());
                    subset
                })
                .collect();
            subsets.extend(extended);
        }

        subsets.into_iter().collect()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// A borrowing iterator over the elements of an [`UnsyncSet`].
pub struct UnsyncSetIterator<'a, T> {
    inner: hash_map::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for UnsyncSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for UnsyncSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for UnsyncSetIterator<'_, T> {}

/// An owning iterator over the elements of an [`UnsyncSet`].
pub struct UnsyncSetIntoIterator<T> {
    inner: hash_map::IntoKeys<T, ()>,
}

impl<T> Iterator for UnsyncSetIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for UnsyncSetIntoIterator<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for UnsyncSetIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for UnsyncSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> FromIterator<T> for UnsyncSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq> Extend<T> for UnsyncSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements
            .extend(iter.into_iter().map(|element| (element, ())));
    }
}

impl<T> IntoIterator for UnsyncSet<T> {
    type Item = T;
    type IntoIter = UnsyncSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        UnsyncSetIntoIterator {
            inner: self.elements.into_keys(),
        }
    }
}

impl<'a, T> IntoIterator for &'a UnsyncSet<T> {
    type Item = &'a T;
    type IntoIter = UnsyncSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Hash + Eq> PartialEq for UnsyncSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Hash + Eq> Eq for UnsyncSet<T> {}

impl<T: Hash> Hash for UnsyncSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_unordered(self.elements.keys(), self.elements.len(), state);
    }
}

impl<T: fmt::Debug> fmt::Debug for UnsyncSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.elements.keys()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for UnsyncSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Set{{")?;
        let mut first = true;
        for element in self.elements.keys() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for UnsyncSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.elements.keys())
    }
}

#[cfg(feature = "serde")]
struct UnsyncSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> UnsyncSetVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for UnsyncSetVisitor<T>
where
    T: serde::Deserialize<'de> + Hash + Eq,
{
    type Value = UnsyncSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of set elements")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = UnsyncSet::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(element) = seq.next_element()? {
            set.add(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for UnsyncSet<T>
where
    T: serde::Deserialize<'de> + Hash + Eq,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(UnsyncSetVisitor::new())
    }
}

#[cfg(feature = "serde")]
impl<T: Hash + Eq> UnsyncSet<T> {
    /// Encodes the set as a JSON array in arbitrary element order.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Json`](super::SetError::Json) if an element fails
    /// to serialize.
    pub fn marshal_json(&self) -> Result<Vec<u8>, super::SetError>
    where
        T: serde::Serialize,
    {
        Ok(serde_json::to_vec(self)?)
    }

    /// Replaces the contents of the set with the elements of a JSON array.
    ///
    /// Duplicates in the input collapse. On error the set is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Json`](super::SetError::Json) if `input` is not a
    /// JSON array of elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::UnsyncSet;
    ///
    /// let mut set: UnsyncSet<i32> = [9].into_iter().collect();
    /// set.unmarshal_json(b"[1, 2, 2, 3]").unwrap();
    /// assert_eq!(set.cardinality(), 3);
    /// assert!(!set.contains(&9));
    /// ```
    pub fn unmarshal_json(&mut self, input: &[u8]) -> Result<(), super::SetError>
    where
        T: serde::de::DeserializeOwned,
    {
        *self = serde_json::from_slice(input)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
