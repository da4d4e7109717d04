//! Thread-safe hash set.
//!
//! This module provides [`SyncSet`], an [`UnsyncSet`] engine guarded by a
//! reader-writer lock. Every method takes the lock that matches what it does
//! and then delegates to the engine:
//!
//! - reads (`contains`, `cardinality`, `to_vec`, `each`, `iter`, `Display`,
//!   JSON encoding) take the shared lock
//! - writes (`add`, `remove`, `clear`, `pop`, `unmarshal_json`) take the
//!   exclusive lock
//! - binary operations (`union`, `is_subset`, `equal`, ...) take the shared
//!   lock of the receiver and then the shared lock of the operand
//!
//! Each call is atomic on its own. Nothing is atomic across calls.
//!
//! # Shared Locks
//!
//! Every shared acquisition is recursive: it waits only for a writer that
//! actually holds the lock, never for one that is merely queued. A thread
//! that owns a live stream (whose producer holds the shared lock) can keep
//! reading the same set while another thread's write is pending. Under a
//! steady stream of readers a writer may wait indefinitely.
//!
//! # Lock Order
//!
//! Binary operations lock receiver-then-operand, so `a.union(&b)` and
//! `b.union(&a)` acquire the same two locks in opposite orders. This cannot
//! deadlock because both acquisitions are recursive shared locks, and
//! writers never hold one set's lock while waiting for another's. Binary
//! operations must never take an exclusive lock on either operand.
//!
//! # Examples
//!
//! ```rust
//! use lockset::set::SyncSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(SyncSet::new());
//!
//! let handles: Vec<_> = (0..8)
//!     .map(|index| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || set.add(index))
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert!(handle.join().unwrap());
//! }
//! assert_eq!(set.cardinality(), 8);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use super::{Iter, OrderedPair, SetIterator, UnsyncSet};

// =============================================================================
// SyncSet Definition
// =============================================================================

/// A hash set guarded by a reader-writer lock.
///
/// All methods take `&self`, so a `SyncSet` can be shared between threads
/// through `&SyncSet` or `Arc<SyncSet>`. [`Clone`] produces a fully
/// independent set with its own lock.
///
/// # Examples
///
/// ```rust
/// use lockset::set::SyncSet;
///
/// let set: SyncSet<i32> = [1, 2, 3].into_iter().collect();
/// assert!(set.add(4));
/// assert!(!set.add(4));
/// assert_eq!(set.cardinality(), 4);
/// ```
pub struct SyncSet<T> {
    engine: Arc<RwLock<UnsyncSet<T>>>,
}

static_assertions::assert_impl_all!(SyncSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(SyncSet<String>: Send, Sync);
static_assertions::assert_not_impl_any!(SyncSet<std::rc::Rc<i32>>: Send, Sync);

impl<T> SyncSet<T> {
    /// Creates a new empty set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from(UnsyncSet::new())
    }

    /// Creates a new empty set with room for at least `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(UnsyncSet::with_capacity(capacity))
    }

    /// Returns the number of distinct elements in the set.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.engine.read_recursive().cardinality()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engine.read_recursive().is_empty()
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.engine.write().clear();
    }

    /// Calls `function` on each element until it returns `true`.
    ///
    /// The shared lock is held for the whole call. `function` must not call
    /// back into this set; a nested write deadlocks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::SyncSet;
    ///
    /// let set: SyncSet<i32> = (1..=5).collect();
    /// let mut sum = 0;
    /// set.each(|element| {
    ///     sum += element;
    ///     false
    /// });
    /// assert_eq!(sum, 15);
    /// ```
    pub fn each<F>(&self, function: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.engine.read_recursive().each(function);
    }

    /// Locks both sets for reading, receiver first.
    fn read_pair<'a, U>(
        &'a self,
        other: &'a SyncSet<U>,
    ) -> (
        RwLockReadGuard<'a, UnsyncSet<T>>,
        RwLockReadGuard<'a, UnsyncSet<U>>,
    ) {
        let receiver = self.engine.read_recursive();
        let operand = other.engine.read_recursive();
        (receiver, operand)
    }
}

impl<T: Hash + Eq> SyncSet<T> {
    /// Inserts an element.
    ///
    /// Returns `true` if the element was not already present.
    pub fn add(&self, element: T) -> bool {
        self.engine.write().add(element)
    }

    /// Removes an element. Does nothing if it is absent.
    pub fn remove<Q>(&self, element: &Q)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.engine.write().remove(element);
    }

    /// Removes and returns an arbitrary element, or `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::SyncSet;
    ///
    /// let set: SyncSet<i32> = [1, 2].into_iter().collect();
    /// let popped = set.pop().unwrap();
    /// assert!(!set.contains(&popped));
    /// assert_eq!(set.cardinality(), 1);
    /// ```
    pub fn pop(&self) -> Option<T> {
        self.engine.write().pop()
    }

    /// Returns `true` if the set contains `element`.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.engine.read_recursive().contains(element)
    }

    /// Returns `true` if the set contains every one of `elements`.
    ///
    /// Vacuously `true` when `elements` is empty. All elements are checked
    /// under a single acquisition of the shared lock.
    #[must_use]
    pub fn contains_all<'a, Q, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        self.engine.read_recursive().contains_all(elements)
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        let (receiver, operand) = self.read_pair(other);
        receiver.is_subset(&operand)
    }

    /// Returns `true` if `self` is a subset of `other` and the two differ.
    #[must_use]
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        let (receiver, operand) = self.read_pair(other);
        receiver.is_proper_subset(&operand)
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
        let (receiver, operand) = self.read_pair(other);
        receiver.equal(&operand)
    }
}

impl<T: Clone + Hash + Eq> SyncSet<T> {
    /// Returns the elements as a vector in arbitrary order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.engine.read_recursive().to_vec()
    }

    /// Copies the current contents into an [`UnsyncSet`].
    #[must_use]
    pub fn snapshot(&self) -> UnsyncSet<T> {
        self.engine.read_recursive().clone()
    }

    /// Consumes the set and returns its engine.
    ///
    /// If a stream created by [`iter`](Self::iter) or
    /// [`iterator`](Self::iterator) is still alive, the contents are copied.
    #[must_use]
    pub fn into_unsync(self) -> UnsyncSet<T> {
        Arc::try_unwrap(self.engine)
            .map_or_else(|shared| shared.read_recursive().clone(), RwLock::into_inner)
    }

    /// Returns a new set with every element of either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (receiver, operand) = self.read_pair(other);
        Self::from(receiver.union(&operand))
    }

    /// Returns a new set with the elements present in both sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let (receiver, operand) = self.read_pair(other);
        Self::from(receiver.intersect(&operand))
    }

    /// Returns a new set with the elements of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let (receiver, operand) = self.read_pair(other);
        Self::from(receiver.difference(&operand))
    }

    /// Returns a new set with the elements in exactly one of the two sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let (receiver, operand) = self.read_pair(other);
        Self::from(receiver.symmetric_difference(&operand))
    }

    /// Returns the set of every ordered pair `(a, b)` with `a` from `self`
    /// and `b` from `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::{OrderedPair, SyncSet};
    ///
    /// let left: SyncSet<i32> = [1, 2].into_iter().collect();
    /// let right: SyncSet<i32> = [1, 2, 3].into_iter().collect();
    ///
    /// let product = left.cartesian_product(&right);
    /// assert_eq!(product.cardinality(), 6);
    /// assert!(product.contains(&OrderedPair::new(2, 3)));
    /// ```
    #[must_use]
    pub fn cartesian_product<U>(&self, other: &SyncSet<U>) -> SyncSet<OrderedPair<T, U>>
    where
        U: Clone + Hash + Eq,
    {
        let (receiver, operand) = self.read_pair(other);
        SyncSet::from(receiver.cartesian_product(&*operand))
    }

    /// Returns the set of all subsets of `self`.
    ///
    /// Every member is an independent `SyncSet` with its own lock. Members
    /// are hashed by content, so mutating one while it sits in the result
    /// leaves the result in an unspecified state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::SyncSet;
    ///
    /// let set: SyncSet<i32> = [1, 2, 3].into_iter().collect();
    /// let power_set = set.power_set();
    ///
    /// assert_eq!(power_set.cardinality(), 8);
    /// assert!(power_set.contains(&SyncSet::<i32>::new()));
    /// assert!(power_set.contains(&set));
    /// ```
    #[must_use]
    #[allow(clippy::mutable_key_type)]
    pub fn power_set(&self) -> SyncSet<Self> {
        let subsets = self.engine.read_recursive().power_set();
        subsets.into_iter().map(Self::from).collect()
    }
}

impl<T> SyncSet<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Streams every element from a background thread.
    ///
    /// The producer holds the shared lock until the stream is exhausted or
    /// dropped. See the [`iter`](super::iter) module for the rules.
    #[must_use]
    pub fn iter(&self) -> Iter<T> {
        Iter::spawn(Arc::clone(&self.engine))
    }

    /// Streams every element from a background thread, with explicit
    /// cancellation through [`SetIterator::stop`].
    #[must_use]
    pub fn iterator(&self) -> SetIterator<T> {
        SetIterator::spawn(Arc::clone(&self.engine))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> From<UnsyncSet<T>> for SyncSet<T> {
    fn from(engine: UnsyncSet<T>) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }
}

impl<T> Default for SyncSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SyncSet<T> {
    fn clone(&self) -> Self {
        Self::from(self.engine.read_recursive().clone())
    }
}

impl<T: Hash + Eq> FromIterator<T> for SyncSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<UnsyncSet<T>>())
    }
}

impl<T: Hash + Eq> Extend<T> for SyncSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.engine.write().extend(iter);
    }
}

impl<T: Hash + Eq> PartialEq for SyncSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Hash + Eq> Eq for SyncSet<T> {}

impl<T: Hash> Hash for SyncSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&*self.engine.read_recursive(), state);
    }
}

impl<T: fmt::Debug> fmt::Debug for SyncSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.engine.read_recursive(), formatter)
    }
}

impl<T: fmt::Display> fmt::Display for SyncSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.engine.read_recursive(), formatter)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for SyncSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.engine.read_recursive().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for SyncSet<T>
where
    T: serde::Deserialize<'de> + Hash + Eq,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        UnsyncSet::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(feature = "serde")]
impl<T: Hash + Eq> SyncSet<T> {
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
        self.engine.read_recursive().marshal_json()
    }

    /// Replaces the contents of the set with the elements of a JSON array.
    ///
    /// The input is decoded first and swapped in under the exclusive lock,
    /// so readers observe either the old contents or the new ones. On error
    /// the set is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Json`](super::SetError::Json) if `input` is not a
    /// JSON array of elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockset::set::SyncSet;
    ///
    /// let set: SyncSet<String> = SyncSet::new();
    /// set.unmarshal_json(br#"["a", "b", "a"]"#).unwrap();
    /// assert_eq!(set.cardinality(), 2);
    ///
    /// assert!(set.unmarshal_json(b"[1, 2").is_err());
    /// assert_eq!(set.cardinality(), 2);
    /// ```
    pub fn unmarshal_json(&self, input: &[u8]) -> Result<(), super::SetError>
    where
        T: serde::de::DeserializeOwned,
    {
        let decoded: UnsyncSet<T> = serde_json::from_slice(input).inspect_err(|error| {
            tracing::debug!(%error, "rejected JSON input for set");
        })?;
        *self.engine.write() = decoded;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
