//! Ordered pairs produced by Cartesian products.

use std::fmt;

/// An ordered pair `(first, second)`.
///
/// Elements of the set returned by `cartesian_product`. Two pairs are equal
/// only when both components are equal in the same positions.
///
/// # Examples
///
/// ```rust
/// use lockset::set::OrderedPair;
///
/// let pair = OrderedPair::new(1, "one");
/// assert_eq!(pair.first, 1);
/// assert_eq!(pair.second, "one");
/// assert_eq!(format!("{pair}"), "(1, one)");
/// assert_ne!(OrderedPair::new(1, 2), OrderedPair::new(2, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedPair<A, B> {
    /// The component drawn from the receiver of the product.
    pub first: A,
    /// The component drawn from the operand of the product.
    pub second: B,
}

impl<A, B> OrderedPair<A, B> {
    /// Creates a pair from its two components.
    #[inline]
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Splits the pair into a tuple.
    #[inline]
    pub fn into_tuple(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for OrderedPair<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for OrderedPair<A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.first, self.second)
    }
}
