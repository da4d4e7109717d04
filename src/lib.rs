//! # lockset
//!
//! Generic hash sets with the full set algebra, available in two variants:
//!
//! - [`UnsyncSet`](set::UnsyncSet): a plain set with no internal locking.
//! - [`SyncSet`](set::SyncSet): the same set behind a reader-writer lock,
//!   safe to share between threads.
//!
//! Both variants support union, intersection, difference, symmetric
//! difference, subset and superset predicates, power sets, Cartesian
//! products, cloning, and JSON serialization.
//!
//! ## Feature Flags
//!
//! - `serde` (default): `Serialize`/`Deserialize` implementations and the
//!   `marshal_json`/`unmarshal_json` methods
//! - `fxhash`: hash elements with `rustc_hash::FxBuildHasher`
//! - `ahash`: hash elements with `ahash::RandomState`
//!
//! ## Example
//!
//! ```rust
//! use lockset::prelude::*;
//!
//! let left: SyncSet<i32> = [1, 2].into_iter().collect();
//! let right: SyncSet<i32> = [2, 3].into_iter().collect();
//!
//! assert_eq!(left.union(&right).cardinality(), 3);
//! assert!(left.intersect(&right).contains(&2));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use lockset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::set::*;
}

pub mod set;
