//! Error types for set operations.

use super::Variant;

/// Errors returned by fallible set operations.
///
/// # Examples
///
/// ```rust
/// use lockset::set::{AnySet, SetError, Variant};
///
/// let locked: AnySet<i32> = AnySet::new(Variant::Synchronized);
/// let plain: AnySet<i32> = AnySet::new(Variant::Unsynchronized);
///
/// let error = locked.union(&plain).unwrap_err();
/// assert!(matches!(error, SetError::VariantMismatch { .. }));
/// assert_eq!(
///     error.to_string(),
///     "set variant mismatch: expected synchronized, found unsynchronized"
/// );
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SetError {
    /// A binary operation received an operand of the other variant.
    #[error("set variant mismatch: expected {expected}, found {found}")]
    VariantMismatch {
        /// The variant of the receiver.
        expected: Variant,
        /// The variant of the operand.
        found: Variant,
    },

    /// JSON encoding or decoding failed.
    #[cfg(feature = "serde")]
    #[error("set JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_variant_mismatch_display() {
        let error = SetError::VariantMismatch {
            expected: Variant::Unsynchronized,
            found: Variant::Synchronized,
        };
        assert_eq!(
            error.to_string(),
            "set variant mismatch: expected unsynchronized, found synchronized"
        );
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_json_error_converts() {
        let json_error = serde_json::from_str::<Vec<i32>>("[").unwrap_err();
        let error = SetError::from(json_error);
        assert!(matches!(error, SetError::Json(_)));
        assert!(error.to_string().starts_with("set JSON encoding failed: "));
    }
}
