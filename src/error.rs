//! Error types for map access and cursor misuse.
//!
//! Every fallible operation on [`TreeMap`](crate::map::TreeMap) reports misuse
//! through one of these types instead of panicking. A failed operation never
//! mutates the map.

use std::fmt;

/// Returned when a key-based accessor is asked for a key that is not present.
///
/// # Examples
///
/// ```rust
/// use redblack::error::OutOfBoundsError;
/// use redblack::map::TreeMap;
///
/// let map: TreeMap<i32, &str> = TreeMap::new();
/// assert_eq!(map.at(&100), Err(OutOfBoundsError));
/// assert_eq!(format!("{}", OutOfBoundsError), "key not found in map");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutOfBoundsError;

impl fmt::Display for OutOfBoundsError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "key not found in map")
    }
}

impl std::error::Error for OutOfBoundsError {}

/// Returned when a cursor is used in a way its position does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidIteratorError {
    /// The cursor is at the past-the-end position and cannot be dereferenced,
    /// advanced, or erased.
    PastTheEnd,
    /// The cursor is at the first element and cannot be retreated.
    BeforeBegin,
    /// Retreat from the past-the-end position of an empty map.
    EmptyContainer,
    /// The cursor was obtained from a different map instance.
    ForeignContainer,
    /// The element the cursor referred to has been erased.
    Stale,
}

impl fmt::Display for InvalidIteratorError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::PastTheEnd => "cursor is past the end",
            Self::BeforeBegin => "cursor cannot move before the first element",
            Self::EmptyContainer => "cursor cannot retreat in an empty map",
            Self::ForeignContainer => "cursor belongs to a different map",
            Self::Stale => "cursor refers to an erased element",
        };
        write!(formatter, "invalid iterator: {reason}")
    }
}

impl std::error::Error for InvalidIteratorError {}

/// Unified error type for all map operations.
///
/// # Examples
///
/// ```rust
/// use redblack::error::{InvalidIteratorError, MapError};
/// use redblack::map::TreeMap;
///
/// fn first_value(map: &TreeMap<i32, i32>) -> Result<i32, MapError> {
///     let (_, value) = map.const_begin().get(map)?;
///     Ok(*value + *map.at(&1)?)
/// }
///
/// let empty = TreeMap::new();
/// assert_eq!(
///     first_value(&empty),
///     Err(MapError::InvalidIterator(InvalidIteratorError::PastTheEnd))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapError {
    /// A key lookup failed.
    OutOfBounds(OutOfBoundsError),
    /// A cursor was misused.
    InvalidIterator(InvalidIteratorError),
}

impl fmt::Display for MapError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(error) => write!(formatter, "{error}"),
            Self::InvalidIterator(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfBounds(error) => Some(error),
            Self::InvalidIterator(error) => Some(error),
        }
    }
}

impl From<OutOfBoundsError> for MapError {
    fn from(error: OutOfBoundsError) -> Self {
        Self::OutOfBounds(error)
    }
}

impl From<InvalidIteratorError> for MapError {
    fn from(error: InvalidIteratorError) -> Self {
        Self::InvalidIterator(error)
    }
}

/// A broken red-black or search-tree invariant, reported by
/// [`TreeMap::check_invariants`](crate::map::TreeMap::check_invariants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantViolation {
    /// The sentinel is not black or does not point at itself.
    CorruptSentinel,
    /// The root is red.
    RedRoot,
    /// A red node has a red child.
    RedChildOfRed,
    /// Two paths from the same node reach the sentinel through different
    /// numbers of black nodes.
    UnequalBlackHeight,
    /// Keys are not strictly ascending in in-order position.
    OrderViolation,
    /// A released slot is still linked into the tree.
    VacantSlotLinked,
    /// A child does not point back at its parent.
    BrokenParentLink,
    /// The stored length differs from the number of reachable nodes.
    LengthMismatch {
        /// Length recorded by the map.
        recorded: usize,
        /// Nodes actually reachable from the root.
        reachable: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorruptSentinel => write!(formatter, "sentinel is not a black self-loop"),
            Self::RedRoot => write!(formatter, "root is red"),
            Self::RedChildOfRed => write!(formatter, "red node has a red child"),
            Self::UnequalBlackHeight => write!(formatter, "black height differs between paths"),
            Self::OrderViolation => write!(formatter, "keys are not in ascending order"),
            Self::VacantSlotLinked => write!(formatter, "released slot is linked into the tree"),
            Self::BrokenParentLink => write!(formatter, "child does not link back to its parent"),
            Self::LengthMismatch {
                recorded,
                reachable,
            } => write!(
                formatter,
                "recorded length {recorded} but {reachable} nodes are reachable"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

static_assertions::assert_impl_all!(MapError: std::error::Error, Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InvalidIteratorError::PastTheEnd, "invalid iterator: cursor is past the end")]
    #[case(
        InvalidIteratorError::BeforeBegin,
        "invalid iterator: cursor cannot move before the first element"
    )]
    #[case(
        InvalidIteratorError::ForeignContainer,
        "invalid iterator: cursor belongs to a different map"
    )]
    #[case(InvalidIteratorError::Stale, "invalid iterator: cursor refers to an erased element")]
    fn test_invalid_iterator_display(#[case] error: InvalidIteratorError, #[case] expected: &str) {
        assert_eq!(format!("{error}"), expected);
    }

    #[rstest]
    fn test_map_error_from_out_of_bounds() {
        let error: MapError = OutOfBoundsError.into();
        assert_eq!(error, MapError::OutOfBounds(OutOfBoundsError));
        assert_eq!(format!("{error}"), "key not found in map");
    }

    #[rstest]
    fn test_map_error_source() {
        use std::error::Error;
        let error = MapError::from(InvalidIteratorError::Stale);
        assert!(error.source().is_some());
    }

    #[rstest]
    fn test_length_mismatch_display() {
        let violation = InvariantViolation::LengthMismatch {
            recorded: 3,
            reachable: 2,
        };
        assert_eq!(
            format!("{violation}"),
            "recorded length 3 but 2 nodes are reachable"
        );
    }
}
