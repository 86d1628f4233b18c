//! Key orderings for [`TreeMap`](crate::map::TreeMap).
//!
//! A map is parameterized by a comparator implementing [`Compare`]. The
//! comparator only has to answer "is `left` strictly less than `right`";
//! two keys are equivalent when neither is less than the other.
//!
//! # Examples
//!
//! ```rust
//! use redblack::compare::{Compare, NaturalOrder, ReverseOrder};
//!
//! assert!(NaturalOrder.less(&1, &2));
//! assert!(ReverseOrder.less(&2, &1));
//!
//! let by_length = |left: &&str, right: &&str| left.len() < right.len();
//! assert!(by_length.less(&"ab", &"abc"));
//! ```

use std::cmp::Ordering;

/// A strict weak order over values of type `T`.
///
/// Implementations must be irreflexive and transitive, and equivalence
/// (`!less(a, b) && !less(b, a)`) must be transitive as well.
pub trait Compare<T: ?Sized> {
    /// Returns `true` if `left` is ordered strictly before `right`.
    fn less(&self, left: &T, right: &T) -> bool;

    /// Three-way comparison derived from [`less`](Self::less).
    fn compare(&self, left: &T, right: &T) -> Ordering {
        if self.less(left, right) {
            Ordering::Less
        } else if self.less(right, left) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Orders keys by their [`Ord`] implementation. This is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Compare<T> for NaturalOrder {
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        left < right
    }

    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Orders keys by the reverse of their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<T: Ord + ?Sized> Compare<T> for ReverseOrder {
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        right < left
    }

    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        right.cmp(left)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        self(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, Ordering::Less)]
    #[case(2, 1, Ordering::Greater)]
    #[case(3, 3, Ordering::Equal)]
    fn test_natural_order_compare(#[case] left: i32, #[case] right: i32, #[case] expected: Ordering) {
        assert_eq!(NaturalOrder.compare(&left, &right), expected);
    }

    #[rstest]
    #[case(1, 2, Ordering::Greater)]
    #[case(2, 1, Ordering::Less)]
    #[case(3, 3, Ordering::Equal)]
    fn test_reverse_order_compare(#[case] left: i32, #[case] right: i32, #[case] expected: Ordering) {
        assert_eq!(ReverseOrder.compare(&left, &right), expected);
    }

    #[rstest]
    fn test_closure_comparator_equivalence() {
        let case_insensitive =
            |left: &String, right: &String| left.to_lowercase() < right.to_lowercase();
        let upper = "ABC".to_string();
        let lower = "abc".to_string();
        assert!(!case_insensitive.less(&upper, &lower));
        assert_eq!(case_insensitive.compare(&upper, &lower), Ordering::Equal);
    }

    #[rstest]
    fn test_natural_order_on_unsized_str() {
        assert!(NaturalOrder.less("apple", "banana"));
    }
}
