//! Ordered map backed by a red-black tree.
//!
//! This module provides [`TreeMap`], a mutable sorted map with logarithmic
//! lookup, insertion, and removal, plus detached [`Cursor`]s that stay valid
//! across any change that does not erase the element they point at.
//!
//! # Overview
//!
//! - O(log N) `find`, `at`, `insert`, `erase`
//! - O(1) `len` and `is_empty`
//! - O(N) full traversal, amortized O(1) per cursor step
//!
//! Keys are unique under the map's comparator; inserting an equivalent key
//! again leaves the existing entry untouched.
//!
//! # Examples
//!
//! ```rust
//! use redblack::map::TreeMap;
//!
//! let mut map = TreeMap::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     map.insert(key, key * 10);
//! }
//!
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &3, &4, &5, &7, &8, &9]);
//!
//! let three = map.find(&3);
//! map.erase(three).unwrap();
//! assert_eq!(map.count(&3), 0);
//!
//! *map.index_or_insert(2) += 1;
//! assert_eq!(map.at(&2), Ok(&1));
//! assert_eq!(map.len(), 7);
//! ```

mod iter;

pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use crate::compare::{Compare, NaturalOrder};
use crate::cursor::{ConstCursor, ContainerId, Cursor};
use crate::error::{InvalidIteratorError, InvariantViolation, OutOfBoundsError};
use crate::tree::RedBlackTree;

/// A sorted map from unique keys to values.
///
/// `C` decides the key order; it defaults to [`NaturalOrder`] (the key's
/// [`Ord`] implementation). Any `Fn(&K, &K) -> bool` strict weak order works
/// as well.
///
/// # Time Complexity
///
/// | Operation          | Complexity |
/// |--------------------|------------|
/// | `new`              | O(1)       |
/// | `find` / `at`      | O(log N)   |
/// | `insert`           | O(log N)   |
/// | `erase` / `remove` | O(log N)   |
/// | `first` / `last`   | O(log N)   |
/// | `len` / `is_empty` | O(1)       |
/// | `clone`            | O(N)       |
///
/// # Examples
///
/// ```rust
/// use redblack::map::TreeMap;
///
/// let mut descending = TreeMap::with_comparator(|left: &i32, right: &i32| left > right);
/// descending.insert(1, "one");
/// descending.insert(3, "three");
/// descending.insert(2, "two");
///
/// let keys: Vec<i32> = descending.keys().copied().collect();
/// assert_eq!(keys, vec![3, 2, 1]);
/// ```
pub struct TreeMap<K, V, C = NaturalOrder> {
    tree: RedBlackTree<K, V, C>,
    identity: ContainerId,
}

impl<K, V> TreeMap<K, V> {
    /// Creates an empty map ordered by `K: Ord`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::map::TreeMap;
    ///
    /// let map: TreeMap<i32, String> = TreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates an empty map with room for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    #[inline]
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    /// Creates an empty map with room for `capacity` entries before the node
    /// storage reallocates.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            tree: RedBlackTree::with_capacity(comparator, capacity),
            identity: ContainerId::fresh(),
        }
    }

    #[inline]
    pub(crate) const fn tree(&self) -> &RedBlackTree<K, V, C> {
        &self.tree
    }

    #[inline]
    pub(crate) fn tree_mut(&mut self) -> &mut RedBlackTree<K, V, C> {
        &mut self.tree
    }

    #[inline]
    pub(crate) const fn identity(&self) -> ContainerId {
        self.identity
    }

    /// Returns the comparator that orders this map.
    #[inline]
    pub const fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Removes every entry. Cursors into the map become stale, except
    /// [`end`](Self::end) which stays valid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::map::TreeMap;
    ///
    /// let mut map: TreeMap<i32, i32> = (0..10).map(|key| (key, key)).collect();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.begin(), map.end());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Cursor to the smallest entry, or [`end`](Self::end) if the map is empty.
    #[must_use]
    pub fn begin(&self) -> Cursor {
        Cursor::at(self, self.tree.first())
    }

    /// The past-the-end cursor.
    #[must_use]
    pub fn end(&self) -> Cursor {
        Cursor::at(self, crate::tree::NodeIndex::NIL)
    }

    /// Read-only cursor to the smallest entry.
    #[must_use]
    pub fn const_begin(&self) -> ConstCursor {
        ConstCursor::at(self, self.tree.first())
    }

    /// Read-only past-the-end cursor.
    #[must_use]
    pub fn const_end(&self) -> ConstCursor {
        ConstCursor::at(self, crate::tree::NodeIndex::NIL)
    }

    /// Removes the entry at `position` and returns it.
    ///
    /// Only cursors to the removed entry are invalidated; every other cursor
    /// keeps pointing at the same key.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIteratorError`] without changing the map if
    /// `position` is past the end, stale, or belongs to another map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::error::InvalidIteratorError;
    /// use redblack::map::TreeMap;
    ///
    /// let mut map: TreeMap<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// let one = map.find(&1);
    /// assert_eq!(map.erase(one), Ok((1, "one")));
    /// assert_eq!(map.erase(one), Err(InvalidIteratorError::Stale));
    /// assert_eq!(map.erase(map.end()), Err(InvalidIteratorError::PastTheEnd));
    /// ```
    pub fn erase(&mut self, position: Cursor) -> Result<(K, V), InvalidIteratorError> {
        let node = position.node_in(self)?;
        self.tree.erase(node).ok_or(InvalidIteratorError::Stale)
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::map::TreeMap;
    ///
    /// let map: TreeMap<i32, &str> = [(3, "three"), (1, "one")].into_iter().collect();
    /// assert_eq!(map.first(), Some((&1, &"one")));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.entry(self.tree.first())
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.entry(self.tree.last())
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::map::TreeMap;
    ///
    /// let map: TreeMap<i32, char> = [(2, 'b'), (1, 'a')].into_iter().collect();
    /// let entries: Vec<(&i32, &char)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &'a'), (&2, &'b')]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter::new(&self.tree)
    }

    /// Returns an iterator over entries in ascending key order with mutable
    /// access to the values.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self.tree.entries_in_order_mut())
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::map::TreeMap;
    ///
    /// let map: TreeMap<i32, i32> = (1..=3).map(|key| (key, key * 10)).collect();
    /// let sum: i32 = map.values().sum();
    /// assert_eq!(sum, 60);
    /// ```
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable values in key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Verifies the red-black and ordering invariants, returning the black
    /// height of the root (the sentinel counts as one).
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation>
    where
        C: Compare<K>,
    {
        self.tree.check()
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Returns a cursor to the entry whose key is equivalent to `key`, or
    /// [`end`](Self::end) if there is none.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn find<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        Cursor::at(self, self.tree.find_node(key))
    }

    /// Read-only variant of [`find`](Self::find).
    pub fn find_const<Q>(&self, key: &Q) -> ConstCursor
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        ConstCursor::at(self, self.tree.find_node(key))
    }

    /// Returns 1 if the key is present and 0 otherwise.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        usize::from(self.contains_key(key))
    }

    /// Returns `true` if the map contains the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert("key".to_string(), 42);
    /// assert!(map.contains_key("key"));
    /// assert!(!map.contains_key("other"));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        !self.tree.find_node(key).is_nil()
    }

    /// Returns a reference to the value for `key`, if present.
    ///
    /// The key may be any borrowed form of the map's key type, provided the
    /// comparator orders the borrowed form the same way.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree
            .entry(self.tree.find_node(key))
            .map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value for `key`, if present.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let node = self.tree.find_node(key);
        self.tree.entry_mut(node).map(|(_, value)| value)
    }

    /// Bounds-checked access to the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::error::OutOfBoundsError;
    /// use redblack::map::TreeMap;
    ///
    /// let map: TreeMap<i32, &str> = [(1, "one")].into_iter().collect();
    /// assert_eq!(map.at(&1), Ok(&"one"));
    /// assert_eq!(map.at(&100), Err(OutOfBoundsError));
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V, OutOfBoundsError>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.get(key).ok_or(OutOfBoundsError)
    }

    /// Bounds-checked mutable access to the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if the key is absent.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, OutOfBoundsError>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.get_mut(key).ok_or(OutOfBoundsError)
    }

    /// Read-only index access. Unlike
    /// [`index_or_insert`](Self::index_or_insert) this never inserts.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if the key is absent.
    pub fn index<Q>(&self, key: &Q) -> Result<&V, OutOfBoundsError>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.at(key)
    }

    /// Removes `key` and returns its value, if present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::map::TreeMap;
    ///
    /// let mut map: TreeMap<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(map.remove(&1), Some("one"));
    /// assert_eq!(map.remove(&1), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let node = self.tree.find_node(key);
        self.tree.erase(node).map(|(_, value)| value)
    }
}

impl<K, V, C: Compare<K>> TreeMap<K, V, C> {
    /// Inserts `key` with `value` unless an equivalent key is present.
    ///
    /// Returns a cursor to the entry holding the key and `true` if a new
    /// entry was created. An existing entry is never overwritten; the
    /// rejected `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// let (first, inserted) = map.insert(1, "one");
    /// assert!(inserted);
    ///
    /// let (again, inserted) = map.insert(1, "uno");
    /// assert!(!inserted);
    /// assert_eq!(again, first);
    /// assert_eq!(map.at(&1), Ok(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        let (node, inserted) = self.tree.insert(key, value);
        (Cursor::at(self, node), inserted)
    }

    /// Returns the value for `key`, inserting `V::default()` first if the key
    /// is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::map::TreeMap;
    ///
    /// let mut counts: TreeMap<&str, usize> = TreeMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.index_or_insert(word) += 1;
    /// }
    /// assert_eq!(counts.at(&"a"), Ok(&2));
    /// assert_eq!(counts.at(&"b"), Ok(&1));
    /// ```
    pub fn index_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let (node, _) = self.tree.insert(key, V::default());
        match self.tree.entry_mut(node) {
            Some((_, value)) => value,
            None => unreachable!("insert returns an occupied node"),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Default> Default for TreeMap<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

/// Deep copy. The copy has its own identity, so cursors from one map are
/// never accepted by the other.
impl<K: Clone, V: Clone, C: Clone> Clone for TreeMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            identity: ContainerId::fresh(),
        }
    }

    /// Replaces the contents with a copy of `source`, keeping this map's
    /// identity. Cursors into the old contents become stale.
    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for TreeMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// Entries whose key is already present are skipped.
impl<K, V, C: Compare<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.tree.insert(key, value);
        }
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree.into_entries_in_order())
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut TreeMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Maps are equal when they hold equal entries in the same order.
impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for TreeMap<K, V, C> {}

impl<K: Hash, V: Hash, C> Hash for TreeMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for TreeMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
