//! Bidirectional cursors over a [`TreeMap`].
//!
//! A cursor is a detached position: it does not borrow the map, so it stays
//! usable across insertions and across erasures of other elements. Every
//! operation re-validates it against the map it is handed, and misuse is
//! reported as an [`InvalidIteratorError`]:
//!
//! - a cursor taken from another map (including a clone) is `ForeignContainer`
//! - a cursor whose element was erased or cleared is `Stale`
//! - stepping past either end is `PastTheEnd` / `BeforeBegin`
//!
//! [`Cursor`] can read and write through `&mut TreeMap`; [`ConstCursor`] can
//! only read. A `Cursor` converts into a `ConstCursor`, never the reverse.
//!
//! # Examples
//!
//! ```rust
//! use redblack::map::TreeMap;
//!
//! let mut map: TreeMap<i32, &str> = [(2, "two"), (1, "one"), (3, "three")].into_iter().collect();
//!
//! let mut cursor = map.begin();
//! assert_eq!(cursor.get(&map), Ok((&1, &"one")));
//! cursor.move_next(&map).unwrap();
//! *cursor.get_mut(&mut map).unwrap().1 = "TWO";
//!
//! let mut back = map.end();
//! back.move_prev(&map).unwrap();
//! assert_eq!(back.key(&map), Ok(&3));
//! assert_eq!(map.at(&2), Ok(&"TWO"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::InvalidIteratorError;
use crate::map::TreeMap;
use crate::tree::{NodeIndex, RedBlackTree};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a map instance. Clones receive a fresh identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct ContainerId(u64);

impl ContainerId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// In-order successor of `node`, or the sentinel after the last element.
pub(crate) fn successor<K, V, C>(tree: &RedBlackTree<K, V, C>, mut node: NodeIndex) -> NodeIndex {
    let right = tree.right(node);
    if !right.is_nil() {
        return tree.minimum(right);
    }
    let mut parent = tree.parent(node);
    while !parent.is_nil() && node == tree.right(parent) {
        node = parent;
        parent = tree.parent(parent);
    }
    parent
}

/// In-order predecessor of `node`, or the sentinel before the first element.
pub(crate) fn predecessor<K, V, C>(tree: &RedBlackTree<K, V, C>, mut node: NodeIndex) -> NodeIndex {
    let left = tree.left(node);
    if !left.is_nil() {
        return tree.maximum(left);
    }
    let mut parent = tree.parent(node);
    while !parent.is_nil() && node == tree.left(parent) {
        node = parent;
        parent = tree.parent(parent);
    }
    parent
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct Position {
    container: ContainerId,
    node: NodeIndex,
    generation: u64,
}

impl Position {
    fn at<K, V, C>(map: &TreeMap<K, V, C>, node: NodeIndex) -> Self {
        Self {
            container: map.identity(),
            node,
            generation: map.tree().live_generation(node).unwrap_or(0),
        }
    }

    fn validate<K, V, C>(&self, map: &TreeMap<K, V, C>) -> Result<(), InvalidIteratorError> {
        if self.container != map.identity() {
            return Err(InvalidIteratorError::ForeignContainer);
        }
        if self.node.is_nil() {
            return Ok(());
        }
        match map.tree().live_generation(self.node) {
            Some(generation) if generation == self.generation => Ok(()),
            _ => Err(InvalidIteratorError::Stale),
        }
    }

    /// Validated node that is not the past-the-end position.
    fn element<K, V, C>(&self, map: &TreeMap<K, V, C>) -> Result<NodeIndex, InvalidIteratorError> {
        self.validate(map)?;
        if self.node.is_nil() {
            Err(InvalidIteratorError::PastTheEnd)
        } else {
            Ok(self.node)
        }
    }

    fn next<K, V, C>(&self, map: &TreeMap<K, V, C>) -> Result<Self, InvalidIteratorError> {
        let node = self.element(map)?;
        Ok(Self::at(map, successor(map.tree(), node)))
    }

    fn prev<K, V, C>(&self, map: &TreeMap<K, V, C>) -> Result<Self, InvalidIteratorError> {
        self.validate(map)?;
        let tree = map.tree();
        let target = if self.node.is_nil() {
            if tree.root().is_nil() {
                return Err(InvalidIteratorError::EmptyContainer);
            }
            tree.last()
        } else {
            predecessor(tree, self.node)
        };
        if target.is_nil() {
            return Err(InvalidIteratorError::BeforeBegin);
        }
        Ok(Self::at(map, target))
    }

    fn get<'a, K, V, C>(
        &self,
        map: &'a TreeMap<K, V, C>,
    ) -> Result<(&'a K, &'a V), InvalidIteratorError> {
        let node = self.element(map)?;
        map.tree().entry(node).ok_or(InvalidIteratorError::Stale)
    }
}

/// A read-write position in a [`TreeMap`].
///
/// Obtained from [`TreeMap::begin`], [`TreeMap::end`], [`TreeMap::find`] or
/// [`TreeMap::insert`]. Writing through it requires `&mut TreeMap`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cursor {
    position: Position,
}

/// A read-only position in a [`TreeMap`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ConstCursor {
    position: Position,
}

impl Cursor {
    pub(crate) fn at<K, V, C>(map: &TreeMap<K, V, C>, node: NodeIndex) -> Self {
        Self {
            position: Position::at(map, node),
        }
    }

    pub(crate) fn node_in<K, V, C>(&self, map: &TreeMap<K, V, C>) -> Result<NodeIndex, InvalidIteratorError> {
        self.position.element(map)
    }

    /// Returns `true` at the past-the-end position.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.position.node.is_nil()
    }

    /// Steps to the next element in key order.
    ///
    /// # Errors
    ///
    /// Fails without moving if the cursor is past the end, stale, or from a
    /// different map.
    pub fn move_next<K, V, C>(&mut self, map: &TreeMap<K, V, C>) -> Result<(), InvalidIteratorError> {
        self.position = self.position.next(map)?;
        Ok(())
    }

    /// Steps to the previous element in key order. From the past-the-end
    /// position this moves to the last element.
    ///
    /// # Errors
    ///
    /// Fails without moving if the cursor is at the first element, the map is
    /// empty, or the cursor is stale or from a different map.
    pub fn move_prev<K, V, C>(&mut self, map: &TreeMap<K, V, C>) -> Result<(), InvalidIteratorError> {
        self.position = self.position.prev(map)?;
        Ok(())
    }

    /// Returns the cursor one step forward, leaving `self` untouched.
    ///
    /// # Errors
    ///
    /// Same as [`move_next`](Self::move_next).
    pub fn next<K, V, C>(self, map: &TreeMap<K, V, C>) -> Result<Self, InvalidIteratorError> {
        self.position.next(map).map(|position| Self { position })
    }

    /// Returns the cursor one step back, leaving `self` untouched.
    ///
    /// # Errors
    ///
    /// Same as [`move_prev`](Self::move_prev).
    pub fn prev<K, V, C>(self, map: &TreeMap<K, V, C>) -> Result<Self, InvalidIteratorError> {
        self.position.prev(map).map(|position| Self { position })
    }

    /// Dereferences the cursor.
    ///
    /// # Errors
    ///
    /// Fails at the past-the-end position or when the cursor is stale or
    /// foreign.
    pub fn get<'a, K, V, C>(
        &self,
        map: &'a TreeMap<K, V, C>,
    ) -> Result<(&'a K, &'a V), InvalidIteratorError> {
        self.position.get(map)
    }

    /// Dereferences the cursor for writing. The key stays read-only.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_mut<'a, K, V, C>(
        &self,
        map: &'a mut TreeMap<K, V, C>,
    ) -> Result<(&'a K, &'a mut V), InvalidIteratorError> {
        let node = self.position.element(map)?;
        map.tree_mut()
            .entry_mut(node)
            .ok_or(InvalidIteratorError::Stale)
    }

    /// Returns the key at the cursor.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn key<'a, K, V, C>(&self, map: &'a TreeMap<K, V, C>) -> Result<&'a K, InvalidIteratorError> {
        self.get(map).map(|(key, _)| key)
    }
}

impl ConstCursor {
    pub(crate) fn at<K, V, C>(map: &TreeMap<K, V, C>, node: NodeIndex) -> Self {
        Self {
            position: Position::at(map, node),
        }
    }

    /// Returns `true` at the past-the-end position.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.position.node.is_nil()
    }

    /// Steps to the next element in key order.
    ///
    /// # Errors
    ///
    /// See [`Cursor::move_next`].
    pub fn move_next<K, V, C>(&mut self, map: &TreeMap<K, V, C>) -> Result<(), InvalidIteratorError> {
        self.position = self.position.next(map)?;
        Ok(())
    }

    /// Steps to the previous element in key order.
    ///
    /// # Errors
    ///
    /// See [`Cursor::move_prev`].
    pub fn move_prev<K, V, C>(&mut self, map: &TreeMap<K, V, C>) -> Result<(), InvalidIteratorError> {
        self.position = self.position.prev(map)?;
        Ok(())
    }

    /// Returns the cursor one step forward.
    ///
    /// # Errors
    ///
    /// See [`Cursor::move_next`].
    pub fn next<K, V, C>(self, map: &TreeMap<K, V, C>) -> Result<Self, InvalidIteratorError> {
        self.position.next(map).map(|position| Self { position })
    }

    /// Returns the cursor one step back.
    ///
    /// # Errors
    ///
    /// See [`Cursor::move_prev`].
    pub fn prev<K, V, C>(self, map: &TreeMap<K, V, C>) -> Result<Self, InvalidIteratorError> {
        self.position.prev(map).map(|position| Self { position })
    }

    /// Dereferences the cursor.
    ///
    /// # Errors
    ///
    /// See [`Cursor::get`].
    pub fn get<'a, K, V, C>(
        &self,
        map: &'a TreeMap<K, V, C>,
    ) -> Result<(&'a K, &'a V), InvalidIteratorError> {
        self.position.get(map)
    }

    /// Returns the key at the cursor.
    ///
    /// # Errors
    ///
    /// See [`Cursor::get`].
    pub fn key<'a, K, V, C>(&self, map: &'a TreeMap<K, V, C>) -> Result<&'a K, InvalidIteratorError> {
        self.get(map).map(|(key, _)| key)
    }
}

impl From<Cursor> for ConstCursor {
    fn from(cursor: Cursor) -> Self {
        Self {
            position: cursor.position,
        }
    }
}

impl PartialEq<ConstCursor> for Cursor {
    fn eq(&self, other: &ConstCursor) -> bool {
        self.position == other.position
    }
}

impl PartialEq<Cursor> for ConstCursor {
    fn eq(&self, other: &Cursor) -> bool {
        self.position == other.position
    }
}

static_assertions::assert_impl_all!(Cursor: Copy, Send, Sync, Into<ConstCursor>);
static_assertions::assert_not_impl_any!(ConstCursor: Into<Cursor>);
