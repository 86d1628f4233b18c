//! Red-black tree engine backing [`TreeMap`](crate::map::TreeMap).
//!
//! The engine owns every node, performs search, insertion and erasure with
//! the classic recoloring/rotation fixups, and exposes the structural links
//! that the cursor protocol walks. It never hands out anything but
//! [`NodeIndex`] values; turning those into cursors is the map's job.
//!
//! The tree maintains the following invariants between operations:
//! 1. Every node is either red or black
//! 2. The root and the sentinel are black
//! 3. Red nodes have only black children
//! 4. Every path from a node to the sentinel has the same number of black nodes
//! 5. In-order keys are strictly ascending under the comparator

mod node;

pub(crate) use node::NodeIndex;

use node::{Arena, Color, Node};
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::compare::Compare;
use crate::error::InvariantViolation;

/// Inline capacity of traversal stacks. Tree height stays below
/// `2 * log2(n + 1)`, so this covers every realistic size without spilling.
const TRAVERSAL_INLINE_CAPACITY: usize = 48;

pub(crate) struct RedBlackTree<K, V, C> {
    arena: Arena<K, V>,
    root: NodeIndex,
    length: usize,
    comparator: C,
}

impl<K, V, C> RedBlackTree<K, V, C> {
    pub(crate) fn with_capacity(comparator: C, capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: NodeIndex::NIL,
            length: 0,
            comparator,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub(crate) const fn root(&self) -> NodeIndex {
        self.root
    }

    #[inline]
    pub(crate) const fn comparator(&self) -> &C {
        &self.comparator
    }

    #[inline]
    pub(crate) fn left(&self, node: NodeIndex) -> NodeIndex {
        self.arena[node].left
    }

    #[inline]
    pub(crate) fn right(&self, node: NodeIndex) -> NodeIndex {
        self.arena[node].right
    }

    #[inline]
    pub(crate) fn parent(&self, node: NodeIndex) -> NodeIndex {
        self.arena[node].parent
    }

    #[inline]
    fn color(&self, node: NodeIndex) -> Color {
        self.arena[node].color
    }

    #[inline]
    fn set_color(&mut self, node: NodeIndex, color: Color) {
        self.arena[node].color = color;
    }

    /// Returns the generation of an occupied slot, or `None` if the index is
    /// out of range or the slot holds no entry.
    pub(crate) fn live_generation(&self, node: NodeIndex) -> Option<u64> {
        self.arena
            .get(node)
            .filter(|slot| slot.entry.is_some())
            .map(|slot| slot.generation)
    }

    pub(crate) fn entry(&self, node: NodeIndex) -> Option<(&K, &V)> {
        self.arena
            .get(node)
            .and_then(|slot| slot.entry.as_ref())
            .map(|(key, value)| (key, value))
    }

    pub(crate) fn entry_mut(&mut self, node: NodeIndex) -> Option<(&K, &mut V)> {
        self.arena
            .get_mut(node)
            .and_then(|slot| slot.entry.as_mut())
            .map(|(key, value)| (&*key, value))
    }

    /// Leftmost node of the subtree rooted at `node`.
    pub(crate) fn minimum(&self, mut node: NodeIndex) -> NodeIndex {
        while !self.left(node).is_nil() {
            node = self.left(node);
        }
        node
    }

    /// Rightmost node of the subtree rooted at `node`.
    pub(crate) fn maximum(&self, mut node: NodeIndex) -> NodeIndex {
        while !self.right(node).is_nil() {
            node = self.right(node);
        }
        node
    }

    /// Smallest node, or the sentinel if the tree is empty.
    pub(crate) fn first(&self) -> NodeIndex {
        if self.root.is_nil() {
            NodeIndex::NIL
        } else {
            self.minimum(self.root)
        }
    }

    /// Largest node, or the sentinel if the tree is empty.
    pub(crate) fn last(&self) -> NodeIndex {
        if self.root.is_nil() {
            NodeIndex::NIL
        } else {
            self.maximum(self.root)
        }
    }

    /// Walks from the root to the node whose key is equivalent to `key`.
    /// Returns the sentinel when no such node exists.
    pub(crate) fn find_node<Q>(&self, key: &Q) -> NodeIndex
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let mut current = self.root;
        while let Some((current_key, _)) = self.arena[current].entry.as_ref() {
            match self.comparator.compare(key, current_key.borrow()) {
                Ordering::Less => current = self.arena[current].left,
                Ordering::Greater => current = self.arena[current].right,
                Ordering::Equal => return current,
            }
        }
        NodeIndex::NIL
    }

    /// Inserts a new entry unless an equivalent key is present.
    ///
    /// Returns the node holding the key and whether it was newly created. An
    /// existing entry is left untouched and `value` is dropped.
    pub(crate) fn insert(&mut self, key: K, value: V) -> (NodeIndex, bool)
    where
        C: Compare<K>,
    {
        let mut parent = NodeIndex::NIL;
        let mut current = self.root;
        let mut attach_left = false;
        while let Some((current_key, _)) = self.arena[current].entry.as_ref() {
            parent = current;
            match self.comparator.compare(&key, current_key) {
                Ordering::Less => {
                    attach_left = true;
                    current = self.arena[current].left;
                }
                Ordering::Greater => {
                    attach_left = false;
                    current = self.arena[current].right;
                }
                Ordering::Equal => return (current, false),
            }
        }

        let inserted = self.arena.allocate(key, value, parent);
        if parent.is_nil() {
            self.root = inserted;
        } else if attach_left {
            self.arena[parent].left = inserted;
        } else {
            self.arena[parent].right = inserted;
        }

        self.insert_fixup(inserted);
        self.length += 1;
        (inserted, true)
    }

    /// Restores the red-black invariants after `node` was attached as a red leaf.
    fn insert_fixup(&mut self, mut node: NodeIndex) {
        while self.arena[self.parent(node)].is_red() {
            let parent = self.parent(node);
            let grandparent = self.parent(parent);
            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.arena[uncle].is_red() {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.right(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.arena[uncle].is_red() {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Points `parent`'s link that currently holds `old` at `new`, or makes
    /// `new` the root when `parent` is the sentinel.
    fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if parent.is_nil() {
            self.root = new;
        } else if self.left(parent) == old {
            self.arena[parent].left = new;
        } else {
            self.arena[parent].right = new;
        }
    }

    /// Pivots `node` down to the left; its right child takes its place.
    fn rotate_left(&mut self, node: NodeIndex) {
        let pivot = self.right(node);
        let inner = self.left(pivot);
        self.arena[node].right = inner;
        if !inner.is_nil() {
            self.arena[inner].parent = node;
        }
        let parent = self.parent(node);
        self.arena[pivot].parent = parent;
        self.replace_child(parent, node, pivot);
        self.arena[pivot].left = node;
        self.arena[node].parent = pivot;
    }

    /// Pivots `node` down to the right; its left child takes its place.
    fn rotate_right(&mut self, node: NodeIndex) {
        let pivot = self.left(node);
        let inner = self.right(pivot);
        self.arena[node].left = inner;
        if !inner.is_nil() {
            self.arena[inner].parent = node;
        }
        let parent = self.parent(node);
        self.arena[pivot].parent = parent;
        self.replace_child(parent, node, pivot);
        self.arena[pivot].right = node;
        self.arena[node].parent = pivot;
    }

    /// Replaces the subtree rooted at `target` with the one rooted at
    /// `replacement`. The sentinel's parent may be written here; the erase
    /// fixup relies on it.
    fn transplant(&mut self, target: NodeIndex, replacement: NodeIndex) {
        let parent = self.parent(target);
        self.replace_child(parent, target, replacement);
        self.arena[replacement].parent = parent;
    }

    /// Unlinks `target` and returns its entry.
    ///
    /// When `target` has two children its in-order successor is relinked into
    /// `target`'s position, so the successor's slot (and any cursor to it)
    /// survives. Only `target`'s slot is released.
    pub(crate) fn erase(&mut self, target: NodeIndex) -> Option<(K, V)> {
        if target.is_nil() || self.live_generation(target).is_none() {
            return None;
        }

        let mut removed_color = self.color(target);
        let replacement;
        if self.left(target).is_nil() {
            replacement = self.right(target);
            self.transplant(target, replacement);
        } else if self.right(target).is_nil() {
            replacement = self.left(target);
            self.transplant(target, replacement);
        } else {
            let successor = self.minimum(self.right(target));
            removed_color = self.color(successor);
            replacement = self.right(successor);
            if self.parent(successor) == target {
                self.arena[replacement].parent = successor;
            } else {
                self.transplant(successor, replacement);
                let right = self.right(target);
                self.arena[successor].right = right;
                self.arena[right].parent = successor;
            }
            self.transplant(target, successor);
            let left = self.left(target);
            self.arena[successor].left = left;
            self.arena[left].parent = successor;
            let color = self.color(target);
            self.set_color(successor, color);
        }

        if removed_color == Color::Black {
            self.erase_fixup(replacement);
        }
        self.arena.reset_sentinel();
        self.length -= 1;
        self.arena.release(target)
    }

    /// Restores the black height after a black node was spliced out above
    /// `node`.
    fn erase_fixup(&mut self, mut node: NodeIndex) {
        while node != self.root && self.color(node) == Color::Black {
            let parent = self.parent(node);
            if node == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.arena[sibling].is_red() {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right(self.parent(node));
                }
                if self.color(self.left(sibling)) == Color::Black
                    && self.color(self.right(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    node = self.parent(node);
                } else {
                    if self.color(self.right(sibling)) == Color::Black {
                        let near = self.left(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right(self.parent(node));
                    }
                    let parent = self.parent(node);
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let far = self.right(sibling);
                    self.set_color(far, Color::Black);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.arena[sibling].is_red() {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left(self.parent(node));
                }
                if self.color(self.right(sibling)) == Color::Black
                    && self.color(self.left(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    node = self.parent(node);
                } else {
                    if self.color(self.left(sibling)) == Color::Black {
                        let near = self.right(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left(self.parent(node));
                    }
                    let parent = self.parent(node);
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let far = self.left(sibling);
                    self.set_color(far, Color::Black);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }
        self.set_color(node, Color::Black);
    }

    /// Releases every node, children before parents.
    pub(crate) fn clear(&mut self) {
        let mut pending: SmallVec<[(NodeIndex, bool); TRAVERSAL_INLINE_CAPACITY]> = SmallVec::new();
        if !self.root.is_nil() {
            pending.push((self.root, false));
        }
        while let Some((node, children_done)) = pending.pop() {
            if children_done {
                self.arena.release(node);
                continue;
            }
            pending.push((node, true));
            let (left, right) = (self.left(node), self.right(node));
            if !right.is_nil() {
                pending.push((right, false));
            }
            if !left.is_nil() {
                pending.push((left, false));
            }
        }
        self.root = NodeIndex::NIL;
        self.length = 0;
    }

    /// Node indices in ascending key order.
    fn in_order(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.length);
        let mut pending: SmallVec<[NodeIndex; TRAVERSAL_INLINE_CAPACITY]> = SmallVec::new();
        let mut current = self.root;
        while !current.is_nil() || !pending.is_empty() {
            while !current.is_nil() {
                pending.push(current);
                current = self.left(current);
            }
            if let Some(node) = pending.pop() {
                order.push(node);
                current = self.right(node);
            }
        }
        order
    }

    /// Maps each slot to its in-order rank; unreachable slots map to `None`.
    fn ranks(&self) -> Vec<Option<usize>> {
        let mut ranks = vec![None; self.arena.slot_count()];
        for (rank, node) in self.in_order().into_iter().enumerate() {
            ranks[node.get()] = Some(rank);
        }
        ranks
    }

    /// Mutable views of every entry in ascending key order.
    pub(crate) fn entries_in_order_mut(&mut self) -> Vec<(&K, &mut V)> {
        let ranks = self.ranks();
        let mut ordered: Vec<Option<(&K, &mut V)>> = (0..self.length).map(|_| None).collect();
        for (index, node) in self.arena.iter_mut() {
            if let (Some(Some(rank)), Some((key, value))) = (ranks.get(index.get()), node.entry.as_mut()) {
                if let Some(position) = ordered.get_mut(*rank) {
                    *position = Some((&*key, value));
                }
            }
        }
        ordered.into_iter().flatten().collect()
    }

    /// Consumes the tree, yielding every entry in ascending key order.
    pub(crate) fn into_entries_in_order(self) -> Vec<(K, V)> {
        let ranks = self.ranks();
        let mut ordered: Vec<Option<(K, V)>> = (0..self.length).map(|_| None).collect();
        for (index, node) in self.arena.into_nodes() {
            if let (Some(Some(rank)), Some(entry)) = (ranks.get(index.get()), node.entry) {
                if let Some(position) = ordered.get_mut(*rank) {
                    *position = Some(entry);
                }
            }
        }
        ordered.into_iter().flatten().collect()
    }

    /// Verifies every invariant and returns the black height of the root.
    pub(crate) fn check(&self) -> Result<usize, InvariantViolation>
    where
        C: Compare<K>,
    {
        let sentinel = &self.arena[NodeIndex::NIL];
        if sentinel.is_red()
            || !sentinel.left.is_nil()
            || !sentinel.right.is_nil()
            || !sentinel.parent.is_nil()
            || sentinel.entry.is_some()
        {
            return Err(InvariantViolation::CorruptSentinel);
        }
        if self.arena[self.root].is_red() {
            return Err(InvariantViolation::RedRoot);
        }
        if !self.root.is_nil() && !self.parent(self.root).is_nil() {
            return Err(InvariantViolation::BrokenParentLink);
        }

        let mut reachable = 0;
        let mut previous = None;
        let black_height = self.check_subtree(self.root, &mut previous, &mut reachable)?;
        if reachable != self.length {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.length,
                reachable,
            });
        }
        Ok(black_height)
    }

    fn check_subtree<'a>(
        &'a self,
        node: NodeIndex,
        previous: &mut Option<&'a K>,
        reachable: &mut usize,
    ) -> Result<usize, InvariantViolation>
    where
        C: Compare<K>,
    {
        if node.is_nil() {
            return Ok(1);
        }
        let current: &Node<K, V> = &self.arena[node];
        let Some((key, _)) = current.entry.as_ref() else {
            return Err(InvariantViolation::VacantSlotLinked);
        };
        for child in [current.left, current.right] {
            if child.is_nil() {
                continue;
            }
            if self.parent(child) != node {
                return Err(InvariantViolation::BrokenParentLink);
            }
            if current.is_red() && self.arena[child].is_red() {
                return Err(InvariantViolation::RedChildOfRed);
            }
        }

        let left_height = self.check_subtree(current.left, previous, reachable)?;
        if let Some(previous_key) = *previous {
            if !self.comparator.less(previous_key, key) {
                return Err(InvariantViolation::OrderViolation);
            }
        }
        *previous = Some(key);
        *reachable += 1;
        let right_height = self.check_subtree(current.right, previous, reachable)?;

        if left_height != right_height {
            return Err(InvariantViolation::UnequalBlackHeight);
        }
        Ok(left_height + usize::from(current.color == Color::Black))
    }
}

impl<K: Clone, V: Clone, C> RedBlackTree<K, V, C> {
    /// Copies the subtree rooted at `source` into `target`, preserving shape
    /// and colors. Returns the copy's root.
    fn clone_subtree(&self, source: NodeIndex, parent: NodeIndex, target: &mut Arena<K, V>) -> NodeIndex {
        let Some((key, value)) = self.arena[source].entry.as_ref() else {
            return NodeIndex::NIL;
        };
        let copied = target.allocate(key.clone(), value.clone(), parent);
        target[copied].color = self.arena[source].color;
        let left = self.clone_subtree(self.arena[source].left, copied, target);
        target[copied].left = left;
        let right = self.clone_subtree(self.arena[source].right, copied, target);
        target[copied].right = right;
        copied
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RedBlackTree<K, V, C> {
    fn clone(&self) -> Self {
        let mut arena = Arena::with_capacity(self.length);
        let root = self.clone_subtree(self.root, NodeIndex::NIL, &mut arena);
        Self {
            arena,
            root,
            length: self.length,
            comparator: self.comparator.clone(),
        }
    }

    /// Drops every current node, then copies `source`. Released slots keep
    /// their bumped generations, so cursors into the old contents stay
    /// detectably stale.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.comparator = source.comparator.clone();
        self.root = source.clone_subtree(source.root, NodeIndex::NIL, &mut self.arena);
        self.length = source.length;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::NaturalOrder;
    use rstest::rstest;

    fn tree_from(keys: &[i32]) -> RedBlackTree<i32, i32, NaturalOrder> {
        let mut tree = RedBlackTree::with_capacity(NaturalOrder, keys.len());
        for &key in keys {
            tree.insert(key, key * 10);
        }
        tree
    }

    fn keys_of(tree: &RedBlackTree<i32, i32, NaturalOrder>) -> Vec<i32> {
        tree.in_order()
            .into_iter()
            .filter_map(|node| tree.entry(node).map(|(key, _)| *key))
            .collect()
    }

    #[rstest]
    fn test_empty_tree_is_valid() {
        let tree = tree_from(&[]);
        assert_eq!(tree.check(), Ok(1));
        assert!(tree.first().is_nil());
        assert!(tree.last().is_nil());
    }

    #[rstest]
    #[case(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])]
    #[case(&[10, 9, 8, 7, 6, 5, 4, 3, 2, 1])]
    #[case(&[5, 3, 8, 1, 4, 7, 9, 2, 6])]
    fn test_insert_keeps_invariants(#[case] keys: &[i32]) {
        let tree = tree_from(keys);
        assert!(tree.check().is_ok());
        let mut expected = keys.to_vec();
        expected.sort_unstable();
        assert_eq!(keys_of(&tree), expected);
    }

    #[rstest]
    fn test_ascending_insert_rotates_root() {
        let tree = tree_from(&[1, 2, 3]);
        assert_eq!(tree.entry(tree.root()).map(|(key, _)| *key), Some(2));
        assert_eq!(tree.color(tree.root()), Color::Black);
        assert_eq!(tree.color(tree.left(tree.root())), Color::Red);
        assert_eq!(tree.color(tree.right(tree.root())), Color::Red);
    }

    #[rstest]
    fn test_duplicate_insert_returns_existing_node() {
        let mut tree = tree_from(&[1, 2, 3]);
        let existing = tree.find_node(&2);
        assert_eq!(tree.insert(2, 999), (existing, false));
        assert_eq!(tree.entry(existing), Some((&2, &20)));
        assert_eq!(tree.len(), 3);
    }

    #[rstest]
    fn test_rotations_preserve_in_order_sequence() {
        let mut tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
        let root = tree.root();
        tree.rotate_left(root);
        assert_eq!(keys_of(&tree), vec![1, 2, 3, 4, 5, 6, 7]);
        let root = tree.root();
        assert_eq!(tree.entry(root).map(|(key, _)| *key), Some(6));
        tree.rotate_right(root);
        assert_eq!(keys_of(&tree), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.entry(tree.root()).map(|(key, _)| *key), Some(4));
    }

    #[rstest]
    #[case(4)]
    #[case(1)]
    #[case(7)]
    #[case(2)]
    fn test_erase_keeps_invariants(#[case] removed: i32) {
        let mut tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
        let node = tree.find_node(&removed);
        assert_eq!(tree.erase(node), Some((removed, removed * 10)));
        assert!(tree.check().is_ok());
        assert!(tree.find_node(&removed).is_nil());
        assert_eq!(tree.len(), 6);
    }

    #[rstest]
    fn test_erase_two_children_keeps_successor_slot() {
        let mut tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
        let target = tree.find_node(&4);
        let successor = tree.find_node(&5);
        let successor_generation = tree.live_generation(successor);

        tree.erase(target);

        assert_eq!(tree.find_node(&5), successor);
        assert_eq!(tree.live_generation(successor), successor_generation);
        assert_eq!(tree.live_generation(target), None);
    }

    #[rstest]
    fn test_erase_of_sentinel_is_refused() {
        let mut tree = tree_from(&[1]);
        assert_eq!(tree.erase(NodeIndex::NIL), None);
        assert_eq!(tree.len(), 1);
    }

    #[rstest]
    fn test_erase_everything_in_mixed_order() {
        let keys: Vec<i32> = (0..64).map(|index| (index * 37) % 64).collect();
        let mut tree = tree_from(&keys);
        for key in keys.iter().rev() {
            let node = tree.find_node(key);
            assert!(tree.erase(node).is_some());
            assert!(tree.check().is_ok());
        }
        assert_eq!(tree.len(), 0);
        assert!(tree.root().is_nil());
    }

    #[rstest]
    fn test_clear_releases_all_nodes() {
        let mut tree = tree_from(&[3, 1, 2]);
        let node = tree.find_node(&2);
        tree.clear();
        assert_eq!(tree.len(), 0);
        assert!(tree.root().is_nil());
        assert_eq!(tree.live_generation(node), None);
        assert_eq!(tree.check(), Ok(1));
    }

    #[rstest]
    fn test_clone_copies_shape_and_colors() {
        let tree = tree_from(&[5, 3, 8, 1, 4, 7, 9]);
        let copy = tree.clone();
        assert_eq!(keys_of(&copy), keys_of(&tree));
        assert_eq!(copy.check(), tree.check());
        assert_eq!(
            copy.entry(copy.root()).map(|(key, _)| *key),
            tree.entry(tree.root()).map(|(key, _)| *key)
        );
    }

    #[rstest]
    fn test_clone_from_reuses_slots_with_new_generations() {
        let mut target = tree_from(&[1, 2]);
        let old = target.find_node(&1);
        let source = tree_from(&[7, 8, 9]);
        target.clone_from(&source);
        assert_eq!(keys_of(&target), vec![7, 8, 9]);
        assert!(target.check().is_ok());
        assert_ne!(target.live_generation(old), Some(0));
    }

    #[rstest]
    fn test_entries_in_order_mut_allows_updates() {
        let mut tree = tree_from(&[3, 1, 2]);
        for (_, value) in tree.entries_in_order_mut() {
            *value += 1;
        }
        assert_eq!(tree.entry(tree.find_node(&1)), Some((&1, &11)));
        assert_eq!(tree.entry(tree.find_node(&3)), Some((&3, &31)));
    }

    #[rstest]
    fn test_into_entries_in_order() {
        let mut tree = tree_from(&[3, 1, 2, 4]);
        let node = tree.find_node(&4);
        tree.erase(node);
        assert_eq!(tree.into_entries_in_order(), vec![(1, 10), (2, 20), (3, 30)]);
    }
}
