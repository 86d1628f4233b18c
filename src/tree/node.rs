//! Node storage for the red-black tree.
//!
//! Nodes live in a single vector and refer to each other by [`NodeIndex`].
//! Slot 0 is the sentinel: it is black, carries no entry, and its links point
//! back at itself. Released slots are recycled through a free list, and every
//! release bumps the slot's generation so that cursors taken before the
//! release can be told apart from cursors to whatever reuses the slot.

use std::ops::{Index, IndexMut};

/// The color of a red-black tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Position of a node in the [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeIndex(usize);

impl NodeIndex {
    /// The sentinel slot.
    pub(crate) const NIL: Self = Self(0);

    #[inline]
    pub(crate) const fn is_nil(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// A single slot of the arena.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    /// `None` for the sentinel and for released slots.
    pub(crate) entry: Option<(K, V)>,
    pub(crate) color: Color,
    pub(crate) parent: NodeIndex,
    pub(crate) left: NodeIndex,
    pub(crate) right: NodeIndex,
    pub(crate) generation: u64,
}

impl<K, V> Node<K, V> {
    const fn sentinel() -> Self {
        Self {
            entry: None,
            color: Color::Black,
            parent: NodeIndex::NIL,
            left: NodeIndex::NIL,
            right: NodeIndex::NIL,
            generation: 0,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// Vector-backed node storage with a sentinel at slot 0.
#[derive(Debug)]
pub(crate) struct Arena<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<NodeIndex>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());
        Self {
            nodes,
            free: Vec::new(),
        }
    }

    /// Number of slots, including the sentinel and released slots.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn get(&self, index: NodeIndex) -> Option<&Node<K, V>> {
        self.nodes.get(index.0)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node<K, V>> {
        self.nodes.get_mut(index.0)
    }

    /// Stores a new red entry with no children, reusing a released slot when
    /// one is available.
    pub(crate) fn allocate(&mut self, key: K, value: V, parent: NodeIndex) -> NodeIndex {
        if let Some(index) = self.free.pop() {
            let node = &mut self.nodes[index.0];
            node.entry = Some((key, value));
            node.color = Color::Red;
            node.parent = parent;
            node.left = NodeIndex::NIL;
            node.right = NodeIndex::NIL;
            index
        } else {
            let index = NodeIndex(self.nodes.len());
            self.nodes.push(Node {
                entry: Some((key, value)),
                color: Color::Red,
                parent,
                left: NodeIndex::NIL,
                right: NodeIndex::NIL,
                generation: 0,
            });
            index
        }
    }

    /// Takes the entry out of a slot and puts the slot on the free list.
    ///
    /// Returns `None` for the sentinel and for slots that are already free.
    pub(crate) fn release(&mut self, index: NodeIndex) -> Option<(K, V)> {
        if index.is_nil() {
            return None;
        }
        let node = self.nodes.get_mut(index.0)?;
        let entry = node.entry.take()?;
        node.generation = node.generation.wrapping_add(1);
        node.color = Color::Black;
        node.parent = NodeIndex::NIL;
        node.left = NodeIndex::NIL;
        node.right = NodeIndex::NIL;
        self.free.push(index);
        Some(entry)
    }

    /// Restores the sentinel to a black self-loop.
    pub(crate) fn reset_sentinel(&mut self) {
        let sentinel = &mut self.nodes[0];
        sentinel.color = Color::Black;
        sentinel.parent = NodeIndex::NIL;
        sentinel.left = NodeIndex::NIL;
        sentinel.right = NodeIndex::NIL;
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (NodeIndex, &mut Node<K, V>)> {
        self.nodes
            .iter_mut()
            .enumerate()
            .map(|(slot, node)| (NodeIndex(slot), node))
    }

    pub(crate) fn into_nodes(self) -> impl Iterator<Item = (NodeIndex, Node<K, V>)> {
        self.nodes
            .into_iter()
            .enumerate()
            .map(|(slot, node)| (NodeIndex(slot), node))
    }
}

impl<K, V> Index<NodeIndex> for Arena<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index.0]
    }
}

impl<K, V> IndexMut<NodeIndex> for Arena<K, V> {
    #[inline]
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index.0]
    }
}
