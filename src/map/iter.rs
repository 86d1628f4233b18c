//! Borrowing and owning iterators over a [`TreeMap`](super::TreeMap).

use std::iter::FusedIterator;

use crate::cursor::{predecessor, successor};
use crate::tree::{NodeIndex, RedBlackTree};

/// An iterator over the entries of a [`TreeMap`](super::TreeMap) in
/// ascending key order.
///
/// Walks the tree's parent/child links lazily; each step is amortized O(1).
pub struct Iter<'a, K, V, C> {
    tree: &'a RedBlackTree<K, V, C>,
    front: NodeIndex,
    back: NodeIndex,
    remaining: usize,
}

impl<'a, K, V, C> Iter<'a, K, V, C> {
    pub(crate) fn new(tree: &'a RedBlackTree<K, V, C>) -> Self {
        Self {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }
}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front;
        self.front = successor(self.tree, node);
        self.remaining -= 1;
        self.tree.entry(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back;
        self.back = predecessor(self.tree, node);
        self.remaining -= 1;
        self.tree.entry(node)
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

/// An iterator over the entries of a [`TreeMap`](super::TreeMap) with
/// mutable values.
pub struct IterMut<'a, K, V> {
    entries: std::vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(entries: Vec<(&'a K, &'a mut V)>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a [`TreeMap`](super::TreeMap).
pub struct IntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(entries: Vec<(K, V)>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An iterator over the keys of a [`TreeMap`](super::TreeMap).
pub struct Keys<'a, K, V, C> {
    pub(crate) inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Keys<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V, C> ExactSizeIterator for Keys<'_, K, V, C> {}

/// An iterator over the values of a [`TreeMap`](super::TreeMap).
pub struct Values<'a, K, V, C> {
    pub(crate) inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Values<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V, C> ExactSizeIterator for Values<'_, K, V, C> {}

/// An iterator over mutable values of a [`TreeMap`](super::TreeMap).
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

#[cfg(test)]
mod tests {
    use crate::map::TreeMap;
    use rstest::rstest;

    #[rstest]
    fn test_iter_is_double_ended() {
        let map: TreeMap<i32, i32> = (1..=5).map(|key| (key, key)).collect();
        let mut iter = map.iter();
        assert_eq!(iter.next(), Some((&1, &1)));
        assert_eq!(iter.next_back(), Some((&5, &5)));
        assert_eq!(iter.len(), 3);
        let middle: Vec<i32> = iter.map(|(key, _)| *key).collect();
        assert_eq!(middle, vec![2, 3, 4]);
    }

    #[rstest]
    fn test_iter_meets_in_the_middle() {
        let map: TreeMap<i32, ()> = (0..4).map(|key| (key, ())).collect();
        let mut iter = map.iter();
        assert!(iter.next().is_some());
        assert!(iter.next_back().is_some());
        assert!(iter.next().is_some());
        assert!(iter.next_back().is_some());
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[rstest]
    fn test_iter_mut_updates_in_order() {
        let mut map: TreeMap<i32, i32> = [(3, 0), (1, 0), (2, 0)].into_iter().collect();
        for (index, (_, value)) in map.iter_mut().enumerate() {
            *value = i32::try_from(index).unwrap_or_default();
        }
        let values: Vec<i32> = map.values().copied().collect();
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[rstest]
    fn test_values_mut() {
        let mut map: TreeMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        for value in map.values_mut() {
            *value *= 10;
        }
        assert_eq!(map.at(&"a"), Ok(&10));
        assert_eq!(map.at(&"b"), Ok(&20));
    }

    #[rstest]
    fn test_into_iter_owned_sorted() {
        let map: TreeMap<i32, String> = [(2, "b".to_string()), (1, "a".to_string())]
            .into_iter()
            .collect();
        let entries: Vec<(i32, String)> = map.into_iter().collect();
        assert_eq!(entries, vec![(1, "a".to_string()), (2, "b".to_string())]);
    }

    #[rstest]
    fn test_keys_rev() {
        let map: TreeMap<i32, ()> = (0..3).map(|key| (key, ())).collect();
        let keys: Vec<i32> = map.keys().rev().copied().collect();
        assert_eq!(keys, vec![2, 1, 0]);
    }
}
