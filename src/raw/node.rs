use alloc::vec::Vec;

use super::handle::Handle;
use crate::error::Result;
use crate::less::Less;

/// A B-tree node with storage sized for its tree's order.
///
/// Key storage holds `order` slots: `order - 1` for a settled node plus one so an overflowing
/// key can be placed before the node splits. Child storage, present only for internal nodes,
/// holds `order + 1` slots for the same reason. Both are allocated up front, so neither insertion
/// nor splitting ever reallocates.
pub(crate) struct Node<T> {
    parent: Option<Handle>,
    keys: Vec<T>,
    // `None` for leaves; otherwise always `keys.len() + 1` entries.
    children: Option<Vec<Handle>>,
}

/// Result of searching for a key in a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchResult {
    /// An equivalent key is stored at the given index.
    Found(usize),
    /// No equivalent key; index is both the insertion point and the child to descend into.
    NotFound(usize),
}

impl<T> Node<T> {
    /// Allocates an empty node for a tree of the given order.
    pub(crate) fn try_new(parent: Option<Handle>, order: usize, is_leaf: bool) -> Result<Self> {
        let mut keys = Vec::new();
        keys.try_reserve_exact(order)?;
        let children = if is_leaf {
            None
        } else {
            let mut children = Vec::new();
            children.try_reserve_exact(order + 1)?;
            Some(children)
        };
        Ok(Self { parent, keys, children })
    }

    /// Returns true if this node has no child storage.
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> &T {
        &self.keys[index]
    }

    #[inline]
    pub(crate) fn key_mut(&mut self, index: usize) -> &mut T {
        &mut self.keys[index]
    }

    pub(crate) fn keys(&self) -> &[T] {
        &self.keys
    }

    /// Returns the child handle at the given index. Panics on a leaf.
    #[inline]
    pub(crate) fn child(&self, index: usize) -> Handle {
        self.children()[index]
    }

    /// Returns all child handles; empty for a leaf.
    pub(crate) fn children(&self) -> &[Handle] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Scans the keys left to right for the first one that does not precede `key`.
    ///
    /// That key is a match if it is also not preceded by `key`; otherwise its index is where
    /// `key` belongs, which is `key_count()` when `key` follows every stored key.
    pub(crate) fn search<L: Less<T>>(&self, key: &T, less: &L) -> SearchResult {
        let index = self.keys.iter().position(|stored| !less.less(stored, key)).unwrap_or(self.keys.len());
        match self.keys.get(index) {
            Some(stored) if !less.less(key, stored) => SearchResult::Found(index),
            _ => SearchResult::NotFound(index),
        }
    }

    /// Pushes a key (and, for internal nodes, the child to its right) to the end.
    ///
    /// Used to fill a freshly allocated node; the first child of an internal node is
    /// attached with [`Node::push_first_child`].
    pub(crate) fn push(&mut self, key: T, right_child: Option<Handle>) {
        self.keys.push(key);
        if let (Some(children), Some(child)) = (self.children.as_mut(), right_child) {
            children.push(child);
        }
    }

    pub(crate) fn push_first_child(&mut self, child: Handle) {
        let children = self.children.as_mut().expect("`Node::push_first_child()` - node is a leaf");
        debug_assert!(children.is_empty());
        children.push(child);
    }

    /// Inserts a key at `index`; for internal nodes `right_child` lands at `index + 1`.
    ///
    /// The node may temporarily hold one key over the tree's limit; the caller splits it.
    pub(crate) fn insert(&mut self, index: usize, key: T, right_child: Option<Handle>) {
        debug_assert!(self.keys.len() < self.keys.capacity(), "`Node::insert()` - node already overflowed");
        self.keys.insert(index, key);
        if let Some(children) = self.children.as_mut() {
            let child = right_child.expect("`Node::insert()` - internal node needs a right child");
            children.insert(index + 1, child);
        }
    }

    /// Moves everything after key `left_len` into the empty node `right` and returns the key
    /// at `left_len`, which separates the two halves.
    ///
    /// Afterwards this node keeps `left_len` keys (and `left_len + 1` children). The caller is
    /// responsible for re-parenting the children that moved.
    pub(crate) fn split_into(&mut self, right: &mut Node<T>, left_len: usize) -> T {
        debug_assert!(right.keys.is_empty() && right.children().is_empty());
        debug_assert!(left_len < self.keys.len());
        right.keys.extend(self.keys.drain(left_len + 1..));
        if let (Some(children), Some(right_children)) = (self.children.as_mut(), right.children.as_mut()) {
            right_children.extend(children.drain(left_len + 1..));
        }
        self.keys.pop().expect("`Node::split_into()` - pivot index out of range")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::less::Natural;
    use pretty_assertions::assert_eq;

    fn leaf(order: usize, keys: &[i32]) -> Node<i32> {
        let mut node = Node::try_new(None, order, true).unwrap();
        for &k in keys {
            node.push(k, None);
        }
        node
    }

    #[test]
    fn storage_is_sized_for_order() {
        let node: Node<i32> = Node::try_new(None, 5, false).unwrap();
        assert!(node.keys.capacity() >= 5);
        assert!(node.children.as_ref().unwrap().capacity() >= 6);
        assert!(!node.is_leaf());
        assert!(Node::<i32>::try_new(None, 5, true).unwrap().is_leaf());
    }

    #[test]
    fn search_finds_first_key_not_less() {
        let node = leaf(8, &[10, 20, 30]);
        assert_eq!(node.search(&5, &Natural), SearchResult::NotFound(0));
        assert_eq!(node.search(&10, &Natural), SearchResult::Found(0));
        assert_eq!(node.search(&25, &Natural), SearchResult::NotFound(2));
        assert_eq!(node.search(&30, &Natural), SearchResult::Found(2));
        assert_eq!(node.search(&31, &Natural), SearchResult::NotFound(3));
        assert_eq!(leaf(8, &[]).search(&1, &Natural), SearchResult::NotFound(0));
    }

    #[test]
    fn search_uses_equivalence_not_equality() {
        let by_tens = |a: &i32, b: &i32| a / 10 < b / 10;
        let node = leaf(8, &[10, 20, 30]);
        assert_eq!(node.search(&27, &by_tens), SearchResult::Found(1));
    }

    #[test]
    fn insert_keeps_children_aligned() {
        let mut node: Node<i32> = Node::try_new(None, 4, false).unwrap();
        node.push_first_child(Handle::from_index(0));
        node.push(10, Some(Handle::from_index(1)));
        node.insert(1, 20, Some(Handle::from_index(2)));
        node.insert(0, 5, Some(Handle::from_index(3)));
        assert_eq!(node.keys(), &[5, 10, 20]);
        let children: Vec<usize> = node.children().iter().map(|h| h.to_index()).collect();
        assert_eq!(children, [0, 3, 1, 2]);
    }

    #[test]
    fn split_leaf() {
        // order 3 overflowed with [5, 10, 20]
        let mut left = leaf(3, &[5, 10, 20]);
        let mut right = Node::try_new(None, 3, true).unwrap();
        let pivot = left.split_into(&mut right, 1);
        assert_eq!(pivot, 10);
        assert_eq!(left.keys(), &[5]);
        assert_eq!(right.keys(), &[20]);
    }

    #[test]
    fn split_internal_moves_right_children() {
        let mut left: Node<i32> = Node::try_new(None, 4, false).unwrap();
        left.push_first_child(Handle::from_index(0));
        for (i, k) in [10, 20, 30, 40].into_iter().enumerate() {
            left.push(k, Some(Handle::from_index(i + 1)));
        }
        let mut right = Node::try_new(None, 4, false).unwrap();
        let pivot = left.split_into(&mut right, 2);
        assert_eq!(pivot, 30);
        assert_eq!(left.keys(), &[10, 20]);
        assert_eq!(right.keys(), &[40]);
        let l: Vec<usize> = left.children().iter().map(|h| h.to_index()).collect();
        let r: Vec<usize> = right.children().iter().map(|h| h.to_index()).collect();
        assert_eq!(l, [0, 1, 2]);
        assert_eq!(r, [3, 4]);
    }

    #[test]
    fn split_order_two_leaves_empty_right() {
        let mut left = leaf(2, &[1, 2]);
        let mut right = Node::try_new(None, 2, true).unwrap();
        let pivot = left.split_into(&mut right, 1);
        assert_eq!(pivot, 2);
        assert_eq!(left.keys(), &[1]);
        assert!(right.keys().is_empty());
    }
}
