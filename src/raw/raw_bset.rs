use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, SearchResult};
use crate::error::Result;
use crate::less::Less;

/// Nodes allocated ahead of an insertion, one per split it can cause.
type Spares<T> = SmallVec<[Node<T>; 8]>;

/// The core B-tree implementation backing `BSet`.
pub(crate) struct RawBSet<T, L> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of stored elements.
    len: usize,
    /// Maximum number of children per node.
    order: usize,
    less: L,
}

impl<T, L> RawBSet<T, L> {
    /// Creates a new, empty tree. `order` must already be validated.
    pub(crate) const fn new(order: usize, less: L) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            order,
            less,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn order(&self) -> usize {
        self.order
    }

    pub(crate) fn less(&self) -> &L {
        &self.less
    }

    /// Number of levels, counting the root and the leaves; 0 when empty.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            height += 1;
            current = self.nodes.get(handle).children().first().copied();
        }
        height
    }

    /// Releases every node at once.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Keys a node may hold once an operation completes.
    const fn max_keys(&self) -> usize {
        self.order - 1
    }

    /// Keys left behind in an overflowing node when it splits; the next key is promoted.
    const fn split_point(&self) -> usize {
        self.max_keys().div_ceil(2)
    }

    /// Calls `f` on every element in ascending order.
    pub(crate) fn for_each<'a, F: FnMut(&'a T)>(&'a self, mut f: F) {
        if let Some(root) = self.root {
            self.walk(root, &mut f);
        }
    }

    fn walk<'a, F: FnMut(&'a T)>(&'a self, handle: Handle, f: &mut F) {
        let node = self.nodes.get(handle);
        let children = node.children();
        for (i, key) in node.keys().iter().enumerate() {
            if let Some(&child) = children.get(i) {
                self.walk(child, f);
            }
            f(key);
        }
        if let Some(&last) = children.last() {
            self.walk(last, f);
        }
    }

    /// Calls `f` on every element in ascending order with mutable access.
    pub(crate) fn for_each_mut<F: FnMut(&mut T)>(&mut self, mut f: F) {
        if let Some(root) = self.root {
            Self::walk_mut(&mut self.nodes, root, &mut f);
        }
    }

    fn walk_mut<F: FnMut(&mut T)>(nodes: &mut Arena<Node<T>>, handle: Handle, f: &mut F) {
        let key_count = nodes.get(handle).key_count();
        let is_leaf = nodes.get(handle).is_leaf();
        for i in 0..=key_count {
            if !is_leaf {
                let child = nodes.get(handle).child(i);
                Self::walk_mut(nodes, child, f);
            }
            if i < key_count {
                f(nodes.get_mut(handle).key_mut(i));
            }
        }
    }
}

impl<T, L: Less<T>> RawBSet<T, L> {
    /// Searches for an element equivalent to `key`, returning the node and index holding it.
    pub(crate) fn search(&self, key: &T) -> Option<(Handle, usize)> {
        let mut current = self.root?;

        loop {
            let node = self.nodes.get(current);
            match node.search(key, &self.less) {
                SearchResult::Found(index) => return Some((current, index)),
                SearchResult::NotFound(_) if node.is_leaf() => return None,
                SearchResult::NotFound(index) => current = node.child(index),
            }
        }
    }

    /// Returns the stored element equivalent to `key`.
    pub(crate) fn get(&self, key: &T) -> Option<&T> {
        let (handle, index) = self.search(key)?;
        Some(self.nodes.get(handle).key(index))
    }

    pub(crate) fn contains(&self, key: &T) -> bool {
        self.search(key).is_some()
    }

    /// Inserts `key` unless an equivalent element is already stored.
    ///
    /// Returns `Ok(true)` if the element was added and `Ok(false)` if an equivalent one was
    /// present (the stored element is kept). On `Err` the tree is unchanged.
    pub(crate) fn try_insert(&mut self, key: T) -> Result<bool> {
        // Handle empty tree case
        let Some(root) = self.root else {
            self.nodes.try_reserve(1).inspect_err(|e| tracing::debug!(error = %e, "cannot allocate root"))?;
            let mut leaf = Node::try_new(None, self.order, true)?;
            leaf.push(key, None);
            self.root = Some(self.nodes.alloc(leaf));
            self.len = 1;
            return Ok(true);
        };

        // Descend to the leaf that would hold `key`
        let mut current = root;
        let index = loop {
            let node = self.nodes.get(current);
            match node.search(&key, &self.less) {
                SearchResult::Found(_) => return Ok(false),
                SearchResult::NotFound(index) if node.is_leaf() => break index,
                SearchResult::NotFound(index) => current = node.child(index),
            }
        };

        let spares = self
            .reserve_splits(current)
            .inspect_err(|e| tracing::debug!(error = %e, len = self.len, "cannot reserve nodes for insertion"))?;
        self.insert_into_node(current, index, key, None, spares);
        self.len += 1;
        Ok(true)
    }

    /// Allocates every node that inserting into `leaf` can create.
    ///
    /// Each full node on the way up from `leaf` splits and needs a right sibling; if the run of
    /// full nodes reaches the root, a new root is needed as well. Spares are returned in the
    /// order the splits consume them, leaf level first.
    fn reserve_splits(&mut self, leaf: Handle) -> Result<Spares<T>> {
        let mut splits = 0;
        let mut reaches_root = false;
        let mut current = Some(leaf);
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.key_count() < self.max_keys() {
                break;
            }
            splits += 1;
            current = node.parent();
            reaches_root = current.is_none();
        }

        let needed = splits + usize::from(reaches_root);
        self.nodes.try_reserve(needed)?;
        let mut spares = Spares::new();
        spares.try_reserve_exact(needed)?;
        for level in 0..needed {
            spares.push(Node::try_new(None, self.order, level == 0)?);
        }
        Ok(spares)
    }

    /// Places `key` (and the child to its right, for internal nodes) at `index` in `handle`,
    /// splitting and promoting pivots upward while nodes overflow.
    fn insert_into_node(
        &mut self,
        mut handle: Handle,
        mut index: usize,
        mut key: T,
        mut right_child: Option<Handle>,
        spares: Spares<T>,
    ) {
        let max_keys = self.max_keys();
        let split_point = self.split_point();
        let mut spares = spares.into_iter();

        loop {
            let node = self.nodes.get_mut(handle);
            node.insert(index, key, right_child);
            if node.key_count() <= max_keys {
                return;
            }

            let mut right = spares.next().expect("`RawBSet::insert_into_node()` - missing spare sibling");
            let pivot = node.split_into(&mut right, split_point);
            let parent = node.parent();
            right.set_parent(parent);
            let right_handle = self.nodes.alloc(right);
            self.adopt_children(right_handle);

            tracing::trace!(node = ?handle, sibling = ?right_handle, "split node");

            match parent {
                Some(parent) => {
                    index = match self.nodes.get(parent).search(&pivot, &self.less) {
                        SearchResult::Found(i) | SearchResult::NotFound(i) => i,
                    };
                    handle = parent;
                    key = pivot;
                    right_child = Some(right_handle);
                }
                None => {
                    let mut new_root = spares.next().expect("`RawBSet::insert_into_node()` - missing spare root");
                    new_root.push_first_child(handle);
                    new_root.push(pivot, Some(right_handle));
                    let root_handle = self.nodes.alloc(new_root);
                    self.nodes.get_mut(handle).set_parent(Some(root_handle));
                    self.nodes.get_mut(right_handle).set_parent(Some(root_handle));
                    self.root = Some(root_handle);

                    tracing::trace!(root = ?root_handle, height = self.height(), "promoted new root");
                    return;
                }
            }
        }
    }

    /// Points the parent link of each of `handle`'s children back at `handle`.
    fn adopt_children(&mut self, handle: Handle) {
        for i in 0..self.nodes.get(handle).children().len() {
            let child = self.nodes.get(handle).child(i);
            self.nodes.get_mut(child).set_parent(Some(handle));
        }
    }
}
