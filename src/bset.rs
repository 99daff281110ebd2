use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, Result};
use crate::less::{Less, Natural};
use crate::raw::RawBSet;

/// An ordered set based on a B-tree of runtime-chosen order.
///
/// The *order* is the maximum number of children of a node; every node therefore holds at most
/// `order - 1` elements. Elements are kept sorted by the set's [`Less`] predicate and two
/// elements that are equivalent under it are never both stored: the first one inserted wins.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the set's predicate, changes while it is in the set. This
/// is only possible through [`for_each_mut`](BSet::for_each_mut), interior mutability, or a
/// predicate that depends on global state. The behavior resulting from such a logic error is not
/// specified, but will be encapsulated to the `BSet` that observed the logic error and not result
/// in undefined behavior.
///
/// There is no element removal and no iterator; [`for_each`](BSet::for_each) visits the
/// elements in ascending order.
///
/// # Examples
///
/// ```
/// use bset::BSet;
///
/// let mut books = BSet::new(8).unwrap();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains(&"The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// books.for_each(|book| println!("{book}"));
/// ```
pub struct BSet<T, L = Natural> {
    raw: RawBSet<T, L>,
}

impl<T: Ord> BSet<T> {
    /// Makes a new, empty `BSet` ordered by `T`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOrder`] if `order` is less than 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::{BSet, Error};
    ///
    /// let set: BSet<i32> = BSet::new(4).unwrap();
    /// assert!(set.is_empty());
    /// assert!(matches!(BSet::<i32>::new(1), Err(Error::InvalidOrder(1))));
    /// ```
    pub fn new(order: usize) -> Result<Self> {
        Self::with_less(order, Natural)
    }
}

impl<T, L> BSet<T, L> {
    /// Makes a new, empty `BSet` ordered by `less`.
    ///
    /// `less(a, b)` must return `true` iff `a` strictly precedes `b`, and must be a strict weak
    /// ordering.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOrder`] if `order` is less than 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::BSet;
    ///
    /// let mut set = BSet::<i32, _>::with_less(3, |a: &i32, b: &i32| a > b).unwrap();
    /// set.extend([1, 3, 2]);
    ///
    /// let mut seen = Vec::new();
    /// set.for_each(|x| seen.push(*x));
    /// assert_eq!(seen, [3, 2, 1]);
    /// ```
    pub fn with_less(order: usize, less: L) -> Result<Self>
    where
        L: Less<T>,
    {
        if order < 2 {
            return Err(Error::InvalidOrder(order));
        }
        Ok(BSet {
            raw: RawBSet::new(order, less),
        })
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::BSet;
    ///
    /// let mut v = BSet::new(3).unwrap();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the order the set was created with.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.raw.order()
    }

    /// Returns the number of levels in the tree: 0 for an empty set, 1 while everything fits
    /// in the root.
    ///
    /// This is an extension mostly useful for tests and diagnostics.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns a reference to the set's ordering predicate.
    #[must_use]
    pub fn less(&self) -> &L {
        self.raw.less()
    }

    /// Clears the set, releasing every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::BSet;
    ///
    /// let mut v = BSet::new(3).unwrap();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Calls `f` on each element of the set, in ascending order.
    ///
    /// Per-call state (the "context" of the visit) is whatever the closure captures.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::BSet;
    ///
    /// let mut set = BSet::<i32>::new(3).unwrap();
    /// set.extend([10, 20, 5]);
    ///
    /// let mut total = 0;
    /// set.for_each(|x| total += x);
    /// assert_eq!(total, 35);
    /// ```
    pub fn for_each<'a, F: FnMut(&'a T)>(&'a self, f: F) {
        self.raw.for_each(f);
    }

    /// Calls `f` on each element of the set, in ascending order, with mutable access.
    ///
    /// `f` may change parts of an element that its ordering ignores; changing its position in
    /// the ordering is a logic error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::BSet;
    ///
    /// #[derive(Debug)]
    /// struct Entry { id: u32, hits: u32 }
    ///
    /// let mut set = BSet::with_less(4, |a: &Entry, b: &Entry| a.id < b.id).unwrap();
    /// set.insert(Entry { id: 2, hits: 0 });
    /// set.insert(Entry { id: 1, hits: 0 });
    ///
    /// set.for_each_mut(|e| e.hits += e.id);
    /// assert_eq!(set.get(&Entry { id: 2, hits: 0 }).map(|e| e.hits), Some(2));
    /// ```
    pub fn for_each_mut<F: FnMut(&mut T)>(&mut self, f: F) {
        self.raw.for_each_mut(f);
    }
}

impl<T, L: Less<T>> BSet<T, L> {
    /// Returns `true` if the set contains an element equivalent to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::BSet;
    ///
    /// let mut set = BSet::<i32>::new(3).unwrap();
    /// set.extend([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.raw.contains(value)
    }

    /// Returns a reference to the stored element equivalent to `value`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::BSet;
    ///
    /// let mut set = BSet::with_less(3, |a: &(u8, char), b: &(u8, char)| a.0 < b.0).unwrap();
    /// set.insert((1, 'a'));
    /// assert_eq!(set.get(&(1, '?')), Some(&(1, 'a')));
    /// assert_eq!(set.get(&(2, '?')), None);
    /// ```
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.raw.get(value)
    }

    /// Copies the stored element equivalent to `value` into `out`.
    ///
    /// Returns `true` and overwrites `out` if such an element exists; otherwise returns `false`
    /// and leaves `out` untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::BSet;
    ///
    /// let mut set = BSet::with_less(3, |a: &(u8, char), b: &(u8, char)| a.0 < b.0).unwrap();
    /// set.insert((7, 'x'));
    ///
    /// let mut out = (0, ' ');
    /// assert!(set.get_into(&(7, '?'), &mut out));
    /// assert_eq!(out, (7, 'x'));
    /// assert!(!set.get_into(&(8, '?'), &mut out));
    /// assert_eq!(out, (7, 'x'));
    /// ```
    pub fn get_into(&self, value: &T, out: &mut T) -> bool
    where
        T: Clone,
    {
        match self.raw.get(value) {
            Some(stored) => {
                out.clone_from(stored);
                true
            }
            None => false,
        }
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equivalent value, `true` is returned.
    /// - If the set already contained an equivalent value, `false` is returned, and the set is
    ///   not modified: the stored value is kept and `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if node storage cannot be allocated or the node arena is full. Use
    /// [`try_insert`](BSet::try_insert) to handle those cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::BSet;
    ///
    /// let mut set = BSet::new(3).unwrap();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        match self.raw.try_insert(value) {
            Ok(inserted) => inserted,
            Err(err) => panic!("`BSet::insert()` - {err}"),
        }
    }

    /// Adds a value to the set, reporting allocation failure instead of panicking.
    ///
    /// Returns `Ok(true)` if the value was newly inserted and `Ok(false)` if an equivalent value
    /// was already present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocFailed`] or [`Error::CapacityExceeded`] if the nodes the insertion
    /// needs cannot be created. The set is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use bset::BSet;
    ///
    /// let mut set = BSet::new(3).unwrap();
    /// assert_eq!(set.try_insert(7), Ok(true));
    /// assert_eq!(set.try_insert(7), Ok(false));
    /// ```
    pub fn try_insert(&mut self, value: T) -> Result<bool> {
        self.raw.try_insert(value)
    }
}

impl<T, L: Less<T>> Extend<T> for BSet<T, L> {
    #[inline]
    fn extend<Iter: IntoIterator<Item = T>>(&mut self, iter: Iter) {
        iter.into_iter().for_each(move |elem| {
            self.insert(elem);
        });
    }
}

impl<'a, T: 'a + Copy, L: Less<T>> Extend<&'a T> for BSet<T, L> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: fmt::Debug, L> fmt::Debug for BSet<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut elements = Vec::with_capacity(self.len());
        self.for_each(|elem| elements.push(elem));
        f.debug_set().entries(elements).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_order_below_two() {
        assert!(matches!(BSet::<u8>::new(0), Err(Error::InvalidOrder(0))));
        assert!(matches!(BSet::<u8>::new(1), Err(Error::InvalidOrder(1))));
        assert!(BSet::<u8>::new(2).is_ok());
    }

    #[test]
    fn debug_lists_elements_in_order() {
        let mut set = BSet::<i32>::new(3).unwrap();
        set.extend([3, 1, 2]);
        assert_eq!(format!("{set:?}"), "{1, 2, 3}");
    }

    #[test]
    fn extend_by_reference() {
        let mut set = BSet::<i32>::new(4).unwrap();
        set.extend(&[5, 4, 5]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.order(), 4);
    }
}
