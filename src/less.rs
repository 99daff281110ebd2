/// A strict weak ordering over `T`.
///
/// `less(a, b)` must return `true` iff `a` strictly precedes `b`. The relation has to be
/// irreflexive, asymmetric and transitive, and incomparability must be transitive as well.
/// Two elements for which neither precedes the other are *equivalent* and a [`BSet`] stores at
/// most one of them.
///
/// Any `Fn(&T, &T) -> bool` closure is a `Less<T>`.
///
/// # Examples
///
/// ```
/// use bset::{Less, Natural};
///
/// assert!(Natural.less(&1, &2));
/// assert!(Natural.equivalent(&2, &2));
///
/// let by_abs = |a: &i32, b: &i32| a.abs() < b.abs();
/// assert!(by_abs.equivalent(&-3, &3));
/// assert!(by_abs.less(&-2, &3));
/// ```
///
/// [`BSet`]: crate::BSet
pub trait Less<T: ?Sized> {
    /// Returns `true` if `a` strictly precedes `b`.
    fn less(&self, a: &T, b: &T) -> bool;

    /// Returns `true` if neither element precedes the other.
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

impl<T: ?Sized, F> Less<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// The ordering given by `T`'s [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: ?Sized + Ord> Less<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}
