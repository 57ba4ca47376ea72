use core::cmp::Ordering;

/// A total order over keys, injected into a map at construction time.
///
/// Every key comparison a map performs goes through its comparator, never through `Eq` or
/// identity. Implementations must be a valid total order (consistent, antisymmetric and
/// transitive); the map does not detect violations, and its behavior is unspecified if
/// the order is broken. It is also a logic error for a comparator's answer about two keys to
/// change while both are in the map.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator:
///
/// ```
/// use rbtree_map::RBTreeMap;
///
/// let mut map = RBTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// assert_eq!(map.first_key_value(), Some((&2, &"two")));
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The comparator used by [`RBTreeMap::new`](crate::RBTreeMap::new): the key type's own [`Ord`].
///
/// `NaturalOrder` orders every `T: Ord`, so maps using it can be queried with any borrowed
/// form of their key type, e.g. `&str` lookups in a map keyed by `String`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NaturalOrder;

impl<T: ?Sized + Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
