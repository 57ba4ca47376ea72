use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use alloc::string::String;
use alloc::vec::Vec;

use crate::comparator::{Comparator, NaturalOrder};
use crate::raw::RawRBTreeMap;

mod capacity;
mod range;

/// An ordered map based on a [red-black tree].
///
/// Keys are kept sorted under a [`Comparator`] chosen at construction time. [`RBTreeMap::new`]
/// uses the key type's [`Ord`] ([`NaturalOrder`]); [`RBTreeMap::with_comparator`] accepts any
/// other total order, including a plain closure.
///
/// Lookups, insertion and removal take O(log n) comparisons. Traversals such as
/// [`RBTreeMap::keys`], [`RBTreeMap::range_all`] or [`RBTreeMap::range_n`] are materialized:
/// they return a `Vec` built before the call returns rather than a lazy cursor.
///
/// Absence is always reported with `None`, never with a sentinel value, so a stored `0` or
/// empty string is distinguishable from a missing key.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the comparator, changes while it is in the map. The behavior
/// resulting from such a logic error is not specified, but will be encapsulated to the
/// `RBTreeMap` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rbtree_map::RBTreeMap;
///
/// let mut stock = RBTreeMap::new();
///
/// stock.insert("apples", 3);
/// stock.insert("pears", 0);
/// stock.insert("plums", 12);
///
/// // A stored zero is still found.
/// assert_eq!(stock.get("pears"), Some(&0));
/// assert_eq!(stock.get("kiwis"), None);
///
/// // Updating an existing key hands back the previous value.
/// assert_eq!(stock.insert("apples", 5), Some(3));
///
/// // Everything, in key order.
/// assert_eq!(stock.keys(), [&"apples", &"pears", &"plums"]);
///
/// // Drain from the largest key down.
/// while let Some((fruit, count)) = stock.pop_last() {
///     println!("{fruit}: {count}");
/// }
/// assert!(stock.is_empty());
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RBTreeMap<K, V, C = NaturalOrder> {
    raw: RawRBTreeMap<K, V, C>,
}

/// An owning iterator over the entries of an `RBTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> RBTreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap` ordered by the key type's [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> RBTreeMap<K, V> {
        RBTreeMap::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Makes a new, empty `RBTreeMap` that orders its keys with `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// // Case-insensitive keys.
    /// let mut map = RBTreeMap::with_comparator(|a: &String, b: &String| {
    ///     a.to_lowercase().cmp(&b.to_lowercase())
    /// });
    ///
    /// map.insert(String::from("Beta"), 2);
    /// map.insert(String::from("alpha"), 1);
    /// assert_eq!(map.insert(String::from("BETA"), 3), Some(2));
    ///
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.keys(), [&String::from("alpha"), &String::from("Beta")]);
    /// ```
    #[must_use]
    pub const fn with_comparator(cmp: C) -> Self {
        RBTreeMap {
            raw: RawRBTreeMap::new(cmp),
        }
    }

    /// Returns the comparator this map orders its keys with.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Clears the map, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, as long as the
    /// comparator orders the borrowed form the same way it orders the key type.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.search(key).map(|h| self.raw.entry(h).1)
    }

    /// Returns the stored key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.search(key).map(|h| self.raw.entry(h))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.value_mut(handle))
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.search(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is replaced in place and the
    /// old value is returned. The stored key is not updated and the tree is not
    /// restructured.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n), with amortized O(1) rotations.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        C: Comparator<K>,
    {
        self.raw.insert(key, value)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map. Removing an absent key is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.remove_entry(key)
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.minimum().map(|h| self.raw.entry(h))
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.last_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.maximum().map(|h| self.raw.entry(h))
    }

    /// Removes and returns the first element in the map.
    /// The key of this element is the minimum key that was in the map.
    ///
    /// # Examples
    ///
    /// Draining elements in ascending order, while keeping a usable map each iteration.
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_first() {
    ///     assert!(map.keys().into_iter().all(|k| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let handle = self.raw.minimum()?;
        Some(self.raw.remove_handle(handle))
    }

    /// Removes and returns the last element in the map.
    /// The key of this element is the maximum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_last() {
    ///     assert!(map.keys().into_iter().all(|k| *k < key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let handle = self.raw.maximum()?;
        Some(self.raw.remove_handle(handle))
    }

    /// Returns all keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// assert_eq!(a.keys(), [&1, &2]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn keys(&self) -> Vec<&K> {
        self.raw.ascending(self.raw.minimum()).map(|(k, _)| k).collect()
    }

    /// Returns all values, in ascending order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// assert_eq!(a.values(), [&"hello", &"goodbye"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn values(&self) -> Vec<&V> {
        self.raw.ascending(self.raw.minimum()).map(|(_, v)| v).collect()
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Renders the tree's shape for debugging: one node per line, indented by depth,
    /// with each node's color.
    ///
    /// The format is unstable and meant for humans only. It is never empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, 'b'), (1, 'a'), (3, 'c')]);
    /// let dump = map.to_debug_string();
    /// assert_eq!(dump.lines().count(), 3);
    /// ```
    #[must_use]
    pub fn to_debug_string(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.raw.write_structure(&mut out);
        out
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RBTreeMap<K, V, C> {
    fn clone(&self) -> Self {
        RBTreeMap { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RBTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.range_all() == other.range_all()
    }
}

impl<K: Eq, V: Eq, C> Eq for RBTreeMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RBTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.range_all()).finish()
    }
}

impl<K, V, C: Default> Default for RBTreeMap<K, V, C> {
    fn default() -> Self {
        RBTreeMap::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for RBTreeMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RBTreeMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RBTreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, Q, V, C> Index<&Q> for RBTreeMap<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, C> IntoIterator for &'a RBTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = alloc::vec::IntoIter<(&'a K, &'a V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.range_all().into_iter()
    }
}

impl<K, V, C> IntoIterator for RBTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `rbtree_map::IntoIter`.
    ///
    /// ```
    /// let iter: rbtree_map::rbtree_map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}
