use super::RBTreeMap;
use crate::comparator::NaturalOrder;
use crate::raw::RawRBTreeMap;

impl<K, V> RBTreeMap<K, V> {
    /// Creates an empty map with capacity for at least `capacity` entries.
    ///
    /// Slots freed by removals are reused before the map allocates again.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = RBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeMap::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Creates an empty map ordered by `cmp`, with capacity for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::with_capacity_and_comparator(16, |a: &u32, b: &u32| b.cmp(a));
    /// assert!(map.capacity() >= 16);
    ///
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    /// assert_eq!(map.first_key_value(), Some((&2, &"two")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        RBTreeMap {
            raw: RawRBTreeMap::with_capacity(capacity, cmp),
        }
    }

    /// Returns how many entries the map can hold before it reallocates.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
