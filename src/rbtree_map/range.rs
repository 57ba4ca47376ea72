use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;

use super::RBTreeMap;
use crate::comparator::Comparator;

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Returns every entry in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// assert_eq!(map.range_all(), [(&1, &"a"), (&2, &"b"), (&3, &"c")]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn range_all(&self) -> Vec<(&K, &V)> {
        self.raw.ascending(self.raw.minimum()).collect()
    }

    /// Returns every entry in descending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// assert_eq!(map.range_all_desc(), [(&3, &"c"), (&2, &"b"), (&1, &"a")]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn range_all_desc(&self) -> Vec<(&K, &V)> {
        self.raw.descending(self.raw.maximum()).collect()
    }

    /// Returns the entries whose keys lie in the closed interval `[min, max]`, ascending.
    ///
    /// If `min` is greater than `max` the result is empty; this never panics.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = (1..=5).map(|k| (k * 10, k * 20)).collect();
    ///
    /// assert_eq!(map.range(&20, &40), [(&20, &40), (&30, &60), (&40, &80)]);
    /// assert_eq!(map.range(&15, &25), [(&20, &40)]);
    /// assert!(map.range(&40, &20).is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n + k) for k returned entries; subtrees outside the interval are never visited.
    pub fn range<Q>(&self, min: &Q, max: &Q) -> Vec<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let cmp = self.raw.comparator();
        if cmp.compare(min, max) == Ordering::Greater {
            return Vec::new();
        }

        self.raw
            .ascending(self.raw.ceiling(min))
            .take_while(|(k, _)| cmp.compare((*k).borrow(), max) != Ordering::Greater)
            .collect()
    }

    /// Returns the entries whose keys lie in the closed interval `[min, max]`, descending.
    ///
    /// If `min` is greater than `max` the result is empty; this never panics.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = (1..=5).map(|k| (k * 10, k * 20)).collect();
    ///
    /// assert_eq!(map.range_desc(&20, &40), [(&40, &80), (&30, &60), (&20, &40)]);
    /// assert!(map.range_desc(&41, &49).is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n + k) for k returned entries.
    pub fn range_desc<Q>(&self, min: &Q, max: &Q) -> Vec<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let cmp = self.raw.comparator();
        if cmp.compare(min, max) == Ordering::Greater {
            return Vec::new();
        }

        self.raw
            .descending(self.raw.floor(max))
            .take_while(|(k, _)| cmp.compare((*k).borrow(), min) != Ordering::Less)
            .collect()
    }

    /// Returns up to `count` entries in ascending order, starting at the smallest key
    /// greater than or equal to `from`.
    ///
    /// `from` does not have to be stored. Fewer than `count` entries are returned when
    /// the map runs out of larger keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = (1..=5).map(|k| (k * 10, k * 20)).collect();
    ///
    /// assert_eq!(map.range_n(2, &15), [(&20, &40), (&30, &60)]);
    /// assert_eq!(map.range_n(2, &30), [(&30, &60), (&40, &80)]);
    /// assert_eq!(map.range_n(9, &45), [(&50, &100)]);
    /// assert!(map.range_n(3, &51).is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n + count)
    pub fn range_n<Q>(&self, count: usize, from: &Q) -> Vec<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        if count == 0 {
            return Vec::new();
        }
        self.raw.ascending(self.raw.ceiling(from)).take(count).collect()
    }

    /// Returns up to `count` entries in descending order, starting at the largest key
    /// less than or equal to `from`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = (1..=5).map(|k| (k * 10, k * 20)).collect();
    ///
    /// assert_eq!(map.range_desc_n(2, &45), [(&40, &80), (&30, &60)]);
    /// assert_eq!(map.range_desc_n(5, &10), [(&10, &20)]);
    /// assert!(map.range_desc_n(1, &9).is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n + count)
    pub fn range_desc_n<Q>(&self, count: usize, from: &Q) -> Vec<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        if count == 0 {
            return Vec::new();
        }
        self.raw.descending(self.raw.floor(from)).take(count).collect()
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, "a"), (20, "b")]);
    /// assert_eq!(map.ceiling(&10), Some((&10, &"a")));
    /// assert_eq!(map.ceiling(&11), Some((&20, &"b")));
    /// assert_eq!(map.ceiling(&21), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn ceiling<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.ceiling(key).map(|h| self.raw.entry(h))
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, "a"), (20, "b")]);
    /// assert_eq!(map.floor(&20), Some((&20, &"b")));
    /// assert_eq!(map.floor(&19), Some((&10, &"a")));
    /// assert_eq!(map.floor(&9), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn floor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.floor(key).map(|h| self.raw.entry(h))
    }
}
