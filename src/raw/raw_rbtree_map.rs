use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};
use crate::comparator::Comparator;

/// The red-black tree backing `RBTreeMap`.
///
/// Nodes live in an arena and refer to each other by [`Handle`]. Child links own in the
/// logical sense (a node is reachable only through its parent), parent links are plain
/// back-references used by the fixups and by successor/predecessor walks.
#[derive(Clone)]
pub(crate) struct RawRBTreeMap<K, V, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of key-value pairs in the tree.
    len: usize,
    /// Total order applied to every key comparison.
    cmp: C,
}

impl<K, V, C> RawRBTreeMap<K, V, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            cmp,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            cmp,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        log::debug!("clearing tree of {} entries", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Moves every entry out of the tree in ascending key order, leaving it empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        log::debug!("draining tree of {} entries", self.len);
        let order: Vec<Handle> = core::iter::successors(self.minimum(), |&h| self.successor(h)).collect();
        let entries = order.into_iter().map(|h| self.nodes.take(h).into_entry()).collect();

        self.nodes.clear();
        self.root = None;
        self.len = 0;

        entries
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Returns the key and value stored at `handle`.
    #[inline]
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (node.key(), node.value())
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        self.node_mut(handle).value_mut()
    }

    #[inline]
    fn parent(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).parent()
    }

    /// Absent children count as black.
    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.node(h).color() == Color::Red)
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).set_color(color);
    }

    /// Returns which child of `parent` the (possibly absent) `child` is.
    #[inline]
    fn side_of(&self, child: Option<Handle>, parent: Handle) -> Side {
        if self.node(parent).left() == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    // ─── Navigation ─────────────────────────────────────────────────────────

    /// Follows `side` links from `handle` until there are none left.
    fn extreme_from(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(next) = self.node(handle).child(side) {
            handle = next;
        }
        handle
    }

    /// Returns the in-order neighbour of `handle` in direction `side`.
    fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(side) {
            return Some(self.extreme_from(child, side.opposite()));
        }

        let mut current = handle;
        let mut parent = self.parent(current);
        while let Some(p) = parent {
            if self.node(p).child(side.opposite()) == Some(current) {
                return Some(p);
            }
            current = p;
            parent = self.parent(p);
        }
        None
    }

    /// Returns the node holding the smallest key.
    pub(crate) fn minimum(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme_from(root, Side::Left))
    }

    /// Returns the node holding the largest key.
    pub(crate) fn maximum(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme_from(root, Side::Right))
    }

    /// Returns the node holding the next larger key.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    /// Returns the node holding the next smaller key.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    /// Iterates entries in ascending key order, starting at `start` inclusive.
    pub(crate) fn ascending(&self, start: Option<Handle>) -> impl Iterator<Item = (&K, &V)> {
        core::iter::successors(start, move |&h| self.successor(h)).map(move |h| self.entry(h))
    }

    /// Iterates entries in descending key order, starting at `start` inclusive.
    pub(crate) fn descending(&self, start: Option<Handle>) -> impl Iterator<Item = (&K, &V)> {
        core::iter::successors(start, move |&h| self.predecessor(h)).map(move |h| self.entry(h))
    }

    // ─── Rotations ──────────────────────────────────────────────────────────

    /// Puts `new` where `old` hangs from its parent (or at the root).
    fn replace_in_parent(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.parent(old);
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_of(Some(old), p);
                self.node_mut(p).set_child(side, new);
            }
        }
        if let Some(n) = new {
            self.node_mut(n).set_parent(parent);
        }
    }

    /// Rotates the subtree at `pivot` toward `side`: the opposite child is promoted and
    /// `pivot` becomes its `side` child.
    fn rotate(&mut self, pivot: Handle, side: Side) {
        log::trace!("rotate {side:?} at {pivot:?}");
        let other = side.opposite();
        let promoted = self.node(pivot).child(other).expect("`RawRBTreeMap::rotate()` - nothing to promote!");

        let inner = self.node(promoted).child(side);
        self.node_mut(pivot).set_child(other, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(pivot));
        }

        self.replace_in_parent(pivot, Some(promoted));
        self.node_mut(promoted).set_child(side, Some(pivot));
        self.node_mut(pivot).set_parent(Some(promoted));
    }

    // ─── Removal ────────────────────────────────────────────────────────────

    /// Unlinks the entry at `handle` and returns it, rebalancing as needed.
    pub(crate) fn remove_handle(&mut self, handle: Handle) -> (K, V) {
        let node = self.node(handle);
        let target = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                // Trade places with the in-order successor, which has no left child.
                let successor = self.extreme_from(right, Side::Left);
                let (a, b) = self.nodes.get_pair_mut(handle, successor);
                a.swap_entry(b);
                successor
            }
            _ => handle,
        };

        let node = self.node(target);
        let child = node.left().or(node.right());
        let parent = node.parent();
        let color = node.color();

        self.replace_in_parent(target, child);
        let entry = self.nodes.take(target).into_entry();
        self.len -= 1;

        if color == Color::Black {
            self.remove_fixup(child, parent);
        }
        debug_assert_eq!(self.nodes.len(), self.len);

        entry
    }

    /// Restores the black-height after a black node was spliced out above `x`.
    ///
    /// `x` may be absent, so its parent is tracked separately.
    fn remove_fixup(&mut self, mut x: Option<Handle>, mut parent: Option<Handle>) {
        while !self.is_red(x) {
            let Some(p) = parent else { break };
            let side = self.side_of(x, p);
            let other = side.opposite();

            // x carries a missing black, so its sibling's subtree holds at least one node.
            let mut sibling = self.node(p).child(other).expect("`RawRBTreeMap::remove_fixup()` - no sibling!");

            if self.is_red(Some(sibling)) {
                log::trace!("remove fixup: red sibling {sibling:?}");
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                sibling = self.node(p).child(other).expect("`RawRBTreeMap::remove_fixup()` - no sibling!");
            }

            let near = self.node(sibling).child(side);
            let far = self.node(sibling).child(other);

            if !self.is_red(near) && !self.is_red(far) {
                log::trace!("remove fixup: push deficiency up from {p:?}");
                self.set_color(sibling, Color::Red);
                x = Some(p);
                parent = self.parent(p);
                continue;
            }

            if !self.is_red(far) {
                log::trace!("remove fixup: red near nephew under {sibling:?}");
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, other);
                sibling = self.node(p).child(other).expect("`RawRBTreeMap::remove_fixup()` - no sibling!");
            }

            log::trace!("remove fixup: red far nephew under {sibling:?}");
            let parent_color = self.node(p).color();
            self.set_color(sibling, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far) = self.node(sibling).child(other) {
                self.set_color(far, Color::Black);
            }
            self.rotate(p, side);
            x = self.root;
            break;
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    // ─── Insertion ──────────────────────────────────────────────────────────

    /// Restores the red-black invariants after `node` was attached as a red leaf.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.parent(node) {
            if !self.is_red(Some(parent)) {
                break;
            }

            // The root is black, so a red parent always has a parent of its own.
            let grandparent = self.parent(parent).expect("`RawRBTreeMap::insert_fixup()` - red root!");
            let side = self.side_of(Some(parent), grandparent);
            let uncle = self.node(grandparent).child(side.opposite());

            if self.is_red(uncle) {
                log::trace!("insert fixup: recolor below {grandparent:?}");
                self.set_color(parent, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if self.side_of(Some(node), parent) != side {
                // Inner grandchild: turn it into the outer case.
                node = parent;
                self.rotate(node, side);
            }

            let parent = self.parent(node).expect("`RawRBTreeMap::insert_fixup()` - detached node!");
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    // ─── Diagnostics ────────────────────────────────────────────────────────

    /// Writes an indented pre-order dump of the tree, one node per line.
    pub(crate) fn write_structure<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        let Some(root) = self.root else {
            return out.write_str("(empty)\n");
        };

        let mut stack: SmallVec<[(Handle, usize, &str); 64]> = SmallVec::new();
        stack.push((root, 0, "*"));

        while let Some((handle, depth, label)) = stack.pop() {
            let node = self.node(handle);
            let color = match node.color() {
                Color::Red => "red",
                Color::Black => "black",
            };
            writeln!(out, "{:indent$}{label} {:?} => {:?} ({color})", "", node.key(), node.value(), indent = depth * 2)?;

            if let Some(right) = node.right() {
                stack.push((right, depth + 1, "R"));
            }
            if let Some(left) = node.left() {
                stack.push((left, depth + 1, "L"));
            }
        }
        Ok(())
    }
}

impl<K, V, C> RawRBTreeMap<K, V, C> {
    /// Finds the node whose key compares equal to `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            current = match self.cmp.compare(key, node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(h),
            };
        }
        None
    }

    /// Finds the node with the smallest key `>= key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            match self.cmp.compare(key, node.key().borrow()) {
                Ordering::Less => {
                    best = Some(h);
                    current = node.left();
                }
                Ordering::Greater => current = node.right(),
                Ordering::Equal => return Some(h),
            }
        }
        best
    }

    /// Finds the node with the largest key `<= key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            match self.cmp.compare(key, node.key().borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Greater => {
                    best = Some(h);
                    current = node.right();
                }
                Ordering::Equal => return Some(h),
            }
        }
        best
    }

    /// Removes the entry whose key compares equal to `key`.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.search(key)?;
        Some(self.remove_handle(handle))
    }
}

impl<K, V, C: Comparator<K>> RawRBTreeMap<K, V, C> {
    /// Inserts a key-value pair into the tree.
    /// Returns the old value if the key was already present; the stored key is kept.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(h) = current {
            let node = self.node(h);
            side = match self.cmp.compare(&key, node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    return Some(core::mem::replace(self.node_mut(h).value_mut(), value));
                }
            };
            parent = Some(h);
            current = node.child(side);
        }

        let handle = self.nodes.alloc(Node::new(key, value, parent));
        match parent {
            None => self.root = Some(handle),
            Some(p) => self.node_mut(p).set_child(side, Some(handle)),
        }
        self.len += 1;

        self.insert_fixup(handle);
        debug_assert_eq!(self.nodes.len(), self.len);

        None
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::uninlined_format_args, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use proptest::prelude::*;

    impl<K: fmt::Debug, V, C: Comparator<K>> RawRBTreeMap<K, V, C> {
        /// Validates all red-black invariants. Panics with a descriptive message if any are violated.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();

            let Some(root) = self.root else {
                assert_eq!(self.len, 0, "Empty tree should have len 0");
                assert_eq!(self.nodes.len(), 0, "Empty tree should hold no nodes");
                return;
            };

            if self.node(root).color() != Color::Black {
                errors.push(alloc::format!("Root {:?} is red", root));
            }
            if self.node(root).parent().is_some() {
                errors.push(alloc::format!("Root {:?} has a parent", root));
            }

            let mut count = 0;
            self.validate_node(root, None, None, &mut count, &mut errors);

            if count != self.len {
                errors.push(alloc::format!("len mismatch: self.len={}, reachable={}", self.len, count));
            }
            if self.nodes.len() != self.len {
                errors.push(alloc::format!("arena mismatch: arena.len={}, self.len={}", self.nodes.len(), self.len));
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        /// Returns the black-height of the subtree at `handle`.
        fn validate_node(
            &self,
            handle: Handle,
            lower: Option<&K>,
            upper: Option<&K>,
            count: &mut usize,
            errors: &mut Vec<String>,
        ) -> usize {
            let node = self.node(handle);
            *count += 1;

            if lower.is_some_and(|lo| self.cmp.compare(lo, node.key()) != Ordering::Less) {
                errors.push(alloc::format!("Key {:?} not above its lower bound {:?}", node.key(), lower));
            }
            if upper.is_some_and(|hi| self.cmp.compare(node.key(), hi) != Ordering::Less) {
                errors.push(alloc::format!("Key {:?} not below its upper bound {:?}", node.key(), upper));
            }

            let mut heights = [0usize; 2];
            for (slot, side) in [Side::Left, Side::Right].into_iter().enumerate() {
                let Some(child) = node.child(side) else {
                    continue;
                };

                if self.parent(child) != Some(handle) {
                    errors.push(alloc::format!("Child {:?} of {:?} has parent {:?}", child, handle, self.parent(child)));
                }
                if node.color() == Color::Red && self.is_red(Some(child)) {
                    errors.push(alloc::format!("Red node {:?} has red child {:?}", node.key(), self.node(child).key()));
                }

                let (lo, hi) = match side {
                    Side::Left => (lower, Some(node.key())),
                    Side::Right => (Some(node.key()), upper),
                };
                heights[slot] = self.validate_node(child, lo, hi, count, errors);
            }

            if heights[0] != heights[1] {
                errors.push(alloc::format!(
                    "Black-height mismatch at {:?}: left={}, right={}",
                    node.key(),
                    heights[0],
                    heights[1]
                ));
            }

            heights[0] + usize::from(node.color() == Color::Black)
        }

        fn height(&self, handle: Option<Handle>) -> usize {
            handle.map_or(0, |h| 1 + self.height(self.node(h).left()).max(self.height(self.node(h).right())))
        }
    }

    type Tree = RawRBTreeMap<i32, i32, NaturalOrder>;

    fn keys_ascending(tree: &Tree) -> Vec<i32> {
        tree.ascending(tree.minimum()).map(|(k, _)| *k).collect()
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
        PopMin,
        PopMax,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0i32..1000).prop_map(Op::Insert),
            2 => (0i32..1000).prop_map(Op::Remove),
            1 => Just(Op::PopMin),
            1 => Just(Op::PopMax),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn tree_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..500)) {
            let mut tree = Tree::new(NaturalOrder);
            let mut model: BTreeMap<i32, i32> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        prop_assert_eq!(tree.insert(key, key * 2), model.insert(key, key * 2));
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(tree.remove_entry(&key), model.remove_entry(&key));
                    }
                    Op::PopMin => {
                        let popped = tree.minimum().map(|h| tree.remove_handle(h));
                        prop_assert_eq!(popped, model.pop_first());
                    }
                    Op::PopMax => {
                        let popped = tree.maximum().map(|h| tree.remove_handle(h));
                        prop_assert_eq!(popped, model.pop_last());
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }

            let expected: Vec<i32> = model.keys().copied().collect();
            prop_assert_eq!(keys_ascending(&tree), expected);
        }

        #[test]
        fn ceiling_and_floor_match_btreemap(
            keys in prop::collection::vec(0i32..1000, 0..200),
            probes in prop::collection::vec(-10i32..1010, 50),
        ) {
            let mut tree = Tree::new(NaturalOrder);
            let mut model: BTreeMap<i32, i32> = BTreeMap::new();
            for key in keys {
                tree.insert(key, key * 2);
                model.insert(key, key * 2);
            }

            for probe in probes {
                let ceiling = tree.ceiling(&probe).map(|h| *tree.entry(h).0);
                let floor = tree.floor(&probe).map(|h| *tree.entry(h).0);
                prop_assert_eq!(ceiling, model.range(probe..).next().map(|(k, _)| *k), "ceiling({})", probe);
                prop_assert_eq!(floor, model.range(..=probe).next_back().map(|(k, _)| *k), "floor({})", probe);
            }
        }

        #[test]
        fn successor_and_predecessor_walk_every_node(keys in prop::collection::vec(0i32..1000, 1..200)) {
            let mut tree = Tree::new(NaturalOrder);
            for key in &keys {
                tree.insert(*key, *key);
            }

            let forward: Vec<i32> = tree.ascending(tree.minimum()).map(|(k, _)| *k).collect();
            let mut backward: Vec<i32> = tree.descending(tree.maximum()).map(|(k, _)| *k).collect();
            backward.reverse();

            prop_assert_eq!(forward.len(), tree.len());
            prop_assert!(forward.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(forward, backward);
        }
    }

    #[test]
    fn empty_tree_navigation() {
        let tree = Tree::new(NaturalOrder);
        tree.validate_invariants();

        assert!(tree.minimum().is_none());
        assert!(tree.maximum().is_none());
        assert!(tree.search(&1).is_none());
        assert!(tree.ceiling(&1).is_none());
        assert!(tree.floor(&1).is_none());
    }

    #[test]
    fn insert_existing_key_replaces_value_only() {
        let mut tree = Tree::new(NaturalOrder);
        for key in 0..16 {
            tree.insert(key, key);
        }
        let before = {
            let mut dump = String::new();
            tree.write_structure(&mut dump).unwrap();
            dump
        };

        assert_eq!(tree.insert(7, 700), Some(7));
        tree.validate_invariants();
        assert_eq!(tree.len(), 16);
        assert_eq!(tree.entry(tree.search(&7).unwrap()), (&7, &700));

        let mut after = String::new();
        tree.write_structure(&mut after).unwrap();
        assert_eq!(before.replace("7 => 7 ", "7 => 700 "), after);
    }

    #[test]
    fn ascending_inserts_stay_logarithmic() {
        let mut tree = Tree::new(NaturalOrder);
        for key in 0..4096 {
            tree.insert(key, key);
        }
        tree.validate_invariants();

        // At most 2 * log2(n + 1) edges from the root to any leaf.
        assert!(tree.height(tree.root) <= 25, "height {}", tree.height(tree.root));

        for key in (0..4096).step_by(2) {
            assert_eq!(tree.remove_entry(&key), Some((key, key)));
        }
        tree.validate_invariants();
        assert_eq!(tree.len(), 2048);
    }

    #[test]
    fn removing_node_with_two_children_keeps_order() {
        let mut tree = Tree::new(NaturalOrder);
        for key in [50, 30, 70, 20, 40, 60, 80, 35, 45] {
            tree.insert(key, key * 10);
        }
        tree.validate_invariants();

        assert_eq!(tree.remove_entry(&30), Some((30, 300)));
        tree.validate_invariants();
        assert_eq!(keys_ascending(&tree), [20, 35, 40, 45, 50, 60, 70, 80]);

        let root_key = *tree.entry(tree.root.unwrap()).0;
        assert_eq!(tree.remove_entry(&root_key), Some((root_key, root_key * 10)));
        tree.validate_invariants();
        assert!(tree.search(&root_key).is_none());
    }

    #[test]
    fn remove_until_empty_releases_every_slot() {
        let mut tree = Tree::new(NaturalOrder);
        for key in (0..100).rev() {
            tree.insert(key, key);
        }
        for key in 0..100 {
            tree.remove_entry(&key);
            tree.validate_invariants();
        }
        assert!(tree.is_empty());
        assert!(tree.root.is_none());
    }

    #[test]
    fn extremal_removal_keeps_invariants() {
        let mut tree = Tree::new(NaturalOrder);
        for key in 0..512 {
            tree.insert((key * 37) % 512, key);
        }
        let mut cloned = tree.clone();

        let mut lo = 0;
        let mut hi = 511;
        while !tree.is_empty() {
            let (key, _) = tree.remove_handle(tree.minimum().unwrap());
            assert_eq!(key, lo);
            lo += 1;
            tree.validate_invariants();

            if let Some(h) = tree.maximum() {
                let (key, _) = tree.remove_handle(h);
                assert_eq!(key, hi);
                hi -= 1;
                tree.validate_invariants();
            }
        }

        for expected in 0..512 {
            let (key, _) = cloned.remove_handle(cloned.minimum().unwrap());
            assert_eq!(key, expected);
            cloned.validate_invariants();
        }
        assert!(cloned.is_empty());
    }

    #[test]
    fn reverse_comparator_inverts_order() {
        let mut tree = RawRBTreeMap::new(|a: &i32, b: &i32| b.cmp(a));
        for key in [3, 1, 4, 1, 5, 9, 2, 6] {
            tree.insert(key, ());
        }
        tree.validate_invariants();

        let keys: Vec<i32> = tree.ascending(tree.minimum()).map(|(k, _)| *k).collect();
        assert_eq!(keys, [9, 6, 5, 4, 3, 2, 1]);
        assert_eq!(tree.ceiling(&7).map(|h| *tree.entry(h).0), Some(6));
        assert_eq!(tree.floor(&7).map(|h| *tree.entry(h).0), Some(9));
    }

    #[test]
    fn drain_yields_ascending_entries_and_empties() {
        let mut tree = Tree::new(NaturalOrder);
        for key in [5, 3, 8, 1, 4] {
            tree.insert(key, -key);
        }

        assert_eq!(tree.drain_to_vec(), [(1, -1), (3, -3), (4, -4), (5, -5), (8, -8)]);
        assert!(tree.is_empty());
        tree.validate_invariants();

        tree.insert(2, 2);
        tree.validate_invariants();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn structure_dump_lists_every_node() {
        let mut tree = Tree::new(NaturalOrder);
        let mut dump = String::new();
        tree.write_structure(&mut dump).unwrap();
        assert_eq!(dump, "(empty)\n");

        for key in 1..=7 {
            tree.insert(key, key);
        }
        dump.clear();
        tree.write_structure(&mut dump).unwrap();

        assert_eq!(dump.lines().count(), 7);
        assert!(dump.starts_with("* "));
        assert!(dump.contains("(black)"));
    }
}
