use super::handle::Handle;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child link of a node. Walking toward `Right` visits keys in ascending order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single red-black tree node stored in the arena.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    // Back-link, not an owner.
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K, V> Node<K, V> {
    /// Creates a new red leaf hanging off `parent`.
    pub(crate) fn new(key: K, value: V, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Exchanges key and value with `other`, leaving color and links in place.
    pub(crate) fn swap_entry(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.key, &mut other.key);
        core::mem::swap(&mut self.value, &mut other.value);
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}
