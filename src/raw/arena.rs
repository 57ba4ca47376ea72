use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes. Freed slots are recycled before the slot vector grows.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Borrows two distinct slots mutably at once.
    pub(crate) fn get_pair_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        let (i, j) = (a.to_index(), b.to_index());
        assert_ne!(i, j, "`Arena::get_pair_mut()` - `a` and `b` are the same handle!");

        let (first, second) = if i < j {
            let (lo, hi) = self.slots.split_at_mut(j);
            (&mut lo[i], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(i);
            (&mut hi[0], &mut lo[j])
        };

        (
            first.as_mut().expect("`Arena::get_pair_mut()` - `a` is invalid!"),
            second.as_mut().expect("`Arena::get_pair_mut()` - `b` is invalid!"),
        )
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
