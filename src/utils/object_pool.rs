use super::handle::HandleLike;
use super::handle_pool::{HandlePool, Iter};

/// An arena of `T` named by versioned handles. Each object lives in the slot
/// of its handle's index, so lookups are a bounds check plus a version
/// comparison.
pub struct ObjectPool<H: HandleLike, T> {
    handles: HandlePool<H>,
    slots: Vec<Option<T>>,
}

impl<H: HandleLike, T> Default for ObjectPool<H, T> {
    fn default() -> Self {
        ObjectPool::new()
    }
}

impl<H: HandleLike, T> ObjectPool<H, T> {
    pub fn new() -> Self {
        ObjectPool {
            handles: HandlePool::new(),
            slots: Vec::new(),
        }
    }

    /// Stores `value` and names it with a fresh handle.
    pub fn create(&mut self, value: T) -> H {
        let handle = self.handles.create();
        let index = handle.index() as usize;

        if index == self.slots.len() {
            self.slots.push(Some(value));
        } else {
            self.slots[index] = Some(value);
        }

        handle
    }

    #[inline]
    pub fn is_alive(&self, handle: H) -> bool {
        self.handles.is_alive(handle)
    }

    /// Returns `None` for handles that were freed, or never created here.
    #[inline]
    pub fn get(&self, handle: H) -> Option<&T> {
        if !self.handles.is_alive(handle) {
            return None;
        }

        self.slots[handle.index() as usize].as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        if !self.handles.is_alive(handle) {
            return None;
        }

        self.slots[handle.index() as usize].as_mut()
    }

    /// Releases `handle` and hands its object back. Returns `None` if the
    /// handle is stale.
    pub fn free(&mut self, handle: H) -> Option<T> {
        if !self.handles.free(handle) {
            return None;
        }

        self.slots[handle.index() as usize].take()
    }

    /// Releases every object, returning them in index order.
    pub fn drain(&mut self) -> Vec<T> {
        let alive: Vec<H> = self.handles.iter().collect();
        alive.into_iter().filter_map(|h| self.free(h)).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterates the live handles in index order.
    #[inline]
    pub fn iter(&self) -> Iter<H> {
        self.handles.iter()
    }
}
