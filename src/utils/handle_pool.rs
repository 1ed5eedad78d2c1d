use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

use super::handle::{HandleIndex, HandleLike};

/// `HandlePool` hands out versioned handles over a dense range of indices.
/// A slot is alive while its version is odd; freeing bumps the version so
/// that stale handles of the same index are rejected afterwards.
pub struct HandlePool<H: HandleLike> {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<Reverse<HandleIndex>>,
    _phantom: PhantomData<H>,
}

impl<H: HandleLike> Default for HandlePool<H> {
    fn default() -> Self {
        HandlePool::new()
    }
}

impl<H: HandleLike> HandlePool<H> {
    pub fn new() -> Self {
        HandlePool {
            versions: Vec::new(),
            frees: BinaryHeap::new(),
            _phantom: PhantomData,
        }
    }

    /// Mints a handle, reusing the smallest free index first.
    pub fn create(&mut self) -> H {
        if let Some(Reverse(index)) = self.frees.pop() {
            let version = &mut self.versions[index as usize];
            *version += 1;
            H::new(index, *version)
        } else {
            self.versions.push(1);
            H::new(self.versions.len() as HandleIndex - 1, 1)
        }
    }

    /// Returns true if this handle was created by `HandlePool`, and has not been
    /// freed yet.
    #[inline]
    pub fn is_alive(&self, handle: H) -> bool {
        let index = handle.index() as usize;
        self.is_alive_at(index) && self.versions[index] == handle.version()
    }

    #[inline]
    fn is_alive_at(&self, index: usize) -> bool {
        index < self.versions.len() && (self.versions[index] & 0x1) == 1
    }

    /// Recycles the handle index, and mark its version as dead.
    pub fn free(&mut self, handle: H) -> bool {
        if !self.is_alive(handle) {
            return false;
        }

        self.versions[handle.index() as usize] += 1;
        self.frees.push(Reverse(handle.index()));
        true
    }

    /// Returns the total number of alive handles.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the alive handles, in index order.
    pub fn iter(&self) -> Iter<H> {
        Iter {
            versions: &self.versions,
            cursor: 0,
            _phantom: PhantomData,
        }
    }
}

pub struct Iter<'a, H: HandleLike> {
    versions: &'a [HandleIndex],
    cursor: usize,
    _phantom: PhantomData<H>,
}

impl<'a, H: HandleLike> Iterator for Iter<'a, H> {
    type Item = H;

    fn next(&mut self) -> Option<H> {
        while self.cursor < self.versions.len() {
            let index = self.cursor;
            self.cursor += 1;

            let version = self.versions[index];
            if version & 0x1 == 1 {
                return Some(H::new(index as HandleIndex, version));
            }
        }

        None
    }
}
