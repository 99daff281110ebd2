use alloc::vec::Vec;

use super::handle::Handle;
use crate::error::{Error, Result};

/// Contiguous node storage addressed by [`Handle`].
///
/// Elements are only ever appended; the whole arena is released at once by [`Arena::clear`] or
/// on drop, so handles stay valid for as long as the owning tree does.
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Makes room for `additional` more elements so the next `additional` calls to
    /// [`Arena::alloc`] neither allocate nor exceed [`Handle::MAX`].
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<()> {
        // Strict: at most `Handle::MAX + 1` slots, indices `0..=Handle::MAX`.
        if self.slots.len() + additional > Handle::MAX + 1 {
            return Err(Error::CapacityExceeded);
        }
        self.slots.try_reserve(additional)?;
        Ok(())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(element);
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        &self.slots[handle.to_index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        &mut self.slots[handle.to_index()]
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
