//! Shared ownership cells
//!
//! A [`Shared`] is a handle to one heap block holding a reference count and
//! a mutable value. Cloning a handle bumps the count and aliases the block;
//! moving a handle transfers it without touching the count; dropping the
//! last handle frees the block.
//!
//! Cells are allocated while the graph is wired at boot and live for the
//! rest of the process. They are the only place combinator state survives
//! from one tick to the next.
//!
//! Handles are neither `Send` nor `Sync`. The tick loop is single-threaded,
//! so at most one call path touches a given cell at a time; the count exists
//! so that handles can be copied into several closures, not to arbitrate
//! between writers.

use alloc::rc::Rc;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

/// Reference-counted mutable storage
pub struct Shared<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Shared<T> {
    /// Allocate a new cell holding `value`, with a reference count of one
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Borrow the value
    ///
    /// # Panics
    ///
    /// If the value is currently mutably borrowed.
    #[track_caller]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    /// Mutably borrow the value
    ///
    /// # Panics
    ///
    /// If the value is currently borrowed.
    #[track_caller]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    /// Run `f` with a shared borrow of the value
    #[track_caller]
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Run `f` with a mutable borrow of the value
    #[track_caller]
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Overwrite the value
    #[track_caller]
    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }

    /// Overwrite the value, returning the old one
    #[track_caller]
    pub fn replace(&self, value: T) -> T {
        self.inner.replace(value)
    }

    /// Replace the value with `f(old)`
    #[track_caller]
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.inner.borrow());
        *self.inner.borrow_mut() = next;
    }

    /// Number of live handles to this block
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Check whether two handles alias the same block
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> Shared<T> {
    /// Copy the value out of the cell
    #[track_caller]
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(value) => f.debug_tuple("Shared").field(&*value).finish(),
            Err(_) => f.write_str("Shared(<borrowed>)"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<T: defmt::Format> defmt::Format for Shared<T> {
    fn format(&self, f: defmt::Formatter) {
        match self.inner.try_borrow() {
            Ok(value) => defmt::write!(f, "Shared({})", &*value),
            Err(_) => defmt::write!(f, "Shared(<borrowed>)"),
        }
    }
}
