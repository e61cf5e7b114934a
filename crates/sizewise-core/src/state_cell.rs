use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Single-threaded shared owner for instance state.
///
/// Wraps `T` in `Rc<RefCell<...>>` so lifecycle code, node-ref callbacks and
/// deferred tasks can all hold cheap clones of the same slot without any of
/// them taking long-lived borrows.
pub struct StateCell<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Run `f` against the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Run `f` with mutable access to the stored value.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Replace the stored value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        self.inner.replace(value)
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }
}

impl<T: Clone> StateCell<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }
}
