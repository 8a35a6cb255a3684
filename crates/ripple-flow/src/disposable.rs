//! Single-owner cancellation handles for subscriptions and in-flight work.

use std::cell::RefCell;
use std::fmt;

/// Owns one logical subscription or operation and cancels it when released.
///
/// Dropping the handle cancels the underlying work, so holding the handle is
/// what keeps a subscription alive.
pub struct Disposable {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Disposable {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel.
    pub fn empty() -> Self {
        Self { cancel: None }
    }

    /// Cancels the underlying work now instead of at drop time.
    pub fn dispose(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Disposable {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// A slot holding at most one [`Disposable`], replacing (and thereby
/// canceling) the previous occupant on each `set`.
#[derive(Default)]
pub struct DisposableSlot {
    current: RefCell<Option<Disposable>>,
}

impl DisposableSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `disposable`, canceling whatever the slot held before.
    pub fn set(&self, disposable: Disposable) {
        let previous = self.current.borrow_mut().replace(disposable);
        drop(previous);
    }

    /// Cancels and releases the current occupant, if any.
    pub fn clear(&self) {
        let previous = self.current.borrow_mut().take();
        drop(previous);
    }

    pub fn is_occupied(&self) -> bool {
        self.current.borrow().is_some()
    }
}

impl fmt::Debug for DisposableSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposableSlot")
            .field("occupied", &self.is_occupied())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn drop_cancels_once() {
        let cancelled = Rc::new(Cell::new(0));
        {
            let cancelled = Rc::clone(&cancelled);
            let handle = Disposable::new(move || cancelled.set(cancelled.get() + 1));
            drop(handle);
        }
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn explicit_dispose_does_not_double_cancel() {
        let cancelled = Rc::new(Cell::new(0));
        let handle = {
            let cancelled = Rc::clone(&cancelled);
            Disposable::new(move || cancelled.set(cancelled.get() + 1))
        };
        handle.dispose();
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn slot_replacement_cancels_predecessor() {
        let first = Rc::new(Cell::new(false));
        let second = Rc::new(Cell::new(false));
        let slot = DisposableSlot::new();
        {
            let first = Rc::clone(&first);
            slot.set(Disposable::new(move || first.set(true)));
        }
        {
            let second = Rc::clone(&second);
            slot.set(Disposable::new(move || second.set(true)));
        }
        assert!(first.get());
        assert!(!second.get());
        slot.clear();
        assert!(second.get());
        assert!(!slot.is_occupied());
    }
}
