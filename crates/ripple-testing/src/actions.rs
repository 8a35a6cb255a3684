//! Counting callbacks for press and completion assertions.

use std::cell::Cell;
use std::rc::Rc;

/// A callback that counts its invocations.
#[derive(Clone, Default)]
pub struct CountingAction {
    count: Rc<Cell<usize>>,
}

impl CountingAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// A closure wired to this counter; clones share the count.
    pub fn callback(&self) -> impl Fn() + 'static {
        let count = Rc::clone(&self.count);
        move || count.set(count.get() + 1)
    }
}
