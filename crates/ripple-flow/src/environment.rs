//! Typed contextual values flowing down an update pass.

use std::any::{Any, TypeId};
use std::rc::Rc;

use ahash::AHashMap;

/// A typed bag of contextual values (theme, insets, localized strings)
/// supplied by the host and extended per child where a container needs to
/// contribute its own values.
///
/// Values are stored behind `Rc`, so cloning an environment to extend it for
/// one child is cheap.
#[derive(Clone, Default)]
pub struct Environment {
    values: AHashMap<TypeId, Rc<dyn Any>>,
}

impl Environment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with<T: 'static>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    pub fn insert<T: 'static>(&mut self, value: T) {
        self.values.insert(TypeId::of::<T>(), Rc::new(value));
    }

    pub fn get<T: 'static>(&self) -> Option<Rc<T>> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| Rc::clone(value).downcast::<T>().ok())
    }
}
