//! Live store views.
//!
//! A [`StoreView`] is a queryable snapshot of a local collection that updates
//! reactively as the underlying data changes. Observation is confined to the
//! UI queue: watchers are plain closures invoked synchronously on delivery,
//! and the returned [`Disposable`] is the single owner of the subscription.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use ripple_flow::Disposable;

struct Inner<T> {
    value: RefCell<Option<T>>,
    watchers: RefCell<Vec<(u64, Rc<dyn Fn(&T)>)>>,
    next_watcher: Cell<u64>,
    /// Subscriptions to upstream views this view is derived from. Holding
    /// them here keeps the upstream delivery alive exactly as long as this
    /// view; their cancel closures keep the upstream views themselves alive.
    upstream: RefCell<Vec<Disposable>>,
}

/// A live view of a local collection.
pub struct StoreView<T: Clone + 'static> {
    inner: Rc<Inner<T>>,
}

impl<T: Clone + 'static> Clone for StoreView<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Default for StoreView<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone + 'static> StoreView<T> {
    /// A view that has not produced a value yet.
    pub fn empty() -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(None),
                watchers: RefCell::new(Vec::new()),
                next_watcher: Cell::new(1),
                upstream: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn with_value(value: T) -> Self {
        let view = Self::empty();
        view.set(value);
        view
    }

    /// The most recent value, if the view has produced one.
    pub fn get(&self) -> Option<T> {
        self.inner.value.borrow().clone()
    }

    /// Publishes a new snapshot and delivers it to every watcher.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = Some(value.clone());
        notify(&self.inner, &value);
    }

    /// Registers `watcher`, delivering the current value immediately when one
    /// exists, then every later snapshot until the returned handle is
    /// released.
    pub fn observe(&self, watcher: impl Fn(&T) + 'static) -> Disposable {
        let watcher: Rc<dyn Fn(&T)> = Rc::new(watcher);
        let key = self.inner.next_watcher.get();
        self.inner.next_watcher.set(key + 1);
        self.inner
            .watchers
            .borrow_mut()
            .push((key, Rc::clone(&watcher)));
        if let Some(current) = self.get() {
            watcher(&current);
        }
        let inner = Rc::clone(&self.inner);
        Disposable::new(move || {
            inner.watchers.borrow_mut().retain(|(id, _)| *id != key);
        })
    }

    /// A derived view applying `transform` to every snapshot.
    pub fn map<U, F>(&self, transform: F) -> StoreView<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        let derived = StoreView::empty();
        let weak = Rc::downgrade(&derived.inner);
        let subscription = self.observe(move |value| {
            if let Some(inner) = weak.upgrade() {
                set_inner(&inner, transform(value));
            }
        });
        derived.inner.upstream.borrow_mut().push(subscription);
        derived
    }
}

fn set_inner<T: Clone>(inner: &Rc<Inner<T>>, value: T) {
    *inner.value.borrow_mut() = Some(value.clone());
    notify(inner, &value);
}

fn notify<T>(inner: &Rc<Inner<T>>, value: &T) {
    // Snapshot the watcher list so a watcher may subscribe or unsubscribe
    // during delivery without poisoning the borrow.
    let watchers: Vec<Rc<dyn Fn(&T)>> = inner
        .watchers
        .borrow()
        .iter()
        .map(|(_, watcher)| Rc::clone(watcher))
        .collect();
    for watcher in watchers {
        watcher(value);
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for StoreView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreView")
            .field("value", &self.get())
            .finish()
    }
}

/// Combines three views into one snapshot, emitting only once all three have
/// produced at least one value and on every later change of any of them.
pub fn combined3<A, B, C, R, F>(
    a: &StoreView<A>,
    b: &StoreView<B>,
    c: &StoreView<C>,
    combine: F,
) -> StoreView<R>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    R: Clone + 'static,
    F: Fn(&A, &B, &C) -> R + 'static,
{
    let combined = StoreView::empty();
    let combine = Rc::new(combine);
    let weak_a = Rc::downgrade(&a.inner);
    let weak_b = Rc::downgrade(&b.inner);
    let weak_c = Rc::downgrade(&c.inner);

    let recompute = {
        let weak_out = Rc::downgrade(&combined.inner);
        let combine = Rc::clone(&combine);
        move |weak_a: &Weak<Inner<A>>, weak_b: &Weak<Inner<B>>, weak_c: &Weak<Inner<C>>| {
            let (Some(a), Some(b), Some(c)) =
                (weak_a.upgrade(), weak_b.upgrade(), weak_c.upgrade())
            else {
                return;
            };
            let (a_value, b_value, c_value) = (
                a.value.borrow().clone(),
                b.value.borrow().clone(),
                c.value.borrow().clone(),
            );
            let (Some(a_value), Some(b_value), Some(c_value)) = (a_value, b_value, c_value) else {
                return;
            };
            if let Some(out) = weak_out.upgrade() {
                set_inner(&out, combine(&a_value, &b_value, &c_value));
            }
        }
    };
    let recompute = Rc::new(recompute);

    let sub_a = {
        let (recompute, wa, wb, wc) = (
            Rc::clone(&recompute),
            weak_a.clone(),
            weak_b.clone(),
            weak_c.clone(),
        );
        a.observe(move |_| recompute(&wa, &wb, &wc))
    };
    let sub_b = {
        let (recompute, wa, wb, wc) = (
            Rc::clone(&recompute),
            weak_a.clone(),
            weak_b.clone(),
            weak_c.clone(),
        );
        b.observe(move |_| recompute(&wa, &wb, &wc))
    };
    let sub_c = {
        let (recompute, wa, wb, wc) = (Rc::clone(&recompute), weak_a, weak_b, weak_c);
        c.observe(move |_| recompute(&wa, &wb, &wc))
    };

    combined
        .inner
        .upstream
        .borrow_mut()
        .extend([sub_a, sub_b, sub_c]);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_delivers_current_value_first() {
        let view = StoreView::with_value(7);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = Rc::clone(&seen);
            view.observe(move |value| seen.borrow_mut().push(*value))
        };
        view.set(8);
        assert_eq!(*seen.borrow(), vec![7, 8]);
    }

    #[test]
    fn dropping_the_handle_stops_delivery() {
        let view = StoreView::empty();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let seen = Rc::clone(&seen);
            view.observe(move |value: &i32| seen.borrow_mut().push(*value))
        };
        view.set(1);
        drop(sub);
        view.set(2);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn map_tracks_the_source() {
        let source = StoreView::with_value(2);
        let doubled = source.map(|value| value * 2);
        assert_eq!(doubled.get(), Some(4));
        source.set(5);
        assert_eq!(doubled.get(), Some(10));
    }

    #[test]
    fn combined_waits_for_all_three_sources() {
        let a = StoreView::empty();
        let b = StoreView::empty();
        let c = StoreView::empty();
        let combined = combined3(&a, &b, &c, |a: &i32, b: &i32, c: &i32| a + b + c);

        a.set(1);
        assert_eq!(combined.get(), None);
        b.set(2);
        assert_eq!(combined.get(), None);
        c.set(3);
        assert_eq!(combined.get(), Some(6));

        a.set(10);
        assert_eq!(combined.get(), Some(15));
    }
}
