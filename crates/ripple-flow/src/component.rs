//! The component contract and type-erased hosting.
//!
//! A component describes what should be on screen; the framework materializes
//! a view for it lazily, reuses that view across updates, and recreates it
//! only when the hosted component changes type. Equality between components
//! is structural over their declared content, which lets containers skip work
//! when nothing changed.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use ripple_layout::{Rect, Size};

use crate::environment::Environment;
use crate::identity::Id;
use crate::transition::Transition;

/// A declarative, diffable description of a UI subtree.
///
/// `update` reconciles `view` against this description within `available`
/// space and returns the size the view occupies. Implementations must be
/// prepared for `view` to be freshly created or carried over from a previous
/// update of an equal-typed component.
pub trait Component: 'static {
    type View: 'static;

    fn make_view(&self) -> Self::View;

    fn update(
        &self,
        view: &mut Self::View,
        available: Size,
        env: &Environment,
        transition: Transition,
    ) -> Size;
}

trait ErasedComponent {
    fn make_view_erased(&self) -> Box<dyn Any>;

    /// Returns `None` when `view` is not this component's view type.
    fn update_erased(
        &self,
        view: &mut dyn Any,
        available: Size,
        env: &Environment,
        transition: Transition,
    ) -> Option<Size>;

    fn as_any(&self) -> &dyn Any;

    fn eq_erased(&self, other: &dyn Any) -> bool;
}

struct Erased<C>(C);

impl<C> ErasedComponent for Erased<C>
where
    C: Component + PartialEq,
{
    fn make_view_erased(&self) -> Box<dyn Any> {
        Box::new(self.0.make_view())
    }

    fn update_erased(
        &self,
        view: &mut dyn Any,
        available: Size,
        env: &Environment,
        transition: Transition,
    ) -> Option<Size> {
        let view = view.downcast_mut::<C::View>()?;
        Some(self.0.update(view, available, env, transition))
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn eq_erased(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<C>()
            .map(|other| self.0 == *other)
            .unwrap_or(false)
    }
}

/// A type-erased [`Component`].
#[derive(Clone)]
pub struct AnyComponent {
    inner: Rc<dyn ErasedComponent>,
    type_id: TypeId,
    type_name: &'static str,
}

impl AnyComponent {
    pub fn new<C>(component: C) -> Self
    where
        C: Component + PartialEq,
    {
        Self {
            inner: Rc::new(Erased(component)),
            type_id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn downcast_ref<C: Component>(&self) -> Option<&C> {
        self.inner.as_any().downcast_ref::<C>()
    }
}

impl PartialEq for AnyComponent {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.inner.eq_erased(other.inner.as_any())
    }
}

impl fmt::Debug for AnyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyComponent").field(&self.type_name).finish()
    }
}

/// A type-erased component paired with its stable identity.
#[derive(Clone, Debug, PartialEq)]
pub struct AnyComponentWithId {
    pub id: Id,
    pub component: AnyComponent,
}

impl AnyComponentWithId {
    pub fn new(id: impl Into<Id>, component: AnyComponent) -> Self {
        Self {
            id: id.into(),
            component,
        }
    }
}

static NEXT_VIEW_INSTANCE: AtomicU64 = AtomicU64::new(1);

fn next_view_instance() -> u64 {
    NEXT_VIEW_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

struct HostedView {
    component_type: TypeId,
    view: Box<dyn Any>,
    instance: u64,
}

/// Hosts one component's materialized view.
///
/// The view is created on the first update and reused for every later update
/// of a component with the same type; hosting a component of a different type
/// tears the old view down and starts over. The host records the size the
/// last update returned and the frame its owner assigned.
#[derive(Default)]
pub struct ComponentHost {
    hosted: Option<HostedView>,
    size: Size,
    frame: Rect,
}

impl ComponentHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the hosted view against `component` and returns its size.
    pub fn update(
        &mut self,
        transition: Transition,
        component: &AnyComponent,
        env: &Environment,
        container: Size,
    ) -> Size {
        let matches = self
            .hosted
            .as_ref()
            .map(|hosted| hosted.component_type == component.type_id)
            .unwrap_or(false);
        if !matches {
            self.hosted = Some(HostedView {
                component_type: component.type_id,
                view: component.inner.make_view_erased(),
                instance: next_view_instance(),
            });
        }
        let size = match self.hosted.as_mut() {
            Some(hosted) => component
                .inner
                .update_erased(hosted.view.as_mut(), container, env, transition),
            None => None,
        };
        // The type check above makes a downcast failure unreachable; degrade
        // to a zero size rather than panic if it ever regresses.
        self.size = size.unwrap_or(Size::ZERO);
        self.size
    }

    pub fn is_materialized(&self) -> bool {
        self.hosted.is_some()
    }

    /// Identity of the currently materialized view; changes only when the
    /// view is recreated.
    pub fn view_instance(&self) -> Option<u64> {
        self.hosted.as_ref().map(|hosted| hosted.instance)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect, _transition: Transition) {
        self.frame = frame;
    }

    pub fn view_ref<V: 'static>(&self) -> Option<&V> {
        self.hosted
            .as_ref()
            .and_then(|hosted| hosted.view.downcast_ref::<V>())
    }

    pub fn view_mut<V: 'static>(&mut self) -> Option<&mut V> {
        self.hosted
            .as_mut()
            .and_then(|hosted| hosted.view.downcast_mut::<V>())
    }
}

impl fmt::Debug for ComponentHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentHost")
            .field("materialized", &self.is_materialized())
            .field("size", &self.size)
            .finish()
    }
}
