//! Retained-mode component core.
//!
//! A [`Component`] is a declarative, diffable description of a UI subtree.
//! Concrete view state lives in host-owned view objects that are created
//! lazily and reused across updates; [`ComponentHost`] carries one such view
//! and exposes the `update(transition, component, environment, container) ->
//! size` contract that every screen in the client is built on.

pub mod component;
pub mod disposable;
pub mod environment;
pub mod identity;
pub mod platform;
pub mod transition;

pub use component::{AnyComponent, AnyComponentWithId, Component, ComponentHost};
pub use disposable::{Disposable, DisposableSlot};
pub use environment::Environment;
pub use identity::Id;
pub use platform::UiQueue;
pub use transition::{Animation, Transition};
