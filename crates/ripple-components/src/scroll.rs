//! Scrollable content host.
//!
//! Hosts a single child content tree inside a scrolling viewport. Content is
//! measured at the exact available width and unbounded height; the measured
//! height becomes the scrollable extent. Offset changes are forwarded as
//! (distance from top, distance remaining to bottom); when a drag releases,
//! the owner may rewrite the target offset before it is committed.

use std::fmt;
use std::rc::Rc;

use ripple_flow::{AnyComponent, Component, ComponentHost, Environment, Transition};
use ripple_layout::{Constraints, EdgeInsets, Point, Rect, Size};

/// Contributed to the child's environment so deeply nested content can pad
/// itself past the host's obscured edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollChildEnvironment {
    pub insets: EdgeInsets,
}

/// Scroll host component.
#[derive(Clone)]
pub struct Scrollable {
    pub content: AnyComponent,
    pub content_insets: EdgeInsets,
    /// Invoked on every offset change with (top, bottom) distances.
    pub on_offset: Rc<dyn Fn(f32, f32)>,
    /// Invoked once when a drag is releasing; the target offset may be
    /// rewritten before it is committed.
    pub on_release: Rc<dyn Fn(&mut Point)>,
}

impl PartialEq for Scrollable {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content && self.content_insets == other.content_insets
    }
}

impl fmt::Debug for Scrollable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scrollable")
            .field("content", &self.content)
            .field("content_insets", &self.content_insets)
            .finish()
    }
}

/// Retained scroll state.
pub struct ScrollView {
    content: ComponentHost,
    content_size: Size,
    viewport: Size,
    offset: Point,
    indicator_insets: EdgeInsets,
    /// Suppresses offset callbacks for self-triggered changes such as the
    /// extent adjustment after a content re-measure.
    ignore_offset_events: bool,
    on_offset: Option<Rc<dyn Fn(f32, f32)>>,
    on_release: Option<Rc<dyn Fn(&mut Point)>>,
}

impl ScrollView {
    fn new() -> Self {
        Self {
            content: ComponentHost::new(),
            content_size: Size::ZERO,
            viewport: Size::ZERO,
            offset: Point::ZERO,
            indicator_insets: EdgeInsets::default(),
            ignore_offset_events: false,
            on_offset: None,
            on_release: None,
        }
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn indicator_insets(&self) -> EdgeInsets {
        self.indicator_insets
    }

    pub fn content_host(&self) -> &ComponentHost {
        &self.content
    }

    /// Scrolls to the given vertical offset, reporting the change.
    pub fn set_offset(&mut self, y: f32) {
        self.offset.y = y;
        self.did_scroll();
    }

    fn did_scroll(&self) {
        if self.ignore_offset_events {
            return;
        }
        if let Some(on_offset) = &self.on_offset {
            let top = self.offset.y;
            let bottom = (self.content_size.height - self.offset.y - self.viewport.height).max(0.0);
            on_offset(top, bottom);
        }
    }

    /// Ends a drag aimed at `target_y`, letting the owner rewrite the target
    /// before it is committed, then scrolls there. Returns the committed
    /// offset.
    pub fn end_dragging(&mut self, target_y: f32) -> f32 {
        let mut target = Point::new(self.offset.x, target_y);
        if !self.ignore_offset_events {
            if let Some(on_release) = &self.on_release {
                on_release(&mut target);
            }
        }
        self.set_offset(target.y);
        target.y
    }
}

impl fmt::Debug for ScrollView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollView")
            .field("content_size", &self.content_size)
            .field("offset", &self.offset)
            .finish()
    }
}

impl Component for Scrollable {
    type View = ScrollView;

    fn make_view(&self) -> ScrollView {
        ScrollView::new()
    }

    fn update(
        &self,
        view: &mut ScrollView,
        available: Size,
        env: &Environment,
        transition: Transition,
    ) -> Size {
        let child_env = env.clone().with(ScrollChildEnvironment {
            insets: self.content_insets,
        });
        let constraints = Constraints::exact_width(available.width);
        let content_size = constraints.constrain(view.content.update(
            transition,
            &self.content,
            &child_env,
            Size::new(constraints.max_width, constraints.max_height),
        ));
        view.content.set_frame(
            Rect {
                origin: Point::ZERO,
                size: content_size,
            },
            transition,
        );

        if view.content_size != content_size {
            view.ignore_offset_events = true;
            view.content_size = content_size;
            // Keep the committed offset within the new extent without
            // reporting the self-triggered change.
            let max_offset = (content_size.height - available.height).max(0.0);
            if view.offset.y > max_offset {
                view.set_offset(max_offset);
            }
            view.ignore_offset_events = false;
        }
        if view.indicator_insets != self.content_insets {
            view.indicator_insets = self.content_insets;
        }
        view.viewport = available;
        view.on_offset = Some(Rc::clone(&self.on_offset));
        view.on_release = Some(Rc::clone(&self.on_release));

        available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(PartialEq)]
    struct Tall {
        height: f32,
    }

    struct TallView;

    impl Component for Tall {
        type View = TallView;

        fn make_view(&self) -> TallView {
            TallView
        }

        fn update(
            &self,
            _view: &mut TallView,
            available: Size,
            _env: &Environment,
            _transition: Transition,
        ) -> Size {
            assert!(available.height.is_infinite());
            Size::new(available.width, self.height)
        }
    }

    fn scrollable(
        height: f32,
        offsets: &Rc<RefCell<Vec<(f32, f32)>>>,
        releases: &Rc<Cell<usize>>,
    ) -> Scrollable {
        let offsets = Rc::clone(offsets);
        let releases = Rc::clone(releases);
        Scrollable {
            content: AnyComponent::new(Tall { height }),
            content_insets: EdgeInsets::new(56.0, 0.0, 74.0, 0.0),
            on_offset: Rc::new(move |top, bottom| offsets.borrow_mut().push((top, bottom))),
            on_release: Rc::new(move |target| {
                releases.set(releases.get() + 1);
                if target.y < 100.0 {
                    *target = Point::ZERO;
                }
            }),
        }
    }

    fn update(view: &mut ScrollView, component: &Scrollable) -> Size {
        component.update(
            view,
            Size::new(375.0, 812.0),
            &Environment::empty(),
            Transition::immediate(),
        )
    }

    #[test]
    fn content_is_measured_at_unbounded_height() {
        let offsets = Rc::new(RefCell::new(Vec::new()));
        let releases = Rc::new(Cell::new(0));
        let component = scrollable(2000.0, &offsets, &releases);
        let mut view = component.make_view();
        let size = update(&mut view, &component);
        assert_eq!(size, Size::new(375.0, 812.0));
        assert_eq!(view.content_size(), Size::new(375.0, 2000.0));
    }

    #[test]
    fn offset_changes_report_top_and_bottom_distances() {
        let offsets = Rc::new(RefCell::new(Vec::new()));
        let releases = Rc::new(Cell::new(0));
        let component = scrollable(2000.0, &offsets, &releases);
        let mut view = component.make_view();
        update(&mut view, &component);

        view.set_offset(100.0);
        assert_eq!(*offsets.borrow(), vec![(100.0, 2000.0 - 100.0 - 812.0)]);

        view.set_offset(1500.0);
        assert_eq!(offsets.borrow().last(), Some(&(1500.0, 0.0)));
    }

    #[test]
    fn self_triggered_size_changes_do_not_reenter_the_offset_callback() {
        let offsets = Rc::new(RefCell::new(Vec::new()));
        let releases = Rc::new(Cell::new(0));
        let component = scrollable(2000.0, &offsets, &releases);
        let mut view = component.make_view();
        update(&mut view, &component);
        view.set_offset(1188.0);
        let reported = offsets.borrow().len();

        // Content shrinks below the current offset; the clamp must not be
        // reported through the offset callback.
        let shrunk = scrollable(900.0, &offsets, &releases);
        update(&mut view, &shrunk);
        assert_eq!(view.offset().y, 88.0);
        assert_eq!(offsets.borrow().len(), reported);
    }

    #[test]
    fn release_target_can_be_rewritten() {
        let offsets = Rc::new(RefCell::new(Vec::new()));
        let releases = Rc::new(Cell::new(0));
        let component = scrollable(2000.0, &offsets, &releases);
        let mut view = component.make_view();
        update(&mut view, &component);

        assert_eq!(view.end_dragging(80.0), 0.0);
        assert_eq!(view.offset().y, 0.0);
        assert_eq!(view.end_dragging(400.0), 400.0);
        assert_eq!(releases.get(), 2);
    }

    #[test]
    fn child_environment_carries_the_insets() {
        #[derive(PartialEq)]
        struct InsetProbe {
            seen: Rc<RefCell<Vec<EdgeInsets>>>,
        }

        impl Component for InsetProbe {
            type View = ();

            fn make_view(&self) {}

            fn update(
                &self,
                _view: &mut (),
                available: Size,
                env: &Environment,
                _transition: Transition,
            ) -> Size {
                if let Some(child) = env.get::<ScrollChildEnvironment>() {
                    self.seen.borrow_mut().push(child.insets);
                }
                Size::new(available.width, 10.0)
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let component = Scrollable {
            content: AnyComponent::new(InsetProbe {
                seen: Rc::clone(&seen),
            }),
            content_insets: EdgeInsets::new(44.0, 0.0, 74.0, 0.0),
            on_offset: Rc::new(|_, _| {}),
            on_release: Rc::new(|_| {}),
        };
        let mut view = component.make_view();
        update(&mut view, &component);
        assert_eq!(*seen.borrow(), vec![EdgeInsets::new(44.0, 0.0, 74.0, 0.0)]);
    }
}
