//! Keyed-reconciliation section list.
//!
//! Renders an ordered list of pressable rows, reconciling declared rows
//! against previously materialized views by stable identity. Views are
//! reused by identity rather than position, so reordering an unchanged row
//! never recreates it; identities absent from the new pass are torn down
//! exactly once.

use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;

use ripple_flow::{
    Animation, AnyComponentWithId, Component, ComponentHost, Environment, Id, Transition,
};
use ripple_graphics::Color;
use ripple_layout::{Point, Rect, Size, HAIRLINE};

use crate::control::{PressableControl, SeparatorView, HIGHLIGHT_FADE_OUT};

const SIDE_INSET: f32 = 16.0;
const SEPARATOR_INSET: f32 = 30.0;

/// One row: identified content plus the action fired when the row is
/// pressed. Equality is structural over the content only.
#[derive(Clone)]
pub struct SectionItem {
    pub content: AnyComponentWithId,
    pub action: Rc<dyn Fn()>,
}

impl SectionItem {
    pub fn new(content: AnyComponentWithId, action: impl Fn() + 'static) -> Self {
        Self {
            content,
            action: Rc::new(action),
        }
    }
}

impl PartialEq for SectionItem {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl fmt::Debug for SectionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionItem")
            .field("id", &self.content.id)
            .finish()
    }
}

/// An ordered group of pressable rows separated by hairlines.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionGroup {
    pub items: Vec<SectionItem>,
    pub background_color: Color,
    pub selection_color: Color,
    pub separator_color: Color,
}

/// Retained state of a [`SectionGroup`]: one control and one content host
/// per live identity, plus the positional separator pool.
pub struct SectionGroupView {
    controls: AHashMap<Id, PressableControl>,
    item_views: AHashMap<Id, ComponentHost>,
    separators: Vec<SeparatorView>,
    background_color: Color,
}

impl SectionGroupView {
    fn new() -> Self {
        Self {
            controls: AHashMap::new(),
            item_views: AHashMap::new(),
            separators: Vec::new(),
            background_color: Color::CLEAR,
        }
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn item_count(&self) -> usize {
        self.item_views.len()
    }

    pub fn separator_count(&self) -> usize {
        self.separators.len()
    }

    pub fn separators(&self) -> &[SeparatorView] {
        &self.separators
    }

    pub fn control(&self, id: &Id) -> Option<&PressableControl> {
        self.controls.get(id)
    }

    pub fn item_view(&self, id: &Id) -> Option<&ComponentHost> {
        self.item_views.get(id)
    }

    /// Simulates a press on the row with the given identity. Returns whether
    /// a control exists for it.
    pub fn press(&self, id: &Id) -> bool {
        match self.controls.get(id) {
            Some(control) => {
                control.press();
                true
            }
            None => false,
        }
    }

    /// Simulates the highlight tracking of the row's control.
    pub fn set_highlighted(&mut self, id: &Id, highlighted: bool) {
        if let Some(control) = self.controls.get_mut(id) {
            control.set_highlighted(highlighted);
        }
    }

    fn reconcile(
        &mut self,
        component: &SectionGroup,
        available: Size,
        transition: Transition,
    ) -> Size {
        self.background_color = component.background_color;

        let mut size = Size::new(available.width, 0.0);
        let mut valid_ids: Vec<Id> = Vec::with_capacity(component.items.len());

        for (index, item) in component.items.iter().enumerate() {
            let id = item.content.id.clone();
            valid_ids.push(id.clone());

            let control = self
                .controls
                .entry(id.clone())
                .or_insert_with(PressableControl::new);

            let mut item_transition = transition;
            let mut created = false;
            let host = self.item_views.entry(id).or_insert_with(|| {
                created = true;
                ComponentHost::new()
            });
            if created {
                // Freshly materialized content joins without animation even
                // inside an animated pass, avoiding pop-in.
                item_transition = transition.with_animation(Animation::None);
            }

            let item_size = host.update(
                item_transition,
                &item.content.component,
                &Environment::empty(),
                Size::new(size.width - SIDE_INSET, f32::INFINITY),
            );

            let item_frame = Rect {
                origin: Point::new(0.0, size.height),
                size: item_size,
            };
            control.set_frame(Rect::new(
                0.0,
                item_frame.min_y(),
                available.width,
                item_size.height + HAIRLINE,
            ));
            host.set_frame(
                Rect {
                    origin: Point::new(SIDE_INSET, item_frame.min_y()),
                    size: item_size,
                },
                item_transition,
            );
            control.set_highlight_feedback(component.selection_color, HIGHLIGHT_FADE_OUT);
            control.set_action(Rc::clone(&item.action));

            size.height += item_size.height;

            if index != component.items.len() - 1 {
                if self.separators.len() <= index {
                    self.separators.push(SeparatorView::new());
                }
                let separator = &mut self.separators[index];
                separator.color = component.separator_color;
                separator.frame = Rect::new(
                    item_frame.min_x() + SIDE_INSET * 2.0 + SEPARATOR_INSET,
                    item_frame.max_y(),
                    size.width - SIDE_INSET * 2.0 - SEPARATOR_INSET,
                    HAIRLINE,
                );
            }
        }

        self.item_views.retain(|id, _| valid_ids.contains(id));
        self.controls.retain(|id, _| valid_ids.contains(id));
        self.separators
            .truncate(component.items.len().saturating_sub(1));

        size
    }
}

impl fmt::Debug for SectionGroupView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionGroupView")
            .field("items", &self.item_views.len())
            .field("separators", &self.separators.len())
            .finish()
    }
}

impl Component for SectionGroup {
    type View = SectionGroupView;

    fn make_view(&self) -> SectionGroupView {
        SectionGroupView::new()
    }

    fn update(
        &self,
        view: &mut SectionGroupView,
        available: Size,
        _env: &Environment,
        transition: Transition,
    ) -> Size {
        view.reconcile(self, available, transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    use ripple_flow::AnyComponent;

    #[derive(PartialEq)]
    struct Row {
        height: f32,
        last_transition: Rc<RefCell<Vec<Transition>>>,
    }

    struct RowView;

    impl Component for Row {
        type View = RowView;

        fn make_view(&self) -> RowView {
            RowView
        }

        fn update(
            &self,
            _view: &mut RowView,
            available: Size,
            _env: &Environment,
            transition: Transition,
        ) -> Size {
            self.last_transition.borrow_mut().push(transition);
            Size::new(available.width, self.height)
        }
    }

    fn group(rows: &[(&'static str, f32)]) -> (SectionGroup, Rc<RefCell<Vec<Transition>>>) {
        let transitions = Rc::new(RefCell::new(Vec::new()));
        let items = rows
            .iter()
            .map(|(id, height)| {
                SectionItem::new(
                    AnyComponentWithId::new(
                        *id,
                        AnyComponent::new(Row {
                            height: *height,
                            last_transition: Rc::clone(&transitions),
                        }),
                    ),
                    || {},
                )
            })
            .collect();
        (
            SectionGroup {
                items,
                background_color: Color::WHITE,
                selection_color: Color::rgb(0xe0e0e0),
                separator_color: Color::rgb(0xc8c7cc),
            },
            transitions,
        )
    }

    fn update(view: &mut SectionGroupView, group: &SectionGroup, transition: Transition) -> Size {
        group.update(
            view,
            Size::new(343.0, f32::INFINITY),
            &Environment::empty(),
            transition,
        )
    }

    #[test]
    fn counts_and_total_height() {
        let (section, _) = group(&[("a", 40.0), ("b", 50.0), ("c", 60.0)]);
        let mut view = section.make_view();
        let size = update(&mut view, &section, Transition::immediate());
        assert_eq!(view.item_count(), 3);
        assert_eq!(view.separator_count(), 2);
        assert_eq!(size, Size::new(343.0, 150.0));
    }

    #[test]
    fn reordering_reuses_views_by_identity() {
        let (section, _) = group(&[("a", 40.0), ("b", 50.0), ("c", 60.0)]);
        let mut view = section.make_view();
        update(&mut view, &section, Transition::immediate());
        let instances: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|id| view.item_view(&Id::from(*id)).and_then(|h| h.view_instance()))
            .collect();

        let (reordered, _) = group(&[("c", 60.0), ("a", 40.0), ("b", 50.0)]);
        let size = update(&mut view, &reordered, Transition::immediate());
        let after: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|id| view.item_view(&Id::from(*id)).and_then(|h| h.view_instance()))
            .collect();
        assert_eq!(instances, after);
        assert_eq!(size.height, 150.0);
        // "c" is now the first row.
        let c_frame = view.item_view(&Id::from("c")).map(|h| h.frame());
        assert_eq!(c_frame.map(|f| f.min_y()), Some(0.0));
    }

    #[test]
    fn removing_a_key_tears_down_its_views_and_trailing_separator() {
        let (section, _) = group(&[("a", 40.0), ("b", 50.0), ("c", 60.0)]);
        let mut view = section.make_view();
        update(&mut view, &section, Transition::immediate());

        let kept: Vec<_> = ["a", "b"]
            .iter()
            .map(|id| view.item_view(&Id::from(*id)).and_then(|h| h.view_instance()))
            .collect();

        let (shrunk, _) = group(&[("a", 40.0), ("b", 50.0)]);
        let size = update(&mut view, &shrunk, Transition::immediate());
        assert_eq!(view.item_count(), 2);
        assert_eq!(view.separator_count(), 1);
        assert!(view.item_view(&Id::from("c")).is_none());
        assert!(view.control(&Id::from("c")).is_none());
        assert_eq!(size.height, 90.0);

        let after: Vec<_> = ["a", "b"]
            .iter()
            .map(|id| view.item_view(&Id::from(*id)).and_then(|h| h.view_instance()))
            .collect();
        assert_eq!(kept, after);
    }

    #[test]
    fn new_rows_join_without_animation() {
        let (section, transitions) = group(&[("a", 40.0)]);
        let mut view = section.make_view();
        update(&mut view, &section, Transition::animated(0.25));
        // Creation pass: the row must have been updated with an instant
        // transition despite the animated pass.
        assert!(transitions.borrow().iter().all(|t| !t.is_animated()));

        let (grown, transitions) = group(&[("a", 40.0), ("b", 50.0)]);
        update(&mut view, &grown, Transition::animated(0.25));
        let seen = transitions.borrow();
        // Existing row "a" animates, new row "b" does not.
        assert_eq!(seen.len(), 2);
        assert!(seen[0].is_animated());
        assert!(!seen[1].is_animated());
    }

    #[test]
    fn single_row_has_no_separator() {
        let (section, _) = group(&[("only", 44.0)]);
        let mut view = section.make_view();
        let size = update(&mut view, &section, Transition::immediate());
        assert_eq!(view.separator_count(), 0);
        assert_eq!(size.height, 44.0);
    }

    #[test]
    fn press_dispatches_to_the_rows_action() {
        let pressed = Rc::new(Cell::new(0));
        let transitions = Rc::new(RefCell::new(Vec::new()));
        let item = {
            let pressed = Rc::clone(&pressed);
            SectionItem::new(
                AnyComponentWithId::new(
                    "row",
                    AnyComponent::new(Row {
                        height: 40.0,
                        last_transition: transitions,
                    }),
                ),
                move || pressed.set(pressed.get() + 1),
            )
        };
        let section = SectionGroup {
            items: vec![item],
            background_color: Color::WHITE,
            selection_color: Color::rgb(0xe0e0e0),
            separator_color: Color::rgb(0xc8c7cc),
        };
        let mut view = section.make_view();
        update(&mut view, &section, Transition::immediate());

        view.set_highlighted(&Id::from("row"), true);
        assert_eq!(
            view.control(&Id::from("row")).and_then(|c| c.background()),
            Some(Color::rgb(0xe0e0e0))
        );
        view.set_highlighted(&Id::from("row"), false);
        assert!(view.press(&Id::from("row")));
        assert_eq!(pressed.get(), 1);
        assert!(!view.press(&Id::from("missing")));
    }
}
