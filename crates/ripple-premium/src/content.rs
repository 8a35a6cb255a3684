//! Scrollable content of the upsell screen: description text, the perk list,
//! and the legal footer, stacked below the hero region.

use std::fmt;
use std::rc::Rc;

use ripple_components::{Font, Label, ScrollChildEnvironment, SectionGroup, SectionItem};
use ripple_flow::{
    AnyComponent, AnyComponentWithId, Component, ComponentHost, Environment, Transition,
};
use ripple_layout::{Point, Rect, Size};

use crate::perk::{Perk, PerkRow};
use crate::screen::{Strings, Theme};

const SIDE_INSET: f32 = 16.0;
const DESCRIPTION_FONT: Font = Font::regular(15.0);
const TERMS_FONT: Font = Font::regular(13.0);
const DESCRIPTION_SPACING: f32 = 17.0;
const SECTION_SPACING: f32 = 23.0;
const BOTTOM_SPACING: f32 = 10.0;

/// Everything below the hero graphic. The perk action is not part of
/// equality.
#[derive(Clone)]
pub struct UpsellContent {
    pub theme: Theme,
    pub strings: Strings,
    /// Vertical space reserved above the text for the hero graphic.
    pub top_inset: f32,
    pub perk_action: Rc<dyn Fn(Perk)>,
}

impl PartialEq for UpsellContent {
    fn eq(&self, other: &Self) -> bool {
        self.theme == other.theme
            && self.strings == other.strings
            && self.top_inset == other.top_inset
    }
}

impl fmt::Debug for UpsellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpsellContent")
            .field("top_inset", &self.top_inset)
            .finish()
    }
}

pub struct UpsellContentView {
    description: ComponentHost,
    perks: ComponentHost,
    terms: ComponentHost,
}

impl UpsellContentView {
    pub fn description(&self) -> &ComponentHost {
        &self.description
    }

    pub fn perks(&self) -> &ComponentHost {
        &self.perks
    }

    pub fn terms(&self) -> &ComponentHost {
        &self.terms
    }
}

impl Component for UpsellContent {
    type View = UpsellContentView;

    fn make_view(&self) -> UpsellContentView {
        UpsellContentView {
            description: ComponentHost::new(),
            perks: ComponentHost::new(),
            terms: ComponentHost::new(),
        }
    }

    fn update(
        &self,
        view: &mut UpsellContentView,
        available: Size,
        env: &Environment,
        transition: Transition,
    ) -> Size {
        let width = available.width;
        let text_width = width - SIDE_INSET * 2.0;
        let mut height = self.top_inset;

        let description_size = view.description.update(
            transition,
            &AnyComponent::new(Label::multiline(
                self.strings.description.clone(),
                DESCRIPTION_FONT,
                self.theme.title,
            )),
            env,
            Size::new(text_width, f32::INFINITY),
        );
        view.description.set_frame(
            Rect {
                origin: Point::new(SIDE_INSET, height),
                size: description_size,
            },
            transition,
        );
        height += description_size.height + DESCRIPTION_SPACING;

        let items = Perk::ALL
            .iter()
            .map(|&perk| {
                let action = Rc::clone(&self.perk_action);
                SectionItem::new(
                    AnyComponentWithId::new(
                        perk.identifier(),
                        AnyComponent::new(PerkRow {
                            perk,
                            title_color: self.theme.title,
                            subtitle_color: self.theme.subtitle,
                        }),
                    ),
                    move || action(perk),
                )
            })
            .collect();
        let perks_size = view.perks.update(
            transition,
            &AnyComponent::new(SectionGroup {
                items,
                background_color: self.theme.item_background,
                selection_color: self.theme.selection,
                separator_color: self.theme.separator,
            }),
            env,
            Size::new(width, f32::INFINITY),
        );
        view.perks.set_frame(
            Rect {
                origin: Point::new(0.0, height),
                size: perks_size,
            },
            transition,
        );
        height += perks_size.height + SECTION_SPACING;

        let terms_size = view.terms.update(
            transition,
            &AnyComponent::new(Label::multiline(
                self.strings.terms.clone(),
                TERMS_FONT,
                self.theme.subtitle,
            )),
            env,
            Size::new(text_width, f32::INFINITY),
        );
        view.terms.set_frame(
            Rect {
                origin: Point::new(SIDE_INSET, height),
                size: terms_size,
            },
            transition,
        );
        height += terms_size.height + BOTTOM_SPACING;

        if let Some(child) = env.get::<ScrollChildEnvironment>() {
            height += child.insets.bottom;
        }

        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use ripple_components::SectionGroupView;
    use ripple_flow::Id;
    use ripple_layout::EdgeInsets;

    fn content(selected: &Rc<RefCell<Vec<Perk>>>) -> UpsellContent {
        let selected = Rc::clone(selected);
        UpsellContent {
            theme: Theme::default(),
            strings: Strings::default(),
            top_inset: 210.0,
            perk_action: Rc::new(move |perk| selected.borrow_mut().push(perk)),
        }
    }

    #[test]
    fn height_stacks_all_blocks_plus_bottom_inset() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let component = content(&selected);
        let mut view = component.make_view();
        let env = Environment::empty().with(ScrollChildEnvironment {
            insets: EdgeInsets::new(0.0, 0.0, 74.0, 0.0),
        });
        let size = component.update(
            &mut view,
            Size::unbounded_height(375.0),
            &env,
            Transition::immediate(),
        );

        let expected = 210.0
            + view.description().size().height
            + DESCRIPTION_SPACING
            + view.perks().size().height
            + SECTION_SPACING
            + view.terms().size().height
            + BOTTOM_SPACING
            + 74.0;
        assert_eq!(size.height, expected);
        assert_eq!(size.width, 375.0);
    }

    #[test]
    fn perk_list_carries_one_row_per_perk() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let component = content(&selected);
        let mut view = component.make_view();
        component.update(
            &mut view,
            Size::unbounded_height(375.0),
            &Environment::empty(),
            Transition::immediate(),
        );
        let group = view.perks().view_ref::<SectionGroupView>();
        assert_eq!(group.map(|g| g.item_count()), Some(Perk::ALL.len()));
        assert_eq!(
            group.map(|g| g.separator_count()),
            Some(Perk::ALL.len() - 1)
        );
    }

    #[test]
    fn pressing_a_perk_row_reports_the_perk() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let component = content(&selected);
        let mut view = component.make_view();
        component.update(
            &mut view,
            Size::unbounded_height(375.0),
            &Environment::empty(),
            Transition::immediate(),
        );
        if let Some(group) = view.perks().view_ref::<SectionGroupView>() {
            group.press(&Id::from("noAds"));
        }
        assert_eq!(*selected.borrow(), vec![Perk::NoAds]);
    }
}
