//! The upsell screen: a scroll host with a collapsing hero header, the perk
//! content, and a sticky subscribe button, wired to the purchase flow.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use ripple_components::{
    Fill, ScrollView, Scrollable, SolidRoundedButton, SolidRoundedButtonTheme,
};
use ripple_flow::{AnyComponent, ComponentHost, Environment, Transition, UiQueue};
use ripple_graphics::Color;
use ripple_layout::{EdgeInsets, Point, Rect, Size};
use ripple_store::StoreView;

use crate::content::UpsellContent;
use crate::perk::Perk;
use crate::purchase::{ConfirmationApi, PurchaseManager, PurchaseState};

/// Release targets below this snap back to the expanded header.
pub const COLLAPSE_SNAP_THRESHOLD: f32 = 100.0;
/// Offset at which the header is fully collapsed; release targets between the
/// snap threshold and this value stick here.
pub const COLLAPSED_HEADER_OFFSET: f32 = 123.0;

const TOP_PANEL_FADE_START: f32 = 95.0;
const TOP_PANEL_FADE_DISTANCE: f32 = 20.0;
const TITLE_SCALE_DROP: f32 = 0.36;
const BOTTOM_PANEL_FADE_DISTANCE: f32 = 16.0;
const BOTTOM_PANEL_HEIGHT: f32 = 74.0;
const HERO_EXTENT: f32 = 154.0;
const SIDE_INSET: f32 = 16.0;
const BUTTON_HEIGHT: f32 = 50.0;
const BUTTON_CORNER_RADIUS: f32 = 11.0;
const DISMISS_DELAY: f32 = 2.0;

/// Two-state sticking behavior for the collapsing header.
pub fn clamp_scroll_target(target: f32) -> f32 {
    if target < COLLAPSE_SNAP_THRESHOLD {
        0.0
    } else if target < COLLAPSED_HEADER_OFFSET {
        COLLAPSED_HEADER_OFFSET
    } else {
        target
    }
}

/// Opacity of the solid top navigation panel for a given top offset.
pub fn top_panel_alpha(top_offset: f32) -> f32 {
    ((top_offset - TOP_PANEL_FADE_START) / TOP_PANEL_FADE_DISTANCE).clamp(0.0, 1.0)
}

/// Scale of the large title as the header collapses.
pub fn title_scale(top_offset: f32) -> f32 {
    let fraction = (top_offset / COLLAPSED_HEADER_OFFSET).clamp(0.0, 1.0);
    1.0 - fraction * TITLE_SCALE_DROP
}

/// Opacity of the bottom button panel's separator shadow, from the distance
/// remaining to the bottom of the content.
pub fn bottom_panel_alpha(bottom_distance: f32) -> f32 {
    bottom_distance.min(BOTTOM_PANEL_FADE_DISTANCE) / BOTTOM_PANEL_FADE_DISTANCE
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub item_background: Color,
    pub separator: Color,
    pub selection: Color,
    pub accent: Color,
    pub title: Color,
    pub subtitle: Color,
    pub button_gradient: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xefeff4),
            item_background: Color::WHITE,
            separator: Color::rgb(0xc8c7cc),
            selection: Color::rgb(0xd9d9d9),
            accent: Color::rgb(0x8878ff),
            title: Color::BLACK,
            subtitle: Color::rgb(0x8e8e93),
            button_gradient: vec![Color::rgb(0x6b93ff), Color::rgb(0x8878ff), Color::rgb(0xe46ace)],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Strings {
    pub title: String,
    pub description: String,
    pub terms: String,
    /// Subscribe button format; `{price}` is replaced by the offering price.
    pub subscribe_format: String,
    /// Button title shown until the offering has loaded.
    pub subscribe_placeholder: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            title: "Ripple Premium".to_string(),
            description: "Go beyond the limits and unlock dozens of exclusive features."
                .to_string(),
            terms: "By subscribing you agree to the Terms of Service.\nSubscriptions renew automatically until cancelled."
                .to_string(),
            subscribe_format: "Subscribe for {price} per month".to_string(),
            subscribe_placeholder: "Subscribe".to_string(),
        }
    }
}

/// Layout context supplied by the hosting navigation stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenEnvironment {
    pub navigation_height: f32,
    pub status_bar_height: f32,
    pub safe_insets: EdgeInsets,
}

/// Hooks into the surrounding application.
#[derive(Clone)]
pub struct ScreenCallbacks {
    /// Raised while a purchase is in flight; disables dismissal gestures.
    pub set_dismissal_disabled: Rc<dyn Fn(bool)>,
    /// Fired once on successful purchase confirmation.
    pub celebration: Rc<dyn Fn()>,
    pub dismiss: Rc<dyn Fn()>,
    pub perk_selected: Rc<dyn Fn(Perk)>,
}

impl Default for ScreenCallbacks {
    fn default() -> Self {
        Self {
            set_dismissal_disabled: Rc::new(|_| {}),
            celebration: Rc::new(|| {}),
            dismiss: Rc::new(|| {}),
            perk_selected: Rc::new(|_| {}),
        }
    }
}

struct ScrollState {
    top_offset: Cell<f32>,
    bottom_distance: Cell<f32>,
}

/// The upsell screen object. Owns the scroll host, the subscribe button, and
/// the purchase flow; reports readiness once the initial content has
/// measured.
pub struct UpsellScreen {
    theme: Theme,
    strings: Strings,
    callbacks: ScreenCallbacks,
    purchase: PurchaseState,
    background: ComponentHost,
    scroll: ComponentHost,
    button: ComponentHost,
    state: Rc<ScrollState>,
    ready: StoreView<bool>,
}

impl UpsellScreen {
    pub fn new(
        theme: Theme,
        strings: Strings,
        manager: Rc<dyn PurchaseManager>,
        confirmation: Rc<dyn ConfirmationApi>,
        queue: Rc<dyn UiQueue>,
        callbacks: ScreenCallbacks,
    ) -> Self {
        let purchase = {
            let set_dismissal_disabled = Rc::clone(&callbacks.set_dismissal_disabled);
            let celebration = Rc::clone(&callbacks.celebration);
            let dismiss = Rc::clone(&callbacks.dismiss);
            let queue = Rc::clone(&queue);
            PurchaseState::new(
                manager,
                confirmation,
                move |in_progress| set_dismissal_disabled(in_progress),
                move || {
                    celebration();
                    let dismiss = Rc::clone(&dismiss);
                    queue.after(DISMISS_DELAY, Box::new(move || dismiss()));
                },
            )
        };

        Self {
            theme,
            strings,
            callbacks,
            purchase,
            background: ComponentHost::new(),
            scroll: ComponentHost::new(),
            button: ComponentHost::new(),
            state: Rc::new(ScrollState {
                top_offset: Cell::new(0.0),
                bottom_distance: Cell::new(0.0),
            }),
            ready: StoreView::empty(),
        }
    }

    /// Fired with `true` once the initial content has measured.
    pub fn ready(&self) -> StoreView<bool> {
        self.ready.clone()
    }

    pub fn purchase(&self) -> &PurchaseState {
        &self.purchase
    }

    /// Starts a purchase of the loaded offering.
    pub fn buy(&self) -> bool {
        self.purchase.buy()
    }

    pub fn top_offset(&self) -> f32 {
        self.state.top_offset.get()
    }

    /// The hero graphic stays visible until the header fully collapses.
    pub fn is_hero_visible(&self) -> bool {
        self.state.top_offset.get() < COLLAPSED_HEADER_OFFSET
    }

    pub fn top_panel_alpha(&self) -> f32 {
        top_panel_alpha(self.state.top_offset.get())
    }

    pub fn title_scale(&self) -> f32 {
        title_scale(self.state.top_offset.get())
    }

    pub fn bottom_panel_alpha(&self) -> f32 {
        bottom_panel_alpha(self.state.bottom_distance.get())
    }

    pub fn button_title(&self) -> String {
        match self.purchase.offering() {
            Some(offering) => self
                .strings
                .subscribe_format
                .replace("{price}", &offering.price),
            None => self.strings.subscribe_placeholder.clone(),
        }
    }

    /// Scrolls the content, driving the header collapse state.
    pub fn set_scroll_offset(&mut self, y: f32) {
        if let Some(view) = self.scroll.view_mut::<ScrollView>() {
            view.set_offset(y);
        }
    }

    /// Ends a drag aimed at `target`, applying the header sticking policy.
    /// Returns the committed offset.
    pub fn end_dragging(&mut self, target: f32) -> f32 {
        match self.scroll.view_mut::<ScrollView>() {
            Some(view) => view.end_dragging(target),
            None => target,
        }
    }

    pub fn update(
        &mut self,
        available: Size,
        screen_env: &ScreenEnvironment,
        transition: Transition,
    ) -> Size {
        let env = Environment::empty().with(*screen_env);

        self.background.update(
            transition,
            &AnyComponent::new(Fill::new(self.theme.background)),
            &env,
            available,
        );
        self.background.set_frame(
            Rect {
                origin: Point::ZERO,
                size: available,
            },
            transition,
        );

        let scrollable = Scrollable {
            content: AnyComponent::new(UpsellContent {
                theme: self.theme.clone(),
                strings: self.strings.clone(),
                top_inset: screen_env.status_bar_height
                    + screen_env.navigation_height
                    + HERO_EXTENT,
                perk_action: Rc::clone(&self.callbacks.perk_selected),
            }),
            content_insets: EdgeInsets::new(
                screen_env.navigation_height,
                0.0,
                BOTTOM_PANEL_HEIGHT + screen_env.safe_insets.bottom,
                0.0,
            ),
            on_offset: {
                let state = Rc::downgrade(&self.state);
                Rc::new(move |top, bottom| {
                    if let Some(state) = Weak::upgrade(&state) {
                        state.top_offset.set(top);
                        state.bottom_distance.set(bottom);
                    }
                })
            },
            on_release: Rc::new(|target: &mut Point| {
                target.y = clamp_scroll_target(target.y);
            }),
        };
        self.scroll.update(transition, &AnyComponent::new(scrollable), &env, available);
        self.scroll.set_frame(
            Rect {
                origin: Point::ZERO,
                size: available,
            },
            transition,
        );

        let button = SolidRoundedButton {
            title: self.button_title(),
            theme: SolidRoundedButtonTheme {
                background_color: self.theme.accent,
                background_colors: self.theme.button_gradient.clone(),
                foreground_color: Color::WHITE,
            },
            height: BUTTON_HEIGHT,
            corner_radius: BUTTON_CORNER_RADIUS,
            gloss: true,
            is_loading: self.purchase.is_in_progress(),
            action: {
                let purchase = self.purchase.clone();
                Rc::new(move || {
                    purchase.buy();
                })
            },
        };
        let button_width = available.width - SIDE_INSET * 2.0;
        self.button.update(
            transition,
            &AnyComponent::new(button),
            &env,
            Size::new(button_width, BUTTON_HEIGHT),
        );
        self.button.set_frame(
            Rect::new(
                SIDE_INSET,
                available.height - screen_env.safe_insets.bottom - BOTTOM_PANEL_HEIGHT + 12.0,
                button_width,
                BUTTON_HEIGHT,
            ),
            transition,
        );

        if self.ready.get().is_none() {
            self.ready.set(true);
        }

        available
    }
}

impl fmt::Debug for UpsellScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpsellScreen")
            .field("purchase", &self.purchase)
            .field("top_offset", &self.top_offset())
            .finish()
    }
}
