//! Solid rounded call-to-action button.

use std::fmt;
use std::rc::Rc;

use ripple_flow::{Component, Environment, Transition};
use ripple_graphics::Color;
use ripple_layout::Size;

#[derive(Clone, Debug, PartialEq)]
pub struct SolidRoundedButtonTheme {
    pub background_color: Color,
    /// Gradient stops; falls back to `background_color` when empty.
    pub background_colors: Vec<Color>,
    pub foreground_color: Color,
}

/// The primary call-to-action button: a solid rounded capsule with an
/// optional gloss and a loading spinner replacing the title while an
/// operation is in flight. The press action is not part of equality.
#[derive(Clone)]
pub struct SolidRoundedButton {
    pub title: String,
    pub theme: SolidRoundedButtonTheme,
    pub height: f32,
    pub corner_radius: f32,
    pub gloss: bool,
    pub is_loading: bool,
    pub action: Rc<dyn Fn()>,
}

impl PartialEq for SolidRoundedButton {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.theme == other.theme
            && self.height == other.height
            && self.corner_radius == other.corner_radius
            && self.gloss == other.gloss
            && self.is_loading == other.is_loading
    }
}

impl fmt::Debug for SolidRoundedButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolidRoundedButton")
            .field("title", &self.title)
            .field("is_loading", &self.is_loading)
            .finish()
    }
}

pub struct SolidRoundedButtonView {
    pub title: String,
    pub theme: Option<SolidRoundedButtonTheme>,
    pub is_loading: bool,
    action: Option<Rc<dyn Fn()>>,
}

impl SolidRoundedButtonView {
    pub fn press(&self) {
        if let Some(action) = &self.action {
            action();
        }
    }
}

impl fmt::Debug for SolidRoundedButtonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolidRoundedButtonView")
            .field("title", &self.title)
            .field("is_loading", &self.is_loading)
            .finish()
    }
}

impl Component for SolidRoundedButton {
    type View = SolidRoundedButtonView;

    fn make_view(&self) -> SolidRoundedButtonView {
        SolidRoundedButtonView {
            title: String::new(),
            theme: None,
            is_loading: false,
            action: None,
        }
    }

    fn update(
        &self,
        view: &mut SolidRoundedButtonView,
        available: Size,
        _env: &Environment,
        _transition: Transition,
    ) -> Size {
        view.title = self.title.clone();
        view.theme = Some(self.theme.clone());
        view.is_loading = self.is_loading;
        view.action = Some(Rc::clone(&self.action));
        Size::new(available.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use ripple_flow::{AnyComponent, ComponentHost};

    fn button(is_loading: bool, pressed: &Rc<Cell<usize>>) -> SolidRoundedButton {
        let pressed = Rc::clone(pressed);
        SolidRoundedButton {
            title: "Subscribe".to_string(),
            theme: SolidRoundedButtonTheme {
                background_color: Color::rgb(0x8878ff),
                background_colors: vec![Color::rgb(0x0077ff), Color::rgb(0xe46ace)],
                foreground_color: Color::WHITE,
            },
            height: 50.0,
            corner_radius: 10.0,
            gloss: true,
            is_loading,
            action: Rc::new(move || pressed.set(pressed.get() + 1)),
        }
    }

    #[test]
    fn equality_ignores_the_action() {
        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));
        assert_eq!(button(false, &a), button(false, &b));
        assert_ne!(button(false, &a), button(true, &b));
    }

    #[test]
    fn press_reaches_the_latest_action() {
        let pressed = Rc::new(Cell::new(0));
        let mut host = ComponentHost::new();
        host.update(
            Transition::immediate(),
            &AnyComponent::new(button(false, &pressed)),
            &Environment::empty(),
            Size::new(343.0, 50.0),
        );
        if let Some(view) = host.view_ref::<SolidRoundedButtonView>() {
            view.press();
        }
        assert_eq!(pressed.get(), 1);
        assert_eq!(host.size(), Size::new(343.0, 50.0));
    }
}
