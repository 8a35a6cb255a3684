//! Flat fills and rounded rectangles.

use ripple_flow::{Component, Environment, Transition};
use ripple_graphics::{Color, GradientDirection};
use ripple_layout::Size;

/// Fills the available space with a single color.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub color: Color,
}

impl Fill {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

#[derive(Debug)]
pub struct FillView {
    pub color: Color,
}

impl Component for Fill {
    type View = FillView;

    fn make_view(&self) -> FillView {
        FillView { color: self.color }
    }

    fn update(
        &self,
        view: &mut FillView,
        available: Size,
        _env: &Environment,
        _transition: Transition,
    ) -> Size {
        view.color = self.color;
        available
    }
}

/// A rounded rectangle, optionally gradient-filled.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundedRect {
    pub colors: Vec<Color>,
    pub corner_radius: f32,
    pub gradient_direction: Option<GradientDirection>,
}

impl RoundedRect {
    pub fn solid(color: Color, corner_radius: f32) -> Self {
        Self {
            colors: vec![color],
            corner_radius,
            gradient_direction: None,
        }
    }

    pub fn gradient(colors: Vec<Color>, corner_radius: f32, direction: GradientDirection) -> Self {
        Self {
            colors,
            corner_radius,
            gradient_direction: Some(direction),
        }
    }
}

#[derive(Debug)]
pub struct RoundedRectView {
    pub colors: Vec<Color>,
    pub corner_radius: f32,
    pub gradient_direction: Option<GradientDirection>,
}

impl Component for RoundedRect {
    type View = RoundedRectView;

    fn make_view(&self) -> RoundedRectView {
        RoundedRectView {
            colors: Vec::new(),
            corner_radius: 0.0,
            gradient_direction: None,
        }
    }

    fn update(
        &self,
        view: &mut RoundedRectView,
        available: Size,
        _env: &Environment,
        _transition: Transition,
    ) -> Size {
        view.colors = self.colors.clone();
        view.corner_radius = self.corner_radius;
        view.gradient_direction = self.gradient_direction;
        available
    }
}
