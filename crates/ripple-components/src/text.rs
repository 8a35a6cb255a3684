//! Headless text measurement and the label component.
//!
//! The client renders text through a platform text system; for layout this
//! layer only needs sizes, so measurement uses a deterministic metric: a
//! fixed advance per character and a fixed line height derived from the font
//! size. Wrapping is per character, honoring hard line breaks.

use ripple_flow::{Component, Environment, Transition};
use ripple_graphics::Color;
use ripple_layout::Size;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Semibold,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    pub size: f32,
    pub weight: FontWeight,
}

impl Font {
    pub const fn regular(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
        }
    }

    pub const fn semibold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Semibold,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }

    pub fn line_height(&self) -> f32 {
        (self.size * 1.2).ceil()
    }

    pub fn char_advance(&self) -> f32 {
        self.size * 0.6
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlignment {
    Natural,
    Center,
}

/// A text block with deterministic measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub font: Font,
    pub color: Color,
    /// Maximum number of lines; `0` means unlimited.
    pub max_lines: usize,
    pub alignment: TextAlignment,
}

impl Label {
    pub fn new(text: impl Into<String>, font: Font, color: Color) -> Self {
        Self {
            text: text.into(),
            font,
            color,
            max_lines: 1,
            alignment: TextAlignment::Natural,
        }
    }

    pub fn multiline(text: impl Into<String>, font: Font, color: Color) -> Self {
        Self {
            max_lines: 0,
            ..Self::new(text, font, color)
        }
    }

    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Measures `text` within `max_width`, returning the occupied size and
    /// the number of laid-out lines.
    pub fn measure(text: &str, font: Font, max_width: f32, max_lines: usize) -> (Size, usize) {
        let advance = font.char_advance();
        let chars_per_line = if max_width.is_finite() {
            ((max_width / advance).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let mut lines = 0usize;
        let mut widest = 0usize;
        for segment in text.split('\n') {
            let chars = segment.chars().count();
            let segment_lines = if chars == 0 {
                1
            } else {
                chars.div_ceil(chars_per_line)
            };
            lines += segment_lines;
            widest = widest.max(chars.min(chars_per_line));
        }
        if max_lines > 0 {
            lines = lines.min(max_lines);
        }

        let width = if max_width.is_finite() {
            (widest as f32 * advance).min(max_width)
        } else {
            widest as f32 * advance
        };
        (Size::new(width, lines as f32 * font.line_height()), lines)
    }
}

#[derive(Debug)]
pub struct LabelView {
    pub text: String,
    pub font: Font,
    pub color: Color,
    pub lines: usize,
}

impl Component for Label {
    type View = LabelView;

    fn make_view(&self) -> LabelView {
        LabelView {
            text: String::new(),
            font: self.font,
            color: self.color,
            lines: 0,
        }
    }

    fn update(
        &self,
        view: &mut LabelView,
        available: Size,
        _env: &Environment,
        _transition: Transition,
    ) -> Size {
        let (size, lines) = Self::measure(&self.text, self.font, available.width, self.max_lines);
        view.text = self.text.clone();
        view.font = self.font;
        view.color = self.color;
        view.lines = lines;
        size
    }
}
