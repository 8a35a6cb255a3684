//! Pressable controls and hairline separators.

use std::fmt;
use std::rc::Rc;

use ripple_graphics::Color;
use ripple_layout::Rect;

/// Seconds over which a released highlight fades back out.
pub const HIGHLIGHT_FADE_OUT: f32 = 0.3;

/// A control that tracks its highlighted state and fires an action when
/// pressed. Highlighting swaps the background to the selection color
/// instantly; unhighlighting clears it with a fixed fade-out.
pub struct PressableControl {
    frame: Rect,
    highlight_color: Color,
    fade_out: f32,
    highlighted: bool,
    background: Option<Color>,
    action: Option<Rc<dyn Fn()>>,
}

impl PressableControl {
    pub fn new() -> Self {
        Self {
            frame: Rect::default(),
            highlight_color: Color::CLEAR,
            fade_out: HIGHLIGHT_FADE_OUT,
            highlighted: false,
            background: None,
            action: None,
        }
    }

    /// Re-wires the pressed-state feedback; called on every update pass.
    pub fn set_highlight_feedback(&mut self, color: Color, fade_out: f32) {
        self.highlight_color = color;
        self.fade_out = fade_out;
    }

    pub fn set_action(&mut self, action: Rc<dyn Fn()>) {
        self.action = Some(action);
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
        if highlighted {
            self.background = Some(self.highlight_color);
        } else {
            // Fades out over `fade_out` seconds on screen; the retained state
            // drops straight to none.
            self.background = None;
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn fade_out(&self) -> f32 {
        self.fade_out
    }

    pub fn press(&self) {
        if let Some(action) = &self.action {
            action();
        }
    }
}

impl Default for PressableControl {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PressableControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressableControl")
            .field("frame", &self.frame)
            .field("highlighted", &self.highlighted)
            .finish()
    }
}

/// A hairline separator between adjacent rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeparatorView {
    pub frame: Rect,
    pub color: Color,
}

impl SeparatorView {
    pub fn new() -> Self {
        Self {
            frame: Rect::default(),
            color: Color::CLEAR,
        }
    }
}
