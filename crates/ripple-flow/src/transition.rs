//! Transition descriptors passed down through an update pass.

/// How a property change introduced by an update pass is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Animation {
    /// Apply instantly.
    None,
    /// Animate over `duration` seconds.
    Curve { duration: f32 },
}

/// Describes how one update pass should apply its changes.
///
/// A transition flows from the top of an update pass down to every child; a
/// container may locally downgrade it (see [`Transition::with_animation`]) so
/// that newly materialized children join without animation even when the
/// overall pass is animated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub animation: Animation,
}

impl Transition {
    pub const fn immediate() -> Self {
        Self {
            animation: Animation::None,
        }
    }

    pub const fn animated(duration: f32) -> Self {
        Self {
            animation: Animation::Curve { duration },
        }
    }

    /// Returns this transition with the animation replaced.
    pub fn with_animation(self, animation: Animation) -> Self {
        Self { animation }
    }

    pub fn is_animated(&self) -> bool {
        !matches!(self.animation, Animation::None)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::immediate()
    }
}
