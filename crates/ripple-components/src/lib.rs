//! Reusable components for the Ripple client: leaf content (fills, labels,
//! buttons), the keyed-reconciliation section list, and the scrollable
//! content host.

pub mod button;
pub mod control;
pub mod scroll;
pub mod section_group;
pub mod shapes;
pub mod text;

pub use button::{SolidRoundedButton, SolidRoundedButtonTheme, SolidRoundedButtonView};
pub use control::{PressableControl, SeparatorView, HIGHLIGHT_FADE_OUT};
pub use scroll::{ScrollChildEnvironment, ScrollView, Scrollable};
pub use section_group::{SectionGroup, SectionGroupView, SectionItem};
pub use shapes::{Fill, FillView, RoundedRect, RoundedRectView};
pub use text::{Font, FontWeight, Label, LabelView, TextAlignment};
