//! Composite emoji/sticker/GIF input keyboard.
//!
//! Reads three kinds of collections from the local store, groups and filters
//! them into display-ready lists, and feeds the combined snapshot into a
//! paged keyboard component hosted by [`KeyboardInputNode`].

pub mod aggregation;
pub mod node;
pub mod pager;

pub use aggregation::{
    emoji_groups, gif_items, input_data, sticker_groups, GroupId, InputData, ItemGroup,
    KeyboardItem, PremiumPolicy, PREMIUM_TITLE, RECENT_STICKER_LIMIT, RECENT_TITLE,
};
pub use node::{KeyboardInputNode, TOP_PANEL_HEIGHT};
pub use pager::{EntityKeyboard, EntityKeyboardView, ItemLayoutKind, Page, PagerContent};
