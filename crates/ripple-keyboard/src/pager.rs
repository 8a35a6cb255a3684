//! The paged keyboard component: one page each for emoji, stickers, GIFs.

use std::fmt;
use std::rc::Rc;

use ripple_flow::{Component, Environment, Transition};
use ripple_graphics::Color;
use ripple_layout::Size;

use crate::aggregation::{ItemGroup, KeyboardItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemLayoutKind {
    /// Dense grid, used for emoji.
    Compact,
    /// Larger cells, used for stickers and GIFs.
    Detailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Emoji,
    Stickers,
    Gifs,
}

/// One page of the keyboard. The selection callback is not part of equality.
#[derive(Clone)]
pub struct PagerContent {
    pub layout: ItemLayoutKind,
    pub groups: Vec<ItemGroup>,
    pub on_item_selected: Rc<dyn Fn(&KeyboardItem)>,
}

impl PartialEq for PagerContent {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout && self.groups == other.groups
    }
}

impl fmt::Debug for PagerContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerContent")
            .field("layout", &self.layout)
            .field("groups", &self.groups.len())
            .finish()
    }
}

#[derive(Clone, PartialEq)]
pub struct EntityKeyboard {
    pub background: Color,
    pub emoji: PagerContent,
    pub stickers: PagerContent,
    pub gifs: PagerContent,
}

impl fmt::Debug for EntityKeyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityKeyboard")
            .field("emoji", &self.emoji)
            .field("stickers", &self.stickers)
            .field("gifs", &self.gifs)
            .finish()
    }
}

pub struct EntityKeyboardView {
    background: Color,
    emoji: PagerContent,
    stickers: PagerContent,
    gifs: PagerContent,
    current_page: Page,
}

impl EntityKeyboardView {
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn set_current_page(&mut self, page: Page) {
        self.current_page = page;
    }

    pub fn page(&self, page: Page) -> &PagerContent {
        match page {
            Page::Emoji => &self.emoji,
            Page::Stickers => &self.stickers,
            Page::Gifs => &self.gifs,
        }
    }

    /// Simulates a tap on the item at `(group, index)` of `page`. Returns
    /// whether such an item exists.
    pub fn select_item(&self, page: Page, group: usize, index: usize) -> bool {
        let content = self.page(page);
        match content.groups.get(group).and_then(|g| g.items.get(index)) {
            Some(item) => {
                (content.on_item_selected)(item);
                true
            }
            None => false,
        }
    }
}

impl Component for EntityKeyboard {
    type View = EntityKeyboardView;

    fn make_view(&self) -> EntityKeyboardView {
        EntityKeyboardView {
            background: self.background,
            emoji: self.emoji.clone(),
            stickers: self.stickers.clone(),
            gifs: self.gifs.clone(),
            current_page: Page::Emoji,
        }
    }

    fn update(
        &self,
        view: &mut EntityKeyboardView,
        available: Size,
        _env: &Environment,
        _transition: Transition,
    ) -> Size {
        view.background = self.background;
        view.emoji = self.emoji.clone();
        view.stickers = self.stickers.clone();
        view.gifs = self.gifs.clone();
        available
    }
}
