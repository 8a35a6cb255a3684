//! The keyboard input node consumed by the hosting chat surface.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use ripple_flow::{AnyComponent, ComponentHost, Disposable, Environment, Transition};
use ripple_graphics::Color;
use ripple_layout::{EdgeInsets, Rect, Size};
use ripple_store::StoreView;

use crate::aggregation::{GroupId, InputData, ItemGroup, KeyboardItem};
use crate::pager::{EntityKeyboard, ItemLayoutKind, PagerContent};

/// Height of the group-tab panel shown above the keyboard when grouped
/// content is present.
pub const TOP_PANEL_HEIGHT: f32 = 41.0;

/// Holds the latest combined content snapshot and hosts the pager. The chat
/// surface drives it through `update_layout` and reads back the height to
/// reserve.
pub struct KeyboardInputNode {
    data: Rc<RefCell<Option<InputData>>>,
    _subscription: Disposable,
    host: ComponentHost,
    background: Color,
    on_item_selected: Rc<dyn Fn(&KeyboardItem)>,
    on_top_extension: Rc<dyn Fn(f32)>,
    last_extension: Cell<f32>,
}

impl KeyboardInputNode {
    pub fn new(
        input: &StoreView<InputData>,
        background: Color,
        on_item_selected: impl Fn(&KeyboardItem) + 'static,
        on_top_extension: impl Fn(f32) + 'static,
    ) -> Self {
        let data = Rc::new(RefCell::new(None));
        let subscription = {
            let data = Rc::clone(&data);
            input.observe(move |snapshot: &InputData| {
                *data.borrow_mut() = Some(snapshot.clone());
            })
        };
        Self {
            data,
            _subscription: subscription,
            host: ComponentHost::new(),
            background,
            on_item_selected: Rc::new(on_item_selected),
            on_top_extension: Rc::new(on_top_extension),
            last_extension: Cell::new(0.0),
        }
    }

    pub fn current_data(&self) -> Option<InputData> {
        self.data.borrow().clone()
    }

    pub fn host(&self) -> &ComponentHost {
        &self.host
    }

    /// Lays the keyboard out at the standard input height, keeping the safe
    /// insets clear of the pager content. Returns the height consumed and the
    /// additional bottom offset, which is always zero for this node. The top
    /// panel extension is forwarded through the callback only when it
    /// changes.
    pub fn update_layout(
        &mut self,
        width: f32,
        insets: EdgeInsets,
        standard_input_height: f32,
        transition: Transition,
    ) -> (f32, f32) {
        let snapshot = self.data.borrow().clone();
        let extension = match snapshot {
            Some(data) => {
                let has_groups = !data.emoji.is_empty() || !data.stickers.is_empty();
                let gif_groups = if data.gifs.is_empty() {
                    Vec::new()
                } else {
                    vec![ItemGroup {
                        id: GroupId::Named("gifs"),
                        title: None,
                        items: data.gifs,
                    }]
                };
                let keyboard = EntityKeyboard {
                    background: self.background,
                    emoji: PagerContent {
                        layout: ItemLayoutKind::Compact,
                        groups: data.emoji,
                        on_item_selected: Rc::clone(&self.on_item_selected),
                    },
                    stickers: PagerContent {
                        layout: ItemLayoutKind::Detailed,
                        groups: data.stickers,
                        on_item_selected: Rc::clone(&self.on_item_selected),
                    },
                    gifs: PagerContent {
                        layout: ItemLayoutKind::Detailed,
                        groups: gif_groups,
                        on_item_selected: Rc::clone(&self.on_item_selected),
                    },
                };
                let content_width = width - insets.left - insets.right;
                let content_height = standard_input_height - insets.bottom;
                self.host.update(
                    transition,
                    &AnyComponent::new(keyboard),
                    &Environment::empty(),
                    Size::new(content_width, content_height),
                );
                self.host.set_frame(
                    Rect::new(insets.left, 0.0, content_width, content_height),
                    transition,
                );
                if has_groups {
                    TOP_PANEL_HEIGHT
                } else {
                    0.0
                }
            }
            None => 0.0,
        };

        if extension != self.last_extension.get() {
            self.last_extension.set(extension);
            (self.on_top_extension)(extension);
        }

        (standard_input_height, 0.0)
    }
}

impl fmt::Debug for KeyboardInputNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardInputNode")
            .field("has_data", &self.data.borrow().is_some())
            .field("top_extension", &self.last_extension.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_testing::sticker;

    fn snapshot_with_saved() -> InputData {
        InputData {
            emoji: Vec::new(),
            stickers: vec![ItemGroup {
                id: GroupId::Named("saved"),
                title: None,
                items: vec![sticker(1, "🐈").into()],
            }],
            gifs: Vec::new(),
        }
    }

    #[test]
    fn layout_contract_returns_the_standard_height() {
        let input = StoreView::empty();
        let mut node = KeyboardInputNode::new(&input, Color::WHITE, |_| {}, |_| {});
        assert_eq!(
            node.update_layout(375.0, EdgeInsets::default(), 271.0, Transition::immediate()),
            (271.0, 0.0)
        );
        assert!(!node.host().is_materialized());

        input.set(snapshot_with_saved());
        assert_eq!(
            node.update_layout(375.0, EdgeInsets::default(), 271.0, Transition::immediate()),
            (271.0, 0.0)
        );
        assert!(node.host().is_materialized());
        assert_eq!(node.host().size(), Size::new(375.0, 271.0));
    }

    #[test]
    fn safe_insets_are_kept_clear_of_the_pager_content() {
        let input = StoreView::with_value(snapshot_with_saved());
        let mut node = KeyboardInputNode::new(&input, Color::WHITE, |_| {}, |_| {});
        let insets = EdgeInsets::new(0.0, 8.0, 34.0, 8.0);
        assert_eq!(
            node.update_layout(375.0, insets, 271.0, Transition::immediate()),
            (271.0, 0.0)
        );
        assert_eq!(node.host().size(), Size::new(359.0, 237.0));
        assert_eq!(node.host().frame(), Rect::new(8.0, 0.0, 359.0, 237.0));
    }

    #[test]
    fn top_extension_is_forwarded_only_on_change() {
        let input = StoreView::empty();
        let extensions = Rc::new(RefCell::new(Vec::new()));
        let mut node = {
            let extensions = Rc::clone(&extensions);
            KeyboardInputNode::new(&input, Color::WHITE, |_| {}, move |extension| {
                extensions.borrow_mut().push(extension)
            })
        };

        node.update_layout(375.0, EdgeInsets::default(), 271.0, Transition::immediate());
        assert!(extensions.borrow().is_empty());

        input.set(snapshot_with_saved());
        node.update_layout(375.0, EdgeInsets::default(), 271.0, Transition::immediate());
        node.update_layout(375.0, EdgeInsets::default(), 271.0, Transition::immediate());
        assert_eq!(*extensions.borrow(), vec![TOP_PANEL_HEIGHT]);

        input.set(InputData {
            emoji: Vec::new(),
            stickers: Vec::new(),
            gifs: Vec::new(),
        });
        node.update_layout(375.0, EdgeInsets::default(), 271.0, Transition::immediate());
        assert_eq!(*extensions.borrow(), vec![TOP_PANEL_HEIGHT, 0.0]);
    }

    #[test]
    fn subscription_tracks_the_latest_snapshot() {
        let input = StoreView::with_value(snapshot_with_saved());
        let node = KeyboardInputNode::new(&input, Color::WHITE, |_| {}, |_| {});
        assert_eq!(
            node.current_data().map(|data| data.stickers.len()),
            Some(1)
        );
    }
}
