use std::cell::RefCell;
use std::rc::Rc;

use ripple_flow::Transition;
use ripple_graphics::Color;
use ripple_keyboard::{
    input_data, EntityKeyboardView, KeyboardInputNode, Page, PremiumPolicy, TOP_PANEL_HEIGHT,
};
use ripple_layout::EdgeInsets;
use ripple_store::{CollectionsView, FileId, OrderedListId, StoreView};
use ripple_testing::{animated_sticker, sticker, video_sticker, CollectionsViewBuilder};

#[test]
fn store_changes_flow_through_to_the_hosted_keyboard() {
    let emoji = StoreView::empty();
    let stickers = StoreView::empty();
    let gifs = StoreView::empty();
    let policy = PremiumPolicy {
        account_is_premium: false,
        features_enabled: true,
    };
    let combined = input_data(&emoji, &stickers, &gifs, policy);

    let selected = Rc::new(RefCell::new(Vec::new()));
    let extensions = Rc::new(RefCell::new(Vec::new()));
    let mut node = {
        let selected = Rc::clone(&selected);
        let extensions = Rc::clone(&extensions);
        KeyboardInputNode::new(
            &combined,
            Color::WHITE,
            move |item| selected.borrow_mut().push(item.file.id),
            move |extension| extensions.borrow_mut().push(extension),
        )
    };

    // Nothing is delivered until all three sources have produced a value.
    node.update_layout(375.0, EdgeInsets::default(), 271.0, Transition::immediate());
    assert!(node.current_data().is_none());

    emoji.set(
        CollectionsViewBuilder::new()
            .pack(
                1,
                "DuckEmoji",
                "Ducks",
                vec![animated_sticker(1, "🦆")],
            )
            .build(),
    );
    stickers.set(
        CollectionsViewBuilder::new()
            .ordered_list(
                OrderedListId::SavedStickers,
                vec![sticker(10, "🐈"), sticker(11, "🐕")],
            )
            .build(),
    );
    assert!(node.current_data().is_none());

    gifs.set(
        CollectionsViewBuilder::new()
            .ordered_list(OrderedListId::RecentGifs, vec![video_sticker(20, "")])
            .build(),
    );
    let data = node.current_data();
    assert_eq!(data.as_ref().map(|d| d.emoji.len()), Some(1));
    assert_eq!(data.as_ref().map(|d| d.stickers.len()), Some(1));
    assert_eq!(data.as_ref().map(|d| d.gifs.len()), Some(1));

    let (height, additional) =
        node.update_layout(375.0, EdgeInsets::default(), 271.0, Transition::immediate());
    assert_eq!((height, additional), (271.0, 0.0));
    assert_eq!(*extensions.borrow(), vec![TOP_PANEL_HEIGHT]);

    let view = node.host().view_ref::<EntityKeyboardView>();
    assert!(view.is_some_and(|view| view.select_item(Page::Stickers, 0, 1)));
    assert_eq!(*selected.borrow(), vec![FileId(11)]);
}

#[test]
fn gif_store_updates_replace_the_gif_page() {
    let emoji = StoreView::with_value(CollectionsView::default());
    let stickers = StoreView::with_value(CollectionsView::default());
    let gifs = StoreView::with_value(
        CollectionsViewBuilder::new()
            .ordered_list(OrderedListId::RecentGifs, vec![video_sticker(1, "")])
            .build(),
    );
    let combined = input_data(
        &emoji,
        &stickers,
        &gifs,
        PremiumPolicy {
            account_is_premium: false,
            features_enabled: true,
        },
    );
    assert_eq!(combined.get().map(|data| data.gifs.len()), Some(1));

    gifs.set(
        CollectionsViewBuilder::new()
            .ordered_list(
                OrderedListId::RecentGifs,
                vec![video_sticker(2, ""), video_sticker(3, "")],
            )
            .build(),
    );
    let ids: Option<Vec<i64>> = combined
        .get()
        .map(|data| data.gifs.iter().map(|item| item.file.id.0).collect());
    assert_eq!(ids, Some(vec![2, 3]));
}
