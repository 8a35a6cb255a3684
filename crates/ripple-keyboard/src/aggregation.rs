//! Keyboard content aggregation.
//!
//! Transforms raw store snapshots (emoji collections, sticker lists, recent
//! GIFs) into display-ready grouped item lists. The three transforms are
//! recomputed reactively on store changes and combined into one snapshot only
//! once all three sources have produced a value.

use ahash::AHashSet;
use indexmap::IndexMap;

use ripple_store::{
    combined3, CollectionId, CollectionsView, FileId, OrderedListId, StickerFile, StoreView,
};

pub const RECENT_TITLE: &str = "RECENTLY USED";
pub const PREMIUM_TITLE: &str = "PREMIUM";
/// At most this many recent stickers are shown.
pub const RECENT_STICKER_LIMIT: usize = 5;

/// Identity of a display group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupId {
    Named(&'static str),
    Collection(CollectionId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardItem {
    pub file: StickerFile,
}

impl From<StickerFile> for KeyboardItem {
    fn from(file: StickerFile) -> Self {
        Self { file }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemGroup {
    pub id: GroupId,
    /// Uppercased display title; untitled groups render without a header.
    pub title: Option<String>,
    pub items: Vec<KeyboardItem>,
}

/// Premium gating applied to sticker aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PremiumPolicy {
    /// The viewing account has a premium subscription.
    pub account_is_premium: bool,
    /// Premium features are available at all on this deployment.
    pub features_enabled: bool,
}

fn qualifies_as_emoji(file: &StickerFile) -> bool {
    file.is_animated || file.is_video
}

fn pack_info<'a>(view: &'a CollectionsView, id: CollectionId) -> Option<&'a str> {
    match view.info(id) {
        Some(info) => Some(info.title.as_str()),
        None => {
            log::warn!("collection {id:?} has entries but no info record");
            None
        }
    }
}

/// Groups emoji content: the view's recent list becomes a synthetic "recent"
/// group, followed by every pack whose short name contains "emoji"
/// (case-insensitive), keeping only animated or video files.
pub fn emoji_groups(view: &CollectionsView) -> Vec<ItemGroup> {
    let mut groups: Vec<ItemGroup> = Vec::new();

    if let Some(recent) = view.ordered_list(OrderedListId::RecentStickers) {
        let items: Vec<KeyboardItem> = recent
            .items
            .iter()
            .filter(|file| qualifies_as_emoji(file))
            .cloned()
            .map(KeyboardItem::from)
            .collect();
        if !items.is_empty() {
            groups.push(ItemGroup {
                id: GroupId::Named("recent"),
                title: Some(RECENT_TITLE.to_string()),
                items,
            });
        }
    }

    let mut packs: IndexMap<CollectionId, ItemGroup> = IndexMap::new();
    for entry in &view.entries {
        if !qualifies_as_emoji(&entry.file) {
            continue;
        }
        let Some(info) = view.info(entry.collection_id) else {
            log::warn!("collection {:?} has entries but no info record", entry.collection_id);
            continue;
        };
        if !info.short_name.to_lowercase().contains("emoji") {
            continue;
        }
        let title = info.title.to_uppercase();
        packs
            .entry(entry.collection_id)
            .or_insert_with(|| ItemGroup {
                id: GroupId::Collection(entry.collection_id),
                title: Some(title),
                items: Vec::new(),
            })
            .items
            .push(entry.file.clone().into());
    }
    groups.extend(packs.into_values());
    groups
}

/// Groups sticker content: saved, the capped recent list, the deduplicated
/// premium union for premium accounts, then every pack in collection order.
/// Premium-restricted files are dropped from every list when premium features
/// are disabled.
pub fn sticker_groups(view: &CollectionsView, policy: PremiumPolicy) -> Vec<ItemGroup> {
    let mut groups: Vec<ItemGroup> = Vec::new();

    if let Some(saved) = view.ordered_list(OrderedListId::SavedStickers) {
        let items: Vec<KeyboardItem> = saved
            .items
            .iter()
            .filter(|file| policy.features_enabled || !file.is_premium)
            .cloned()
            .map(KeyboardItem::from)
            .collect();
        if !items.is_empty() {
            groups.push(ItemGroup {
                id: GroupId::Named("saved"),
                title: None,
                items,
            });
        }
    }

    if let Some(recent) = view.ordered_list(OrderedListId::RecentStickers) {
        let items: Vec<KeyboardItem> = recent
            .items
            .iter()
            .filter(|file| policy.features_enabled || !file.is_premium)
            .take(RECENT_STICKER_LIMIT)
            .cloned()
            .map(KeyboardItem::from)
            .collect();
        if !items.is_empty() {
            groups.push(ItemGroup {
                id: GroupId::Named("recent"),
                title: Some(RECENT_TITLE.to_string()),
                items,
            });
        }
    }

    if policy.account_is_premium {
        let mut seen: AHashSet<FileId> = AHashSet::new();
        let mut items: Vec<KeyboardItem> = Vec::new();
        for list_id in [
            OrderedListId::PremiumStickers,
            OrderedListId::CloudPremiumStickers,
        ] {
            if let Some(list) = view.ordered_list(list_id) {
                for file in &list.items {
                    if !policy.features_enabled && file.is_premium {
                        continue;
                    }
                    if seen.insert(file.id) {
                        items.push(file.clone().into());
                    }
                }
            }
        }
        if !items.is_empty() {
            groups.push(ItemGroup {
                id: GroupId::Named("premium"),
                title: Some(PREMIUM_TITLE.to_string()),
                items,
            });
        }
    }

    let mut packs: IndexMap<CollectionId, ItemGroup> = IndexMap::new();
    for entry in &view.entries {
        let Some(title) = pack_info(view, entry.collection_id) else {
            continue;
        };
        packs
            .entry(entry.collection_id)
            .or_insert_with(|| ItemGroup {
                id: GroupId::Collection(entry.collection_id),
                title: Some(title.to_uppercase()),
                items: Vec::new(),
            })
            .items
            .push(entry.file.clone().into());
    }
    groups.extend(packs.into_values());
    groups
}

/// Maps the recent-GIF list one-to-one into display items.
pub fn gif_items(view: &CollectionsView) -> Vec<KeyboardItem> {
    view.ordered_list(OrderedListId::RecentGifs)
        .map(|list| list.items.iter().cloned().map(KeyboardItem::from).collect())
        .unwrap_or_default()
}

/// One combined snapshot of everything the keyboard shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputData {
    pub emoji: Vec<ItemGroup>,
    pub stickers: Vec<ItemGroup>,
    pub gifs: Vec<KeyboardItem>,
}

/// Derives the combined keyboard snapshot from the three store views. The
/// result is withheld until all three have produced at least one value.
pub fn input_data(
    emoji: &StoreView<CollectionsView>,
    stickers: &StoreView<CollectionsView>,
    gifs: &StoreView<CollectionsView>,
    policy: PremiumPolicy,
) -> StoreView<InputData> {
    combined3(emoji, stickers, gifs, move |emoji, stickers, gifs| {
        InputData {
            emoji: emoji_groups(emoji),
            stickers: sticker_groups(stickers, policy),
            gifs: gif_items(gifs),
        }
    })
}
