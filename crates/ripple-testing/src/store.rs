//! Fixture builders for store snapshots.

use ripple_store::{
    CollectionEntry, CollectionId, CollectionInfo, CollectionsView, FileId, OrderedListId,
    OrderedListView, StickerFile,
};

pub fn sticker(id: i64, emoji: &str) -> StickerFile {
    StickerFile {
        id: FileId(id),
        emoji: emoji.to_string(),
        is_animated: false,
        is_video: false,
        is_premium: false,
    }
}

pub fn animated_sticker(id: i64, emoji: &str) -> StickerFile {
    StickerFile {
        is_animated: true,
        ..sticker(id, emoji)
    }
}

pub fn video_sticker(id: i64, emoji: &str) -> StickerFile {
    StickerFile {
        is_video: true,
        ..sticker(id, emoji)
    }
}

pub fn premium_sticker(id: i64, emoji: &str) -> StickerFile {
    StickerFile {
        is_premium: true,
        ..animated_sticker(id, emoji)
    }
}

/// Builds a [`CollectionsView`] pack by pack.
#[derive(Default)]
pub struct CollectionsViewBuilder {
    view: CollectionsView,
}

impl CollectionsViewBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pack(
        mut self,
        id: i64,
        short_name: &str,
        title: &str,
        files: Vec<StickerFile>,
    ) -> Self {
        let collection_id = CollectionId::sticker_pack(id);
        self.view.infos.push(CollectionInfo {
            id: collection_id,
            short_name: short_name.to_string(),
            title: title.to_string(),
        });
        for file in files {
            self.view.entries.push(CollectionEntry {
                collection_id,
                file,
            });
        }
        self
    }

    pub fn ordered_list(mut self, id: OrderedListId, items: Vec<StickerFile>) -> Self {
        self.view.ordered_lists.push(OrderedListView { id, items });
        self
    }

    pub fn build(self) -> CollectionsView {
        self.view
    }
}
