//! Collection data model.
//!
//! Mirrors the shape of the client's local object store: item collections
//! (sticker packs) identified by a namespaced id, plus a handful of ordered
//! lists (saved, recent, premium) living alongside them in the same view.

/// Identity of a media file, unique across the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub i64);

/// A sticker or GIF file as stored locally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StickerFile {
    pub id: FileId,
    /// The emoji this sticker stands in for, if any.
    pub emoji: String,
    pub is_animated: bool,
    pub is_video: bool,
    /// Usable only by premium accounts.
    pub is_premium: bool,
}

impl StickerFile {
    pub fn new(id: i64) -> Self {
        Self {
            id: FileId(id),
            emoji: String::new(),
            is_animated: false,
            is_video: false,
            is_premium: false,
        }
    }
}

/// Namespaced identity of an item collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId {
    pub namespace: i32,
    pub id: i64,
}

impl CollectionId {
    /// Namespace of cloud sticker packs.
    pub const CLOUD_STICKER_PACKS: i32 = 0;

    pub const fn new(namespace: i32, id: i64) -> Self {
        Self { namespace, id }
    }

    pub const fn sticker_pack(id: i64) -> Self {
        Self::new(Self::CLOUD_STICKER_PACKS, id)
    }
}

/// Metadata of one item collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionInfo {
    pub id: CollectionId,
    /// Short machine-facing name, e.g. `UtyaDuckEmoji`.
    pub short_name: String,
    /// Display title as stored.
    pub title: String,
}

/// One item of a collection, in collection order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionEntry {
    pub collection_id: CollectionId,
    pub file: StickerFile,
}

/// Well-known ordered item lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderedListId {
    SavedStickers,
    RecentStickers,
    PremiumStickers,
    CloudPremiumStickers,
    RecentGifs,
}

/// A snapshot of one ordered item list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedListView {
    pub id: OrderedListId,
    pub items: Vec<StickerFile>,
}

/// A versioned snapshot of item collections and the ordered lists requested
/// alongside them, as delivered by one store query view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionsView {
    /// Collection metadata in collection order.
    pub infos: Vec<CollectionInfo>,
    /// Entries of all collections, ordered by collection then item index.
    pub entries: Vec<CollectionEntry>,
    pub ordered_lists: Vec<OrderedListView>,
}

impl CollectionsView {
    pub fn ordered_list(&self, id: OrderedListId) -> Option<&OrderedListView> {
        self.ordered_lists.iter().find(|list| list.id == id)
    }

    pub fn info(&self, id: CollectionId) -> Option<&CollectionInfo> {
        self.infos.iter().find(|info| info.id == id)
    }
}
