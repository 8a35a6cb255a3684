//! Local object-store plumbing: the collection data model and live,
//! reactively updating views over it.

pub mod model;
pub mod view;

pub use model::{
    CollectionEntry, CollectionId, CollectionInfo, CollectionsView, FileId, OrderedListId,
    OrderedListView, StickerFile,
};
pub use view::{combined3, StoreView};
