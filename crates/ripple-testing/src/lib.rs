//! Shared test doubles and fixture builders.

pub mod actions;
pub mod purchase;
pub mod queue;
pub mod store;

pub use actions::CountingAction;
pub use purchase::{TestConfirmationApi, TestPurchaseManager};
pub use queue::{ImmediateQueue, ManualQueue};
pub use store::{
    animated_sticker, premium_sticker, sticker, video_sticker, CollectionsViewBuilder,
};
