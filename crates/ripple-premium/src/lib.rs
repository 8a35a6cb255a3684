//! Subscription upsell screen composition and purchase flow.

pub mod content;
pub mod perk;
pub mod purchase;
pub mod screen;

pub use content::{UpsellContent, UpsellContentView};
pub use perk::{Perk, PerkRow, PerkRowView};
pub use purchase::{
    ConfirmCompletion, ConfirmError, ConfirmationApi, Offering, PurchaseCompletion, PurchaseError,
    PurchaseManager, PurchaseState, PurchaseStatus,
};
pub use screen::{
    bottom_panel_alpha, clamp_scroll_target, title_scale, top_panel_alpha, ScreenCallbacks,
    ScreenEnvironment, Strings, Theme, UpsellScreen, COLLAPSED_HEADER_OFFSET,
    COLLAPSE_SNAP_THRESHOLD,
};
