//! Geometry primitives and measurement constraints.

pub mod constraints;
pub mod geometry;

pub use constraints::Constraints;
pub use geometry::{EdgeInsets, Point, Rect, Size, HAIRLINE};
