//! Update structs for partial edits.

pub mod item;

pub use item::{ItemPatch, ItemPatchBuilder};
