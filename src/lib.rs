//! Skin Forge
//!
//! Builds character skin textures from a recolorable pattern, a fixed face
//! mask and interchangeable top/bottom garments. All transforms are pure
//! functions over typed RGBA buffers; decoding, encoding and file handling
//! stay with the caller.

pub mod config;
pub mod domain;
pub mod engine;

pub use domain::{Color, ColorPair, GarmentSlot, Outfit, Palette};
pub use engine::{
    apply_mask, combine_layers, make_swatch, recolor, CompositorError, Image, SkinComposer,
};
