//! Skin compositing engine
//!
//! This module contains the pixel-level skin building logic including:
//! - Typed RGBA buffers with fixed sampling semantics
//! - Pattern recoloring, face masking and garment layering
//! - Swatch generation and the PNG bridge

mod buffer;
mod codec;
mod compositor;
pub mod regions;
mod skin;

pub use buffer::{FilterMode, Image, SamplingPolicy, WrapMode, WEIGHT_CHANNEL};
pub use codec::{decode_png, encode_png, to_data_url, CodecError};
pub use compositor::{
    apply_mask, apply_mask_with, combine_layers, combine_layers_with, make_swatch, recolor,
    recolor_with_pair, swatch_for_pair, CompositorError, SWATCH_SPLIT,
};
pub use skin::{palette_swatches, pattern_previews, SkinComposer, SkinError};
