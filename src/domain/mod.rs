//! Domain types: colors, palettes and garments

mod color;
mod outfit;
mod palette;

pub use color::{Channel, Color, ColorPair, ColorParseError};
pub use outfit::{placeholder_texture, GarmentSlot, Outfit, PLACEHOLDER_SIZE};
pub use palette::{Palette, FALLBACK_PRIMARY, FALLBACK_SECONDARY};
