//! Garment textures and the slots they can fill

use serde::{Deserialize, Serialize};

use crate::domain::Color;
use crate::engine::Image;

/// Size of the blank placeholder texture
pub const PLACEHOLDER_SIZE: u32 = 64;

/// Which garment slot an outfit texture can be worn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentSlot {
    #[default]
    All,
    Top,
    Bottom,
}

impl GarmentSlot {
    /// Slot implied by a garment's file name
    ///
    /// `top.png` and `bottom.png` restrict the garment to one slot; any other
    /// name fits both.
    pub fn from_file_name(name: &str) -> Self {
        match name {
            "top.png" => GarmentSlot::Top,
            "bottom.png" => GarmentSlot::Bottom,
            _ => GarmentSlot::All,
        }
    }
}

/// A named garment texture
#[derive(Debug, Clone, PartialEq)]
pub struct Outfit {
    pub name: String,
    pub texture: Image,
    pub slot: GarmentSlot,
}

impl Outfit {
    pub fn new(name: impl Into<String>, texture: Image, slot: GarmentSlot) -> Self {
        Outfit {
            name: name.into(),
            texture,
            slot,
        }
    }

    /// The "None" garment: a transparent 64x64 texture usable in both slots
    pub fn none() -> Self {
        Outfit::new("None", placeholder_texture(), GarmentSlot::All)
    }

    pub fn fits_top(&self) -> bool {
        matches!(self.slot, GarmentSlot::All | GarmentSlot::Top)
    }

    pub fn fits_bottom(&self) -> bool {
        matches!(self.slot, GarmentSlot::All | GarmentSlot::Bottom)
    }
}

/// Stand-in texture for a missing or unreadable image
pub fn placeholder_texture() -> Image {
    Image::filled(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, Color::CLEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_from_file_name() {
        assert_eq!(GarmentSlot::from_file_name("top.png"), GarmentSlot::Top);
        assert_eq!(GarmentSlot::from_file_name("bottom.png"), GarmentSlot::Bottom);
        assert_eq!(GarmentSlot::from_file_name("overalls.png"), GarmentSlot::All);
    }

    #[test]
    fn test_slot_fit() {
        let texture = placeholder_texture();
        let top = Outfit::new("Shirt", texture.clone(), GarmentSlot::Top);
        let bottom = Outfit::new("Pants", texture, GarmentSlot::Bottom);

        assert!(top.fits_top() && !top.fits_bottom());
        assert!(bottom.fits_bottom() && !bottom.fits_top());
    }

    #[test]
    fn test_none_outfit() {
        let none = Outfit::none();

        assert_eq!(none.name, "None");
        assert!(none.fits_top() && none.fits_bottom());
        assert_eq!(none.texture.dimensions(), (64, 64));
        assert!(none.texture.pixels().iter().all(|p| p.a == 0.0));
    }
}
