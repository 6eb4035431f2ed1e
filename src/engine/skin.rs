//! Skin composition session
//!
//! Holds the current pattern, colors and garments, and rebuilds the final
//! skin texture from them on demand.

use thiserror::Error;
use tracing::info;

use crate::domain::{ColorPair, Outfit, Palette};
use super::buffer::Image;
use super::compositor::{
    apply_mask, combine_layers, recolor_with_pair, swatch_for_pair, CompositorError,
};

/// Skin composition errors
#[derive(Debug, Error, PartialEq)]
pub enum SkinError {
    #[error("Garment '{0}' cannot be worn as a top")]
    NotATop(String),
    #[error("Garment '{0}' cannot be worn as a bottom")]
    NotABottom(String),
    #[error(transparent)]
    Compositor(#[from] CompositorError),
}

/// Current selections for one skin
#[derive(Debug, Clone)]
pub struct SkinComposer {
    pattern: Image,
    colors: ColorPair,
    mask_colors: ColorPair,
    top: Outfit,
    bottom: Outfit,
}

impl SkinComposer {
    /// Start a session with no garments worn
    pub fn new(pattern: Image, colors: ColorPair, mask_colors: ColorPair) -> Self {
        SkinComposer {
            pattern,
            colors,
            mask_colors,
            top: Outfit::none(),
            bottom: Outfit::none(),
        }
    }

    pub fn pattern(&self) -> &Image {
        &self.pattern
    }

    pub fn colors(&self) -> &ColorPair {
        &self.colors
    }

    pub fn mask_colors(&self) -> &ColorPair {
        &self.mask_colors
    }

    pub fn top(&self) -> &Outfit {
        &self.top
    }

    pub fn bottom(&self) -> &Outfit {
        &self.bottom
    }

    pub fn set_pattern(&mut self, pattern: Image) {
        self.pattern = pattern;
    }

    pub fn set_colors(&mut self, colors: ColorPair) {
        self.colors = colors;
    }

    pub fn set_mask_colors(&mut self, mask_colors: ColorPair) {
        self.mask_colors = mask_colors;
    }

    pub fn set_top(&mut self, top: Outfit) -> Result<(), SkinError> {
        if !top.fits_top() {
            return Err(SkinError::NotATop(top.name));
        }
        self.top = top;
        Ok(())
    }

    pub fn set_bottom(&mut self, bottom: Outfit) -> Result<(), SkinError> {
        if !bottom.fits_bottom() {
            return Err(SkinError::NotABottom(bottom.name));
        }
        self.bottom = bottom;
        Ok(())
    }

    /// Recolor the pattern, paint the face mask, then layer the garments
    pub fn compose(&self) -> Result<Image, SkinError> {
        let skin = recolor_with_pair(&self.pattern, &self.colors);
        let skin = apply_mask(&skin, self.mask_colors.primary(), self.mask_colors.secondary());
        let skin = combine_layers(&skin, &self.top.texture, &self.bottom.texture)?;

        info!(
            colors = %self.colors.name(),
            mask = %self.mask_colors.name(),
            top = %self.top.name,
            bottom = %self.bottom.name,
            width = skin.width(),
            height = skin.height(),
            "Composed skin"
        );

        Ok(skin)
    }
}

/// Recolor pattern preview images for a color choice
pub fn pattern_previews(displays: &[Image], colors: &ColorPair) -> Vec<Image> {
    displays
        .iter()
        .map(|display| recolor_with_pair(display, colors))
        .collect()
}

/// One swatch per palette entry, paired with the entry name
pub fn palette_swatches(
    palette: &Palette,
    width: u32,
    height: u32,
) -> Result<Vec<(String, Image)>, CompositorError> {
    palette
        .entries()
        .iter()
        .map(|pair| Ok((pair.name().to_string(), swatch_for_pair(width, height, pair)?)))
        .collect()
}
