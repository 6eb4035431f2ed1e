//! Addressable RGBA pixel buffers
//!
//! An [`Image`] is a width, a height and a row-major buffer of [`Color`]s
//! addressed by `y * width + x`. The buffer length always equals
//! `width * height`; there is no way to change one without rebuilding the
//! other.

use crate::domain::{Channel, Color};

use super::compositor::CompositorError;

/// The channel of a pattern texel that carries its blend weight
///
/// Patterns are authored as grayscale masks in the red channel: red 1.0
/// selects the primary color, red 0.0 the secondary, anything between is a
/// linear mix. The other color channels of a pattern are ignored.
pub const WEIGHT_CHANNEL: Channel = Channel::Red;

/// Texel filtering used when an image is displayed or exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest texel, no interpolation
    Nearest,
}

/// Out-of-range coordinate handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Coordinates are clamped to the edge texel
    Clamp,
}

/// How consumers are expected to sample an [`Image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPolicy {
    pub filter: FilterMode,
    pub wrap: WrapMode,
}

/// A typed RGBA image with nearest/clamp sampling semantics
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    /// Every image is meant to be sampled sharply with clamped edges
    pub const SAMPLING: SamplingPolicy = SamplingPolicy {
        filter: FilterMode::Nearest,
        wrap: WrapMode::Clamp,
    };

    /// Wrap a pixel buffer, validating its length against the dimensions
    pub fn build(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, CompositorError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(CompositorError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Image { width, height, pixels })
    }

    /// An image where every pixel is `color`
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Image {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }

    /// Linear index of `(x, y)`, or `None` outside the image
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the image
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Blend weight of the pixel at linear index `i`
    pub fn weight(&self, i: usize) -> f32 {
        self.pixels[i].channel(WEIGHT_CHANNEL)
    }

    /// Pixel at integer coordinates with edge clamping
    ///
    /// Returns `None` only for an empty image.
    pub fn pixel_clamped(&self, x: i64, y: i64) -> Option<Color> {
        if self.is_empty() {
            return None;
        }
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.get(cx, cy)
    }

    /// Nearest-neighbor sample at normalized coordinates
    ///
    /// `(0, 0)` is the first texel and `(1, 1)` the last; values outside
    /// `[0, 1]` clamp to the edge.
    pub fn sample_nearest(&self, u: f32, v: f32) -> Option<Color> {
        let x = (u * self.width as f32).floor() as i64;
        let y = (v * self.height as f32).floor() as i64;
        self.pixel_clamped(x, y)
    }

    pub(crate) fn from_parts_unchecked(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Image { width, height, pixels }
    }
}
