//! Bridge between [`Image`] and the `image` crate
//!
//! Decoded files store their top row first, while skin textures put row 0 at
//! the bottom (the face mask at y = 49 sits near the top of the picture).
//! Conversions flip rows so buffer index 0 is always the bottom-left texel.

use base64::Engine;
use bytes::Bytes;
use image::{ImageEncoder, ImageFormat, Rgba, RgbaImage};
use thiserror::Error;
use tracing::debug;

use crate::domain::Color;
use super::buffer::Image;

/// Encoding and decoding errors
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
}

impl Image {
    /// Convert a decoded 8-bit RGBA image into texture space
    pub fn from_rgba8(rgba: &RgbaImage) -> Image {
        let (width, height) = rgba.dimensions();
        let mut pixels = Vec::with_capacity(width as usize * height as usize);

        for y in (0..height).rev() {
            for x in 0..width {
                pixels.push(Color::from_rgba8(rgba.get_pixel(x, y).0));
            }
        }

        Image::from_parts_unchecked(width, height, pixels)
    }

    /// Convert to an 8-bit RGBA image with the top row first
    ///
    /// Channels outside `[0, 1]` are clamped here and only here.
    pub fn to_rgba8(&self) -> RgbaImage {
        let (width, height) = self.dimensions();
        RgbaImage::from_fn(width, height, |x, y| {
            let color = self.pixels()[(height - 1 - y) as usize * width as usize + x as usize];
            Rgba(color.to_rgba8())
        })
    }
}

/// Decode PNG bytes into an [`Image`]
pub fn decode_png(data: &[u8]) -> Result<Image, CodecError> {
    let decoded = image::load_from_memory_with_format(data, ImageFormat::Png)?;
    let image = Image::from_rgba8(&decoded.to_rgba8());

    debug!(
        width = image.width(),
        height = image.height(),
        "Decoded PNG"
    );

    Ok(image)
}

/// Encode an [`Image`] as PNG bytes (RGBA, transparency preserved)
pub fn encode_png(image: &Image) -> Result<Bytes, CodecError> {
    let rgba = image.to_rgba8();
    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buffer).write_image(
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
        image::ColorType::Rgba8,
    )?;

    debug!(
        width = image.width(),
        height = image.height(),
        bytes = buffer.len(),
        "Encoded PNG"
    );

    Ok(Bytes::from(buffer))
}

/// Encode an [`Image`] as a `data:image/png;base64,...` URL
pub fn to_data_url(image: &Image) -> Result<String, CodecError> {
    let png = encode_png(image)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    ))
}
