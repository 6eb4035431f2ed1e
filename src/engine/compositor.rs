//! Skin compositing transforms
//!
//! Every transform takes its inputs by reference and returns a freshly
//! allocated [`Image`]; inputs are never modified. Per-pixel maps run on
//! Rayon and are collected in index order, so results do not depend on
//! scheduling.

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::domain::{Color, ColorPair};
use super::buffer::Image;
use super::regions::{
    LayerMap, LayerRegion, MaskCell, MaskTemplate, FACE_MASK, LAYER_MAP_ROWS, SKIN_LAYER_MAP,
};

/// Fraction of the swatch height used as the diagonal split threshold
pub const SWATCH_SPLIT: f64 = 0.75;

/// Compositing errors
#[derive(Debug, Error, PartialEq)]
pub enum CompositorError {
    #[error("Layer dimensions incompatible: base {base:?}, top {top:?}, bottom {bottom:?}")]
    DimensionMismatch {
        base: (u32, u32),
        top: (u32, u32),
        bottom: (u32, u32),
    },
    #[error("Pixel buffer holds {actual} pixels, {width}x{height} needs {expected}")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("Image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Recolor a pattern with two colors
///
/// Each pattern pixel's weight (its red channel, see
/// [`WEIGHT_CHANNEL`](super::buffer::WEIGHT_CHANNEL)) mixes the colors as
/// `primary * weight + secondary * (1 - weight)`. The pattern's own alpha is
/// kept. Results are not clamped.
pub fn recolor(source: &Image, primary: Color, secondary: Color) -> Image {
    debug!(
        width = source.width(),
        height = source.height(),
        "Recoloring pattern"
    );

    let pixels: Vec<Color> = (0..source.len())
        .into_par_iter()
        .map(|i| {
            let weight = source.weight(i);
            let alpha = source.pixels()[i].a;
            (primary * weight + secondary * (1.0 - weight)).with_alpha(alpha)
        })
        .collect();

    Image::from_parts_unchecked(source.width(), source.height(), pixels)
}

/// [`recolor`] with both colors taken from a palette entry
pub fn recolor_with_pair(source: &Image, colors: &ColorPair) -> Image {
    recolor(source, colors.primary(), colors.secondary())
}

/// Paint the face mask onto a skin
///
/// Cells falling outside the image are ignored, so images smaller than
/// 15x55 get a clipped mask or none at all.
pub fn apply_mask(source: &Image, mask_primary: Color, mask_secondary: Color) -> Image {
    apply_mask_with(source, mask_primary, mask_secondary, &FACE_MASK)
}

/// [`apply_mask`] with a caller-supplied stencil
pub fn apply_mask_with(
    source: &Image,
    mask_primary: Color,
    mask_secondary: Color,
    template: &MaskTemplate,
) -> Image {
    debug!(
        width = source.width(),
        height = source.height(),
        origin_x = template.origin.0,
        origin_y = template.origin.1,
        "Applying face mask"
    );

    let (origin_x, origin_y) = template.origin;
    let mut pixels = source.pixels().to_vec();

    for (row, cells) in template.cells.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let x = origin_x.saturating_add(col as u32);
            let y = origin_y.saturating_add(row as u32);
            let Some(index) = source.index_of(x, y) else {
                continue;
            };

            match cell {
                MaskCell::Primary => pixels[index] = mask_primary,
                MaskCell::Secondary => pixels[index] = mask_secondary,
                MaskCell::Skip => {}
            }
        }
    }

    Image::from_parts_unchecked(source.width(), source.height(), pixels)
}

/// Combine a skin with top and bottom garments
///
/// Width is checked against `top` and height against `bottom`. The layer
/// map is indexed from each linear pixel index and matches the skin layout
/// only for 64-pixel-wide images.
pub fn combine_layers(base: &Image, top: &Image, bottom: &Image) -> Result<Image, CompositorError> {
    combine_layers_with(base, top, bottom, &SKIN_LAYER_MAP)
}

/// [`combine_layers`] with a caller-supplied layer map
pub fn combine_layers_with(
    base: &Image,
    top: &Image,
    bottom: &Image,
    map: &LayerMap,
) -> Result<Image, CompositorError> {
    let mismatch = || CompositorError::DimensionMismatch {
        base: base.dimensions(),
        top: top.dimensions(),
        bottom: bottom.dimensions(),
    };

    if base.width() != top.width() || base.height() != bottom.height() {
        return Err(mismatch());
    }

    // The checks above leave top's height and bottom's width free; both
    // buffers must still cover every base index, and the map every row band.
    let count = base.len();
    if top.len() < count
        || bottom.len() < count
        || LayerMap::rows_needed(count, base.width()) > LAYER_MAP_ROWS
    {
        return Err(mismatch());
    }

    debug!(
        width = base.width(),
        height = base.height(),
        "Combining skin layers"
    );

    let (base_px, top_px, bottom_px) = (base.pixels(), top.pixels(), bottom.pixels());
    let pixels: Vec<Color> = (0..count)
        .into_par_iter()
        .map(|i| match map.region_at(i, base.width()) {
            Some(LayerRegion::Top) => top_px[i],
            Some(LayerRegion::Bottom) => bottom_px[i],
            Some(LayerRegion::TopOverBottom) if top_px[i].a > 0.0 => top_px[i],
            Some(LayerRegion::TopOverBottom) => bottom_px[i],
            Some(LayerRegion::Base) | None => base_px[i],
        })
        .collect();

    Ok(Image::from_parts_unchecked(base.width(), base.height(), pixels))
}

/// Generate a diagonal two-tone swatch
///
/// Pixel `(x, y)` gets `primary` when `(width - x) + y > height * 0.75`,
/// otherwise `secondary`.
pub fn make_swatch(
    width: u32,
    height: u32,
    primary: Color,
    secondary: Color,
) -> Result<Image, CompositorError> {
    if width == 0 || height == 0 {
        return Err(CompositorError::InvalidDimensions { width, height });
    }

    debug!(width = width, height = height, "Generating swatch");

    let threshold = height as f64 * SWATCH_SPLIT;
    let w = width as usize;
    let pixels: Vec<Color> = (0..w * height as usize)
        .into_par_iter()
        .map(|i| {
            let (x, y) = (i % w, i / w);
            let diag = (w - x) + y;
            if diag as f64 > threshold {
                primary
            } else {
                secondary
            }
        })
        .collect();

    Ok(Image::from_parts_unchecked(width, height, pixels))
}

/// [`make_swatch`] for a palette entry
pub fn swatch_for_pair(width: u32, height: u32, colors: &ColorPair) -> Result<Image, CompositorError> {
    make_swatch(width, height, colors.primary(), colors.secondary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::regions::{FACE_MASK_ORIGIN, MASK_SIZE};

    const SKIN: u32 = 64;

    fn solid(color: Color) -> Image {
        Image::filled(SKIN, SKIN, color)
    }

    fn pattern_image() -> Image {
        let pixels = (0..SKIN * SKIN)
            .map(|i| {
                let weight = (i % 5) as f32 / 4.0;
                Color::new(weight, 0.3, 0.7, (i % 3) as f32 / 2.0)
            })
            .collect();
        Image::build(SKIN, SKIN, pixels).unwrap()
    }

    fn indexed(width: u32, height: u32) -> Image {
        let pixels = (0..width * height)
            .map(|i| Color::rgb(i as f32, 0.0, 0.0))
            .collect();
        Image::build(width, height, pixels).unwrap()
    }

    #[test]
    fn test_recolor_preserves_alpha_and_size() {
        let source = pattern_image();
        let result = recolor(&source, Color::RED, Color::BLUE);

        assert_eq!(result.dimensions(), source.dimensions());
        for (out, inp) in result.pixels().iter().zip(source.pixels()) {
            assert_eq!(out.a, inp.a);
        }
    }

    #[test]
    fn test_recolor_extremes() {
        let source = Image::build(
            2,
            1,
            vec![Color::new(1.0, 0.0, 0.0, 0.5), Color::new(0.0, 1.0, 1.0, 1.0)],
        )
        .unwrap();
        let primary = Color::rgb(0.2, 0.4, 0.6);
        let secondary = Color::rgb(0.9, 0.8, 0.7);

        let result = recolor(&source, primary, secondary);

        assert_eq!(result.pixels()[0], primary.with_alpha(0.5));
        assert_eq!(result.pixels()[1], secondary);
    }

    #[test]
    fn test_recolor_blends_linearly() {
        let source = Image::build(1, 1, vec![Color::new(0.5, 0.0, 0.0, 1.0)]).unwrap();
        let result = recolor(&source, Color::WHITE, Color::BLACK);

        assert_eq!(result.pixels()[0], Color::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_recolor_does_not_clamp() {
        let source = Image::build(1, 1, vec![Color::new(2.0, 0.0, 0.0, 1.0)]).unwrap();
        let result = recolor(&source, Color::WHITE, Color::BLACK);

        assert_eq!(result.pixels()[0].r, 2.0);
    }

    #[test]
    fn test_recolor_with_pair() {
        let source = pattern_image();
        let pair = ColorPair::new("Fire", Color::RED, Color::BLACK);

        assert_eq!(
            recolor_with_pair(&source, &pair),
            recolor(&source, Color::RED, Color::BLACK)
        );
    }

    #[test]
    fn test_apply_mask_paints_patch_only() {
        let source = pattern_image();
        let primary = Color::rgb(0.1, 0.2, 0.3);
        let secondary = Color::rgb(0.9, 0.9, 0.1);
        let result = apply_mask(&source, primary, secondary);
        let (ox, oy) = FACE_MASK_ORIGIN;

        assert_eq!(result.dimensions(), source.dimensions());

        for y in 0..SKIN {
            for x in 0..SKIN {
                let inside = (ox..ox + MASK_SIZE as u32).contains(&x)
                    && (oy..oy + MASK_SIZE as u32).contains(&y);
                if !inside {
                    assert_eq!(result.get(x, y), source.get(x, y), "({x}, {y}) changed");
                }
            }
        }

        // rounded corners keep the source
        for (cx, cy) in [(0, 0), (5, 0), (0, 5), (5, 5)] {
            assert_eq!(result.get(ox + cx, oy + cy), source.get(ox + cx, oy + cy));
        }

        // eyes on rows 2 and 3, columns 1 and 4
        for (cx, cy) in [(1, 2), (4, 2), (1, 3), (4, 3)] {
            assert_eq!(result.get(ox + cx, oy + cy), Some(secondary));
        }

        assert_eq!(result.get(ox + 1, oy), Some(primary));
        assert_eq!(result.get(ox + 2, oy + 2), Some(primary));
        assert_eq!(result.get(ox, oy + 1), Some(primary));
    }

    #[test]
    fn test_apply_mask_clips_small_images() {
        let source = Image::filled(12, 52, Color::WHITE);
        let result = apply_mask(&source, Color::RED, Color::BLUE);

        assert_eq!(result.dimensions(), (12, 52));
        // (10, 49) is the top edge of the patch, a primary cell
        assert_eq!(result.get(10, 49), Some(Color::RED));
        // (10, 51) is an eye
        assert_eq!(result.get(10, 51), Some(Color::BLUE));
        assert_eq!(result.get(8, 50), Some(Color::WHITE));

        let tiny = Image::filled(4, 4, Color::WHITE);
        assert_eq!(apply_mask(&tiny, Color::RED, Color::BLUE), tiny);
    }

    #[test]
    fn test_apply_mask_with_custom_template() {
        let template = MaskTemplate {
            origin: (0, 0),
            cells: [[MaskCell::Secondary; MASK_SIZE]; MASK_SIZE],
        };
        let source = Image::filled(8, 8, Color::WHITE);
        let result = apply_mask_with(&source, Color::RED, Color::BLUE, &template);

        assert_eq!(result.get(5, 5), Some(Color::BLUE));
        assert_eq!(result.get(6, 6), Some(Color::WHITE));
    }

    #[test]
    fn test_combine_layers_region_selection() {
        let base = solid(Color::WHITE);
        let top = solid(Color::RED);
        let bottom = solid(Color::BLUE);

        let result = combine_layers(&base, &top, &bottom).unwrap();

        for i in 0..result.len() {
            let (row, col) = LayerMap::cell_of(i, SKIN);
            let expected = match SKIN_LAYER_MAP.cells[row][col] {
                LayerRegion::Base => Color::WHITE,
                LayerRegion::Top | LayerRegion::TopOverBottom => Color::RED,
                LayerRegion::Bottom => Color::BLUE,
            };
            assert_eq!(result.pixels()[i], expected, "index {i}");
        }
    }

    #[test]
    fn test_combine_layers_transparent_top_falls_through() {
        let base = solid(Color::WHITE);
        let top = solid(Color::RED.with_alpha(0.0));
        let bottom = solid(Color::BLUE);

        let result = combine_layers(&base, &top, &bottom).unwrap();

        // row band 1, columns 2..5 are the overlap region
        let overlap = result.index_of(20, 16).unwrap();
        assert_eq!(LayerMap::cell_of(overlap, SKIN), (1, 2));
        assert_eq!(result.pixels()[overlap], Color::BLUE);

        // pure top regions still copy the transparent top
        let top_only = result.index_of(56, 0).unwrap();
        assert_eq!(result.pixels()[top_only], Color::RED.with_alpha(0.0));
    }

    #[test]
    fn test_combine_layers_keeps_source_pixels() {
        let base = indexed(SKIN, SKIN);
        let top = recolor(&base, Color::RED, Color::GREEN);
        let bottom = recolor(&base, Color::BLUE, Color::BLACK);

        let result = combine_layers(&base, &top, &bottom).unwrap();

        assert_eq!(result.pixels()[16], base.pixels()[16]);
        assert_eq!(result.pixels()[48], top.pixels()[48]);
        assert_eq!(result.pixels()[0], bottom.pixels()[0]);
    }

    #[test]
    fn test_combine_layers_asymmetric_checks() {
        let base = solid(Color::WHITE);
        let narrow = Image::filled(32, 64, Color::RED);
        let short = Image::filled(64, 32, Color::BLUE);

        assert!(matches!(
            combine_layers(&base, &narrow, &base),
            Err(CompositorError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            combine_layers(&base, &base, &short),
            Err(CompositorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_combine_layers_rejects_uncovered_pixels() {
        let base = Image::filled(64, 128, Color::WHITE);
        let top = Image::filled(64, 128, Color::RED);
        let bottom = Image::filled(64, 128, Color::BLUE);

        assert!(matches!(
            combine_layers(&base, &top, &bottom),
            Err(CompositorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_combine_layers_with_custom_map() {
        let map = LayerMap {
            cells: [[LayerRegion::Top; 8]; 4],
        };
        let base = solid(Color::WHITE);
        let top = solid(Color::RED);

        let result = combine_layers_with(&base, &top, &base, &map).unwrap();
        assert!(result.pixels().iter().all(|p| *p == Color::RED));
    }

    #[test]
    fn test_make_swatch_diagonal() {
        let swatch = make_swatch(450, 200, Color::RED, Color::BLUE).unwrap();

        assert_eq!(swatch.dimensions(), (450, 200));
        assert_eq!(swatch.get(0, 0), Some(Color::RED));
        assert_eq!(swatch.get(449, 0), Some(Color::BLUE));
        // diag = 150 is not strictly above 150
        assert_eq!(swatch.get(300, 0), Some(Color::BLUE));
        assert_eq!(swatch.get(299, 0), Some(Color::RED));
    }

    #[test]
    fn test_make_swatch_rejects_empty() {
        assert_eq!(
            make_swatch(0, 10, Color::RED, Color::BLUE),
            Err(CompositorError::InvalidDimensions { width: 0, height: 10 })
        );
        assert!(make_swatch(10, 0, Color::RED, Color::BLUE).is_err());
    }

    #[test]
    fn test_transforms_are_deterministic() {
        let source = pattern_image();

        assert_eq!(
            recolor(&source, Color::RED, Color::BLUE),
            recolor(&source, Color::RED, Color::BLUE)
        );
        assert_eq!(
            apply_mask(&source, Color::RED, Color::BLUE),
            apply_mask(&source, Color::RED, Color::BLUE)
        );
        assert_eq!(
            combine_layers(&source, &source, &source).unwrap(),
            combine_layers(&source, &source, &source).unwrap()
        );
        assert_eq!(
            make_swatch(45, 20, Color::RED, Color::BLUE).unwrap(),
            make_swatch(45, 20, Color::RED, Color::BLUE).unwrap()
        );
    }
}
