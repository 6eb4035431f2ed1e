//! Fixed region maps used by the compositor
//!
//! Both maps are plain constant data. The compositor has `*_with` variants
//! that take a substitute map, so tests can exercise the selection logic on
//! small hand-made layouts.

/// Which layer supplies a pixel when combining garments onto a skin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRegion {
    /// Code 0: the recolored base skin
    Base,
    /// Code 1: the top garment
    Top,
    /// Code 2: the bottom garment
    Bottom,
    /// Code 3: the top garment where it has any alpha, otherwise the bottom
    TopOverBottom,
}

impl LayerRegion {
    /// Region for a numeric code, as found in authored layouts
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LayerRegion::Base),
            1 => Some(LayerRegion::Top),
            2 => Some(LayerRegion::Bottom),
            3 => Some(LayerRegion::TopOverBottom),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            LayerRegion::Base => 0,
            LayerRegion::Top => 1,
            LayerRegion::Bottom => 2,
            LayerRegion::TopOverBottom => 3,
        }
    }
}

pub const LAYER_MAP_ROWS: usize = 4;
pub const LAYER_MAP_COLS: usize = 8;

/// Pixels per horizontal run sharing one map column
const RUN_LENGTH: usize = 8;
/// Image rows covered by one map row
const ROWS_PER_BAND: usize = 16;

/// A 4x8 grid selecting a layer per block of the skin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerMap {
    pub cells: [[LayerRegion; LAYER_MAP_COLS]; LAYER_MAP_ROWS],
}

impl LayerMap {
    /// Map row and column for linear pixel index `i` of a `width`-wide image
    ///
    /// The row advances every 16 image rows and the column every 8 pixels,
    /// wrapping every 8 columns. This lines up with the skin layout only
    /// when `width == 64`.
    pub fn cell_of(index: usize, width: u32) -> (usize, usize) {
        let row = index / (width as usize * ROWS_PER_BAND);
        let col = (index / RUN_LENGTH) % LAYER_MAP_COLS;
        (row, col)
    }

    /// Number of map rows needed to cover `len` pixels of a `width`-wide image
    pub fn rows_needed(len: usize, width: u32) -> usize {
        let band = width as usize * ROWS_PER_BAND;
        if band == 0 {
            0
        } else {
            len.div_ceil(band)
        }
    }

    /// Region for linear pixel index `i`, or `None` past the last map row
    pub fn region_at(&self, index: usize, width: u32) -> Option<LayerRegion> {
        let (row, col) = Self::cell_of(index, width);
        self.cells.get(row).map(|cells| cells[col])
    }
}

/// Layer layout of a 64x64 skin
pub const SKIN_LAYER_MAP: LayerMap = {
    use LayerRegion::{Base as B, Bottom as D, Top as T, TopOverBottom as O};
    LayerMap {
        cells: [
            [D, D, B, B, B, B, T, T],
            [D, D, O, O, O, T, T, T],
            [B, B, B, B, B, B, B, B],
            [B, B, B, B, T, T, T, T],
        ],
    }
};

/// Classification of a single face mask cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskCell {
    /// Leave the source pixel untouched
    Skip,
    /// Paint the mask's primary color
    Primary,
    /// Paint the mask's secondary color
    Secondary,
}

pub const MASK_SIZE: usize = 6;

/// A 6x6 stencil painted at a fixed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskTemplate {
    /// Top-left corner of the stencil in image pixels
    pub origin: (u32, u32),
    /// Cells indexed `[row][col]`; row 0 lands on `origin.1`
    pub cells: [[MaskCell; MASK_SIZE]; MASK_SIZE],
}

/// Offset of the face mask on a 64x64 skin
pub const FACE_MASK_ORIGIN: (u32, u32) = (9, 49);

/// Rounded face patch with two secondary-colored eyes
pub const FACE_MASK: MaskTemplate = {
    use MaskCell::{Primary as P, Secondary as E, Skip as S};
    MaskTemplate {
        origin: FACE_MASK_ORIGIN,
        cells: [
            [S, P, P, P, P, S],
            [P, P, P, P, P, P],
            [P, E, P, P, E, P],
            [P, E, P, P, E, P],
            [P, P, P, P, P, P],
            [S, P, P, P, P, S],
        ],
    }
};
