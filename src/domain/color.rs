//! Normalized RGBA colors and recolor palette entries

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color parsing errors
#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("Empty color string")]
    Empty,
    #[error("Invalid hex color '{0}': expected #RGB, #RGBA, #RRGGBB or #RRGGBBAA")]
    InvalidHex(String),
    #[error("Unknown color name: {0}")]
    UnknownName(String),
}

/// A single color channel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

/// RGBA color with normalized floating channels
///
/// Channels are nominally in `[0, 1]`. Arithmetic never clamps, so blends
/// may leave that range; clamping only happens when converting to 8-bit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0, 1.0);
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque color from RGB channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Copy of this color with the alpha channel replaced
    pub fn with_alpha(self, a: f32) -> Self {
        Color { a, ..self }
    }

    /// Read a single channel
    pub fn channel(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
            Channel::Alpha => self.a,
        }
    }

    /// Convert from 8-bit RGBA
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Color {
            r: rgba[0] as f32 / 255.0,
            g: rgba[1] as f32 / 255.0,
            b: rgba[2] as f32 / 255.0,
            a: rgba[3] as f32 / 255.0,
        }
    }

    /// Convert to 8-bit RGBA, clamping out-of-range channels
    pub fn to_rgba8(&self) -> [u8; 4] {
        let quantize = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b), quantize(self.a)]
    }

    /// Parse an HTML color string
    ///
    /// Accepts `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` and a fixed set of
    /// color names (case-insensitive).
    pub fn from_html(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }

        named_color(&s.to_ascii_lowercase())
            .map(Color::from_rgba8)
            .ok_or_else(|| ColorParseError::UnknownName(s.to_string()))
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
            a: self.a + rhs.a,
        }
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
            a: self.a * rhs,
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let rgba = match hex.len() {
        3 => [nibble(0)?, nibble(1)?, nibble(2)?, 255],
        4 => [nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?],
        6 => [byte(0)?, byte(2)?, byte(4)?, 255],
        8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
        _ => return None,
    };

    Some(Color::from_rgba8(rgba))
}

fn named_color(name: &str) -> Option<[u8; 4]> {
    let rgba = match name {
        "red" => [255, 0, 0, 255],
        "cyan" | "aqua" => [0, 255, 255, 255],
        "blue" => [0, 0, 255, 255],
        "darkblue" => [0, 0, 160, 255],
        "lightblue" => [173, 216, 230, 255],
        "purple" => [128, 0, 128, 255],
        "yellow" => [255, 255, 0, 255],
        "lime" => [0, 255, 0, 255],
        "fuchsia" | "magenta" => [255, 0, 255, 255],
        "white" => [255, 255, 255, 255],
        "silver" => [192, 192, 192, 255],
        "grey" | "gray" => [128, 128, 128, 255],
        "black" => [0, 0, 0, 255],
        "orange" => [255, 165, 0, 255],
        "brown" => [165, 42, 42, 255],
        "maroon" => [128, 0, 0, 255],
        "green" => [0, 128, 0, 255],
        "olive" => [128, 128, 0, 255],
        "navy" => [0, 0, 128, 255],
        "teal" => [0, 128, 128, 255],
        _ => return None,
    };
    Some(rgba)
}

/// A named primary/secondary color choice (skin or mask colors)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    name: String,
    primary: Color,
    secondary: Color,
}

impl ColorPair {
    pub fn new(name: impl Into<String>, primary: Color, secondary: Color) -> Self {
        ColorPair {
            name: name.into(),
            primary,
            secondary,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primary(&self) -> Color {
        self.primary
    }

    pub fn secondary(&self) -> Color {
        self.secondary
    }
}
