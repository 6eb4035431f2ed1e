//! Palette files: one `name,primary,secondary` color choice per line

use tracing::warn;

use super::color::{Color, ColorPair};

/// Used when a primary color is missing or unparseable
pub const FALLBACK_PRIMARY: Color = Color::MAGENTA;
/// Used when a secondary color is missing or unparseable
pub const FALLBACK_SECONDARY: Color = Color::BLACK;

/// Ordered list of named color pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    entries: Vec<ColorPair>,
}

impl Palette {
    pub fn new(entries: Vec<ColorPair>) -> Self {
        Palette { entries }
    }

    /// Parse palette text
    ///
    /// Blank lines are skipped. A bad color never fails the whole file; it is
    /// replaced by the fallback for its slot.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_line)
            .collect();

        Palette { entries }
    }

    pub fn entries(&self) -> &[ColorPair] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&ColorPair> {
        self.entries.first()
    }

    /// Find an entry by name
    pub fn find(&self, name: &str) -> Option<&ColorPair> {
        self.entries.iter().find(|pair| pair.name() == name)
    }
}

fn parse_line(line: &str) -> ColorPair {
    let mut fields = line.split(',').map(str::trim);
    let name = fields.next().unwrap_or_default();
    let primary = parse_or(name, fields.next(), FALLBACK_PRIMARY);
    let secondary = parse_or(name, fields.next(), FALLBACK_SECONDARY);

    ColorPair::new(name, primary, secondary)
}

fn parse_or(name: &str, field: Option<&str>, fallback: Color) -> Color {
    match field.map(Color::from_html) {
        Some(Ok(color)) => color,
        Some(Err(e)) => {
            warn!(entry = %name, error = %e, "Invalid palette color, using fallback");
            fallback
        }
        None => {
            warn!(entry = %name, "Missing palette color, using fallback");
            fallback
        }
    }
}
