//! Font identity and metrics

use serde::{Deserialize, Serialize};

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Font identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontId {
    pub family: String,
    pub style: FontStyle,
    pub weight: FontWeight,
}

impl FontId {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: FontStyle::Normal,
            weight: FontWeight::Normal,
        }
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Build an id from run flags
    pub fn from_flags(family: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self::new(family)
            .with_weight(if bold { FontWeight::Bold } else { FontWeight::Normal })
            .with_style(if italic { FontStyle::Italic } else { FontStyle::Normal })
    }

    /// The upright regular face of the same family
    pub fn regular(&self) -> Self {
        Self::new(self.family.clone())
    }
}

/// Font metrics in font units
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// Units per em
    pub units_per_em: u16,
    /// Ascender (positive)
    pub ascender: i16,
    /// Descender (negative)
    pub descender: i16,
    /// Line gap
    pub line_gap: i16,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            line_gap: 0,
        }
    }
}
