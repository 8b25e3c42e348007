//! Font descriptors and run styles

use serde::{Deserialize, Serialize};

/// Font size used for runs that carry no font descriptor at all.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// The font a run is drawn with
///
/// A `None` family means "the platform default font"; the shaper resolves it
/// to its default metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Font family name
    #[serde(default)]
    pub family: Option<String>,
    /// Font size in points
    pub size: f32,
    /// Bold weight
    #[serde(default)]
    pub bold: bool,
    /// Italic style
    #[serde(default)]
    pub italic: bool,
}

impl FontDescriptor {
    /// Create a regular-weight, upright descriptor for a family
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: Some(family.into()),
            size,
            bold: false,
            italic: false,
        }
    }

    /// The platform default font at the given size
    pub fn default_at(size: f32) -> Self {
        Self {
            family: None,
            size,
            bold: false,
            italic: false,
        }
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Same family, weight and style at a new point size
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::default_at(DEFAULT_FONT_SIZE)
    }
}

/// Style attributes attached to a run of text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Font override; `None` means the platform default font
    #[serde(default)]
    pub font: Option<FontDescriptor>,
    /// Text color (as CSS color string)
    #[serde(default)]
    pub color: Option<String>,
    /// Underline
    #[serde(default)]
    pub underline: Option<bool>,
}

impl RunStyle {
    /// A style carrying only a font
    pub fn with_font(font: FontDescriptor) -> Self {
        Self {
            font: Some(font),
            ..Default::default()
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Copy of this style with the font replaced at a new size.
    ///
    /// A style without a font gets the default font at `size`; everything
    /// other than the font is preserved.
    pub fn with_font_size(&self, size: f32) -> Self {
        let font = match &self.font {
            Some(font) => font.with_size(size),
            None => FontDescriptor::default_at(size),
        };
        Self {
            font: Some(font),
            ..self.clone()
        }
    }

    /// The effective font size, falling back to [`DEFAULT_FONT_SIZE`]
    pub fn font_size(&self) -> f32 {
        self.font
            .as_ref()
            .map(|f| f.size)
            .unwrap_or(DEFAULT_FONT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_size_keeps_family_and_flags() {
        let font = FontDescriptor::new("Georgia", 14.0)
            .with_bold(true)
            .with_italic(true);
        let resized = font.with_size(30.0);

        assert_eq!(resized.family.as_deref(), Some("Georgia"));
        assert!(resized.bold);
        assert!(resized.italic);
        assert_eq!(resized.size, 30.0);
    }

    #[test]
    fn test_style_without_font_gets_default() {
        let style = RunStyle::default().with_color("#ff0000");
        let sized = style.with_font_size(20.0);

        assert_eq!(sized.font, Some(FontDescriptor::default_at(20.0)));
        assert_eq!(sized.color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_font_size_fallback() {
        assert_eq!(RunStyle::default().font_size(), DEFAULT_FONT_SIZE);
        assert_eq!(
            RunStyle::with_font(FontDescriptor::default_at(9.0)).font_size(),
            9.0
        );
    }
}
