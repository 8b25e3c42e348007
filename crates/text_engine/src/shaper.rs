//! Text shaping using rustybuzz
//!
//! This module provides text shaping capabilities using the rustybuzz library,
//! which is a pure Rust implementation of HarfBuzz. Text shaping is the process
//! of converting a sequence of Unicode codepoints into properly positioned glyphs.
//!
//! When no face has been loaded for a run's family, widths are estimated per
//! grapheme cluster from character classes. Estimation is deterministic, so
//! measurement built on top of it is too.

use crate::{scale_font_units, FontId, FontMetrics, Result, TextError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// A shaped glyph with position information
#[derive(Debug, Clone)]
pub struct ShapedGlyph {
    /// Glyph ID in the font
    pub glyph_id: u16,
    /// Horizontal advance in font units
    pub x_advance: i32,
    /// Horizontal offset from the origin
    pub x_offset: i32,
    /// Vertical offset from the origin
    pub y_offset: i32,
    /// Cluster index (byte offset in the original text)
    pub cluster: u32,
}

impl ShapedGlyph {
    /// Get the advance width scaled to a specific font size
    pub fn advance_width(&self, font_size: f32, units_per_em: u16) -> f32 {
        self.x_advance as f32 * font_size / units_per_em as f32
    }
}

/// A run of shaped glyphs with associated metrics
#[derive(Debug, Clone)]
pub struct ShapedRun {
    /// The shaped glyphs
    pub glyphs: Vec<ShapedGlyph>,
    /// Total width of the run in points
    pub width: f32,
    /// Font size used for shaping
    pub font_size: f32,
    /// Units per em of the font used
    pub units_per_em: u16,
    /// Ascender height scaled to font size
    pub ascender: f32,
    /// Descender depth scaled to font size (positive value)
    pub descender: f32,
    /// Line gap scaled to font size
    pub line_gap: f32,
}

impl ShapedRun {
    /// Calculate the total line height for this run
    pub fn line_height(&self) -> f32 {
        self.ascender + self.descender + self.line_gap
    }

    /// Advance width in points attributed to each cluster, in glyph order
    pub fn cluster_advances(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.glyphs.iter().map(move |g| {
            (
                g.cluster as usize,
                g.advance_width(self.font_size, self.units_per_em),
            )
        })
    }
}

/// Text shaper using rustybuzz
///
/// Loaded font data is shared behind `Arc`, so a shaper can be cloned cheaply
/// and used from several threads; shaping itself takes `&self`.
#[derive(Clone)]
pub struct TextShaper {
    /// Raw font data by id
    faces: HashMap<FontId, Arc<Vec<u8>>>,
    /// Metrics used when no font is available
    default_metrics: FontMetrics,
}

impl TextShaper {
    /// Create a new text shaper
    pub fn new() -> Self {
        Self {
            faces: HashMap::new(),
            default_metrics: FontMetrics::default(),
        }
    }

    /// Load a font from data, validating that it parses
    pub fn load_font(&mut self, font_id: FontId, data: Vec<u8>) -> Result<()> {
        if rustybuzz::Face::from_slice(&data, 0).is_none() {
            return Err(TextError::InvalidFontData(format!(
                "Failed to parse font for family {}",
                font_id.family
            )));
        }

        self.faces.insert(font_id, Arc::new(data));
        Ok(())
    }

    /// Load a font file from disk
    pub fn load_font_file(&mut self, font_id: FontId, path: impl AsRef<Path>) -> Result<()> {
        let data = std::fs::read(path)?;
        self.load_font(font_id, data)
    }

    /// Check if a font is loaded
    pub fn has_font(&self, font_id: &FontId) -> bool {
        self.faces.contains_key(font_id)
    }

    /// Metrics used for runs without a loaded face
    pub fn default_metrics(&self) -> &FontMetrics {
        &self.default_metrics
    }

    /// Shape a text string with the default metrics
    pub fn shape(&self, text: &str, font_size: f32) -> Result<ShapedRun> {
        Ok(self.shape_fallback(text, font_size))
    }

    /// Shape text for a specific run style.
    ///
    /// An exact face match is preferred; otherwise the family's regular face
    /// is used, and failing that the width estimate.
    pub fn shape_run(
        &self,
        text: &str,
        font_family: Option<&str>,
        font_size: f32,
        bold: bool,
        italic: bool,
    ) -> Result<ShapedRun> {
        let data = font_family.and_then(|family| {
            let id = FontId::from_flags(family, bold, italic);
            self.faces
                .get(&id)
                .or_else(|| self.faces.get(&id.regular()))
        });

        match data {
            Some(data) => self.shape_with_face(text, font_size, data),
            None => Ok(self.shape_fallback(text, font_size)),
        }
    }

    /// Shape text using a rustybuzz face
    fn shape_with_face(&self, text: &str, font_size: f32, data: &[u8]) -> Result<ShapedRun> {
        let face = rustybuzz::Face::from_slice(data, 0)
            .ok_or_else(|| TextError::InvalidFontData("Failed to parse font".into()))?;

        let units_per_em = face.units_per_em() as u16;

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);

        let output = rustybuzz::shape(&face, &[], buffer);

        let glyph_infos = output.glyph_infos();
        let glyph_positions = output.glyph_positions();

        let mut glyphs = Vec::with_capacity(glyph_infos.len());
        let mut total_advance = 0i32;

        for (info, pos) in glyph_infos.iter().zip(glyph_positions.iter()) {
            glyphs.push(ShapedGlyph {
                glyph_id: info.glyph_id as u16,
                x_advance: pos.x_advance,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
                cluster: info.cluster,
            });
            total_advance += pos.x_advance;
        }

        let ascender = scale_font_units(face.ascender() as i32, units_per_em, font_size);
        let descender = scale_font_units((face.descender() as i32).abs(), units_per_em, font_size);
        let line_gap = scale_font_units(face.line_gap() as i32, units_per_em, font_size);

        Ok(ShapedRun {
            glyphs,
            width: scale_font_units(total_advance, units_per_em, font_size),
            font_size,
            units_per_em,
            ascender,
            descender,
            line_gap,
        })
    }

    /// Fallback shaping when no font is available.
    /// One pseudo-glyph per grapheme cluster, sized by its base character.
    fn shape_fallback(&self, text: &str, font_size: f32) -> ShapedRun {
        let units_per_em = self.default_metrics.units_per_em;

        let mut glyphs = Vec::new();
        let mut total_advance = 0i32;

        for (offset, grapheme) in text.grapheme_indices(true) {
            let base = grapheme.chars().next().unwrap_or(' ');
            let advance = self.estimate_char_width(base, units_per_em);
            glyphs.push(ShapedGlyph {
                glyph_id: base as u16, // codepoint as pseudo glyph ID
                x_advance: advance,
                x_offset: 0,
                y_offset: 0,
                cluster: offset as u32,
            });
            total_advance += advance;
        }

        let metrics = &self.default_metrics;
        let ascender = scale_font_units(metrics.ascender as i32, units_per_em, font_size);
        let descender = scale_font_units((metrics.descender as i32).abs(), units_per_em, font_size);
        let line_gap = scale_font_units(metrics.line_gap as i32, units_per_em, font_size);

        ShapedRun {
            glyphs,
            width: scale_font_units(total_advance, units_per_em, font_size),
            font_size,
            units_per_em,
            ascender,
            descender,
            line_gap,
        }
    }

    /// Estimate character width based on Unicode properties
    fn estimate_char_width(&self, ch: char, units_per_em: u16) -> i32 {
        let em = units_per_em as i32;

        match ch {
            // Line breaks and other controls take no space
            c if c.is_control() => 0,
            // Narrow characters
            ' ' | 'i' | 'l' | 'j' | 't' | 'f' | 'r' | '!' | '|' | '\'' | '`' | '.' | ',' | ':' | ';' => {
                em * 30 / 100
            }
            // Very narrow
            'I' | '1' => em * 35 / 100,
            // Wide characters
            'm' | 'w' | 'M' | 'W' | '@' | '%' => em * 90 / 100,
            // Uppercase typically wider
            'A'..='Z' => em * 70 / 100,
            // Lowercase average
            'a'..='z' => em * 55 / 100,
            // Digits are typically monospaced
            '0'..='9' => em * 60 / 100,
            // CJK characters are full-width
            '\u{4E00}'..='\u{9FFF}' | '\u{3000}'..='\u{303F}' => em,
            // Zero-width characters
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' | '\u{00AD}' => 0,
            // No-break space same as regular space
            '\u{00A0}' => em * 30 / 100,
            _ => em * 60 / 100,
        }
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextShaper")
            .field("loaded_faces", &self.faces.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_fallback_width() {
        let shaper = TextShaper::new();
        let run = shaper.shape("Hello", 10.0).unwrap();
        // H .70 + e .55 + l .30 + l .30 + o .55 = 2.4 em
        assert!(close(run.width, 24.0));
        assert_eq!(run.glyphs.len(), 5);
        assert!(close(run.line_height(), 10.0));
    }

    #[test]
    fn test_width_scales_linearly() {
        let shaper = TextShaper::new();
        let small = shaper.shape("Scale me", 10.0).unwrap().width;
        let large = shaper.shape("Scale me", 30.0).unwrap().width;
        assert!(close(large, small * 3.0));
    }

    #[test]
    fn test_combining_mark_is_one_cluster() {
        let shaper = TextShaper::new();
        let run = shaper.shape("e\u{0301}x", 10.0).unwrap();
        assert_eq!(run.glyphs.len(), 2);
        assert_eq!(run.glyphs[1].cluster, 3);
    }

    #[test]
    fn test_newline_has_no_width() {
        let shaper = TextShaper::new();
        let run = shaper.shape("\n", 10.0).unwrap();
        assert_eq!(run.width, 0.0);
    }

    #[test]
    fn test_invalid_font_rejected() {
        let mut shaper = TextShaper::new();
        let result = shaper.load_font(FontId::new("Broken"), vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(TextError::InvalidFontData(_))));
        assert!(!shaper.has_font(&FontId::new("Broken")));
    }

    #[test]
    fn test_unknown_family_uses_estimate() {
        let shaper = TextShaper::new();
        let run = shaper
            .shape_run("Hello", Some("Missing"), 10.0, true, false)
            .unwrap();
        assert!(close(run.width, 24.0));
    }

    #[test]
    fn test_cluster_advances() {
        let shaper = TextShaper::new();
        let run = shaper.shape("ab", 10.0).unwrap();
        let advances: Vec<_> = run.cluster_advances().collect();
        assert_eq!(advances.len(), 2);
        assert_eq!(advances[1].0, 1);
        assert!(close(advances[0].1, 5.5));
    }

    proptest::proptest! {
        #[test]
        fn estimated_width_is_additive(a in "[ -~]{0,20}", b in "[ -~]{0,20}") {
            let shaper = TextShaper::new();
            let joined = format!("{}{}", a, b);
            let whole = shaper.shape(&joined, 16.0).unwrap().width;
            let parts = shaper.shape(&a, 16.0).unwrap().width + shaper.shape(&b, 16.0).unwrap().width;
            proptest::prop_assert!((whole - parts).abs() < 1e-2);
        }
    }
}
