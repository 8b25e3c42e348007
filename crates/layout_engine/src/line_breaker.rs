//! Line Breaking for measurement
//!
//! This module breaks styled text into lines the way a wrapping text view
//! would, so the measurer can report how much space the text needs. It uses
//! Unicode line breaking rules (UAX #14) to find break opportunities and the
//! text shaper for glyph widths.
//!
//! The algorithm follows a greedy approach:
//! 1. Shape every run with its own font to get per-character advances
//! 2. Find Unicode break opportunities over the concatenated text
//! 3. Fill lines greedily, rewinding to the last allowed break on overflow
//! 4. Break inside a word only when the word alone is wider than the line
//!
//! Step 4 is what the fitting engine's longest-word phase exists to avoid.

use text_engine::{ShapedRun, TextShaper};
use text_model::StyledText;

/// Unicode line break opportunity types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOpportunity {
    /// No break allowed at this position
    NoBreak,
    /// Break allowed (after space, punctuation, etc.)
    Allowed,
    /// Break required (after hard line break)
    Mandatory,
}

/// Configuration for line breaking
#[derive(Debug, Clone)]
pub struct LineBreakConfig {
    /// Available width for text; `f32::INFINITY` disables wrapping
    pub available_width: f32,
    /// Line spacing multiplier
    pub line_spacing: f32,
}

impl Default for LineBreakConfig {
    fn default() -> Self {
        Self {
            available_width: f32::INFINITY,
            line_spacing: 1.0,
        }
    }
}

/// One laid out line
#[derive(Debug, Clone, PartialEq)]
pub struct LineMetrics {
    /// Start byte offset in the plain text
    pub start: usize,
    /// End byte offset in the plain text
    pub end: usize,
    /// Width of the line's content in points
    pub width: f32,
    /// Tallest ascender on the line
    pub ascender: f32,
    /// Deepest descender on the line (positive)
    pub descender: f32,
    /// Line height including gap and spacing
    pub height: f32,
}

impl LineMetrics {
    /// Baseline offset from the top of the line
    pub fn baseline(&self) -> f32 {
        self.ascender
    }
}

/// Result of breaking text into lines
#[derive(Debug, Clone, Default)]
pub struct BrokenText {
    /// The laid out lines
    pub lines: Vec<LineMetrics>,
    /// Width of the widest line
    pub width: f32,
    /// Total height of all lines
    pub total_height: f32,
}

/// Vertical metrics of a shaped run, located in the plain text
#[derive(Debug, Clone)]
struct RunInfo {
    start: usize,
    end: usize,
    ascender: f32,
    descender: f32,
    line_gap: f32,
}

/// Line breaker that converts styled text into lines
#[derive(Debug, Clone, Default)]
pub struct LineBreaker {
    /// Text shaper for measuring glyphs
    shaper: TextShaper,
}

impl LineBreaker {
    /// Create a new line breaker
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line breaker with a custom shaper
    pub fn with_shaper(shaper: TextShaper) -> Self {
        Self { shaper }
    }

    pub fn shaper(&self) -> &TextShaper {
        &self.shaper
    }

    /// Get a mutable reference to the text shaper
    pub fn shaper_mut(&mut self) -> &mut TextShaper {
        &mut self.shaper
    }

    /// Break styled text into lines
    pub fn break_text(&self, text: &StyledText, config: &LineBreakConfig) -> BrokenText {
        let full = text.plain_text();
        if full.is_empty() {
            return BrokenText::default();
        }

        let (advances, runs) = self.shape_runs(text, full.len());
        let break_ops = find_break_opportunities(&full);
        let line = |start: usize, end: usize, width: f32| {
            line_metrics(&runs, start, end, width, config.line_spacing)
        };

        let mut lines = Vec::new();
        let mut line_start = 0;
        // width including trailing whitespace
        let mut line_width = 0.0f32;
        // width up to the last non-whitespace character
        let mut content_width = 0.0f32;
        // offset after the last allowed break, with the content width there
        let mut last_break: Option<(usize, f32)> = None;

        for (idx, ch) in full.char_indices() {
            let end = idx + ch.len_utf8();
            let advance: f32 = advances[idx..end].iter().sum();

            if ch.is_whitespace() {
                // whitespace may hang past the margin
                line_width += advance;
            } else {
                if line_width + advance > config.available_width {
                    if let Some((offset, width)) = last_break.take().filter(|(o, _)| *o > line_start) {
                        lines.push(line(line_start, offset, width));
                        line_start = offset;
                        (line_width, content_width) = span_widths(&full, &advances, offset, idx);
                    }

                    if line_width + advance > config.available_width
                        && idx > line_start
                        && content_width > 0.0
                    {
                        // the word alone is wider than the line
                        lines.push(line(line_start, idx, content_width));
                        line_start = idx;
                        line_width = 0.0;
                        content_width = 0.0;
                    }
                }

                line_width += advance;
                content_width = line_width;
            }

            match break_ops[end - 1] {
                BreakOpportunity::Mandatory if end < full.len() => {
                    lines.push(line(line_start, end, content_width));
                    line_start = end;
                    line_width = 0.0;
                    content_width = 0.0;
                    last_break = None;
                }
                BreakOpportunity::Allowed => last_break = Some((end, content_width)),
                _ => {}
            }
        }

        if line_start < full.len() {
            // the last line keeps its trailing whitespace
            lines.push(line(line_start, full.len(), line_width));
        }

        let width = lines.iter().map(|l| l.width).fold(0.0, f32::max);
        let total_height = lines.iter().map(|l| l.height).sum();

        BrokenText {
            lines,
            width,
            total_height,
        }
    }

    /// Shape each run with its own font.
    ///
    /// Returns the advance attributed to every byte offset (non-zero only at
    /// cluster starts) and the runs' vertical metrics.
    fn shape_runs(&self, text: &StyledText, len: usize) -> (Vec<f32>, Vec<RunInfo>) {
        let mut advances = vec![0.0f32; len];
        let mut runs = Vec::with_capacity(text.runs().len());

        for (range, run) in text.run_ranges() {
            let font = run.style.font.clone().unwrap_or_default();
            let shaped = self
                .shaper
                .shape_run(&run.text, font.family.as_deref(), font.size, font.bold, font.italic)
                .unwrap_or_else(|e| {
                    tracing::warn!("Shaping failed, estimating widths: {}", e);
                    ShapedRun {
                        glyphs: Vec::new(),
                        width: run.text.chars().count() as f32 * font.size * 0.6,
                        font_size: font.size,
                        units_per_em: 1000,
                        ascender: font.size * 0.8,
                        descender: font.size * 0.2,
                        line_gap: 0.0,
                    }
                });

            if shaped.glyphs.is_empty() {
                // no glyph data: spread the run width evenly over its chars
                let count = run.text.chars().count().max(1) as f32;
                for (offset, _) in run.text.char_indices() {
                    advances[range.start + offset] = shaped.width / count;
                }
            } else {
                for (cluster, advance) in shaped.cluster_advances() {
                    if let Some(slot) = advances.get_mut(range.start + cluster) {
                        *slot += advance;
                    }
                }
            }

            runs.push(RunInfo {
                start: range.start,
                end: range.end,
                ascender: shaped.ascender,
                descender: shaped.descender,
                line_gap: shaped.line_gap,
            });
        }

        (advances, runs)
    }
}

/// Find Unicode line break opportunities using UAX #14.
///
/// The entry at byte `i` describes a break after that byte.
pub fn find_break_opportunities(text: &str) -> Vec<BreakOpportunity> {
    use unicode_linebreak::{linebreaks, BreakOpportunity as UnicodeBreak};

    let mut opportunities = vec![BreakOpportunity::NoBreak; text.len()];

    for (offset, break_type) in linebreaks(text) {
        if offset > 0 && offset <= opportunities.len() {
            opportunities[offset - 1] = match break_type {
                UnicodeBreak::Mandatory => BreakOpportunity::Mandatory,
                UnicodeBreak::Allowed => BreakOpportunity::Allowed,
            };
        }
    }

    opportunities
}

/// Line width and content width of `text[from..to]`
fn span_widths(text: &str, advances: &[f32], from: usize, to: usize) -> (f32, f32) {
    let mut width = 0.0;
    let mut content = 0.0;
    for (idx, ch) in text[from..to].char_indices() {
        let start = from + idx;
        width += advances[start..start + ch.len_utf8()].iter().sum::<f32>();
        if !ch.is_whitespace() {
            content = width;
        }
    }
    (width, content)
}

/// Vertical metrics for the line `start..end` from the runs it touches
fn line_metrics(runs: &[RunInfo], start: usize, end: usize, width: f32, line_spacing: f32) -> LineMetrics {
    let mut ascender = 0.0f32;
    let mut descender = 0.0f32;
    let mut line_gap = 0.0f32;

    for run in runs.iter().filter(|r| r.start < end && r.end > start) {
        ascender = ascender.max(run.ascender);
        descender = descender.max(run.descender);
        line_gap = line_gap.max(run.line_gap);
    }

    LineMetrics {
        start,
        end,
        width,
        ascender,
        descender,
        height: (ascender + descender + line_gap) * line_spacing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_model::{FontDescriptor, RunStyle, TextRun};

    fn sized(text: &str, size: f32) -> StyledText {
        StyledText::plain(text, RunStyle::with_font(FontDescriptor::default_at(size)))
    }

    fn wrap_at(width: f32) -> LineBreakConfig {
        LineBreakConfig {
            available_width: width,
            ..Default::default()
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn line_texts(text: &str, broken: &BrokenText) -> Vec<String> {
        broken
            .lines
            .iter()
            .map(|l| text[l.start..l.end].to_string())
            .collect()
    }

    #[test]
    fn test_break_opportunities() {
        let ops = find_break_opportunities("Hello world!");
        assert_eq!(ops.len(), 12);
        // break allowed after the space
        assert_eq!(ops[5], BreakOpportunity::Allowed);
        assert_eq!(ops[11], BreakOpportunity::Mandatory);
    }

    #[test]
    fn test_multibyte_opportunities_on_last_byte() {
        let ops = find_break_opportunities("é é");
        assert_eq!(ops[2], BreakOpportunity::Allowed);
        assert_eq!(ops[1], BreakOpportunity::NoBreak);
    }

    #[test]
    fn test_empty_text() {
        let broken = LineBreaker::new().break_text(&StyledText::new(), &LineBreakConfig::default());
        assert!(broken.lines.is_empty());
        assert_eq!(broken.width, 0.0);
        assert_eq!(broken.total_height, 0.0);
    }

    #[test]
    fn test_single_word() {
        let broken = LineBreaker::new().break_text(&sized("Hello", 10.0), &wrap_at(100.0));
        assert_eq!(broken.lines.len(), 1);
        assert_eq!((broken.lines[0].start, broken.lines[0].end), (0, 5));
        assert!(close(broken.width, 24.0));
    }

    #[test]
    fn test_wraps_at_space() {
        let broken = LineBreaker::new().break_text(&sized("Hello world test", 10.0), &wrap_at(40.0));
        assert_eq!(
            line_texts("Hello world test", &broken),
            vec!["Hello ", "world ", "test"]
        );
        // trailing spaces at wrap points are not counted
        assert!(close(broken.lines[0].width, 24.0));
        assert!(close(broken.total_height, 30.0));
    }

    #[test]
    fn test_mandatory_break() {
        let broken = LineBreaker::new().break_text(&sized("Hello\nworld", 10.0), &LineBreakConfig::default());
        assert_eq!(broken.lines.len(), 2);
        assert_eq!(line_texts("Hello\nworld", &broken), vec!["Hello\n", "world"]);
    }

    #[test]
    fn test_blank_lines_have_height() {
        let broken = LineBreaker::new().break_text(&sized("a\n\nb", 10.0), &LineBreakConfig::default());
        assert_eq!(broken.lines.len(), 3);
        assert!(close(broken.total_height, 30.0));
    }

    #[test]
    fn test_long_word_is_broken_inside() {
        let broken = LineBreaker::new().break_text(&sized("aaaaaaaaaa", 10.0), &wrap_at(20.0));
        // 5.5 per char: three fit on a 20pt line
        assert_eq!(broken.lines.len(), 4);
        assert!(broken.lines.iter().all(|l| l.width <= 20.0));
    }

    #[test]
    fn test_unbounded_width_never_wraps() {
        let text = "one two three four five six";
        let broken = LineBreaker::new().break_text(&sized(text, 10.0), &LineBreakConfig::default());
        assert_eq!(broken.lines.len(), 1);
    }

    #[test]
    fn test_final_trailing_space_counts() {
        let broken = LineBreaker::new().break_text(&sized("Hello ", 10.0), &LineBreakConfig::default());
        assert!(close(broken.width, 27.0));
    }

    #[test]
    fn test_tallest_run_sets_line_height() {
        let text = StyledText::new()
            .with_run(TextRun::with_style(
                "small ",
                RunStyle::with_font(FontDescriptor::default_at(10.0)),
            ))
            .with_run(TextRun::with_style(
                "BIG",
                RunStyle::with_font(FontDescriptor::default_at(30.0)),
            ));
        let broken = LineBreaker::new().break_text(&text, &LineBreakConfig::default());
        assert_eq!(broken.lines.len(), 1);
        assert!(close(broken.total_height, 30.0));
        assert!(close(broken.lines[0].baseline(), 24.0));
    }

    #[test]
    fn test_runs_without_font_use_default_size() {
        let broken = LineBreaker::new().break_text(&StyledText::from("x"), &LineBreakConfig::default());
        assert!(close(broken.total_height, 12.0));
    }
}
