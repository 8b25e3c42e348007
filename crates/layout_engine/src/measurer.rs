//! The text measurement service the fitting algorithm is built against
//!
//! [`TextMeasurer`] is the seam between the algorithm and whatever actually
//! knows how wide text is. [`ShapingMeasurer`] is the implementation backed by
//! this workspace's shaper and line breaker; hosts with their own text system
//! implement the trait directly, and tests can pass a closure.

use crate::{BoxSize, LineBreakConfig, LineBreaker, Point};
use serde::{Deserialize, Serialize};
use text_engine::TextShaper;
use text_model::StyledText;

/// The extent a measurement service reports for styled text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredRect {
    pub width: f32,
    pub height: f32,
    /// Center of the measured extent, relative to its top-left corner
    pub center: Point,
}

impl MeasuredRect {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Point::new(width / 2.0, height / 2.0),
        }
    }

    /// An empty extent
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Whether this extent fits in `target` (see [`BoxSize::can_contain`])
    pub fn fits_within(&self, target: BoxSize) -> bool {
        target.can_contain(self.width, self.height)
    }
}

/// Measures styled text.
///
/// Implementations must be pure: the same text, bounds and wrapping mode
/// always produce the same rectangle. `bounds` may be unbounded on either
/// axis; with `wrap` set, lines are broken to respect `bounds.width`.
pub trait TextMeasurer {
    fn measure(&self, text: &StyledText, bounds: BoxSize, wrap: bool) -> MeasuredRect;
}

impl<F> TextMeasurer for F
where
    F: Fn(&StyledText, BoxSize, bool) -> MeasuredRect,
{
    fn measure(&self, text: &StyledText, bounds: BoxSize, wrap: bool) -> MeasuredRect {
        self(text, bounds, wrap)
    }
}

/// Measurement settings for [`ShapingMeasurer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureSettings {
    /// Line spacing multiplier
    pub line_spacing: f32,
}

impl Default for MeasureSettings {
    fn default() -> Self {
        Self { line_spacing: 1.0 }
    }
}

/// Measurement service built on [`TextShaper`] and [`LineBreaker`].
///
/// The height of `bounds` is not used to truncate: the reported height is
/// always that of every line the text needs.
#[derive(Debug, Clone, Default)]
pub struct ShapingMeasurer {
    breaker: LineBreaker,
    settings: MeasureSettings,
}

impl ShapingMeasurer {
    /// Create a measurer with an empty shaper (width estimation only)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a measurer over a shaper with fonts already loaded
    pub fn with_shaper(shaper: TextShaper, settings: MeasureSettings) -> Self {
        Self {
            breaker: LineBreaker::with_shaper(shaper),
            settings,
        }
    }

    /// Get a mutable reference to the text shaper, e.g. to load fonts
    pub fn shaper_mut(&mut self) -> &mut TextShaper {
        self.breaker.shaper_mut()
    }

    pub fn settings(&self) -> &MeasureSettings {
        &self.settings
    }

    /// The line breaker used for measurement
    pub fn line_breaker(&self) -> &LineBreaker {
        &self.breaker
    }
}

impl TextMeasurer for ShapingMeasurer {
    fn measure(&self, text: &StyledText, bounds: BoxSize, wrap: bool) -> MeasuredRect {
        let available_width = if wrap { bounds.width } else { f32::INFINITY };
        let config = LineBreakConfig {
            available_width,
            line_spacing: self.settings.line_spacing,
        };
        let broken = self.breaker.break_text(text, &config);
        MeasuredRect::new(broken.width, broken.total_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_model::{FontDescriptor, RunStyle};

    fn sized(text: &str, size: f32) -> StyledText {
        StyledText::plain(text, RunStyle::with_font(FontDescriptor::default_at(size)))
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_measured_rect_center() {
        let rect = MeasuredRect::new(120.0, 40.0);
        assert_eq!(rect.center, Point::new(60.0, 20.0));
    }

    #[test]
    fn test_fits_within() {
        let rect = MeasuredRect::new(200.0, 50.0);
        assert!(rect.fits_within(BoxSize::new(200.0, 50.0)));
        assert!(!rect.fits_within(BoxSize::new(199.0, 500.0)));
        assert!(rect.fits_within(BoxSize::with_unbounded_height(200.0)));
    }

    #[test]
    fn test_closure_is_a_measurer() {
        let measurer = |text: &StyledText, _: BoxSize, _: bool| {
            MeasuredRect::new(text.len() as f32, 1.0)
        };
        let rect = measurer.measure(&StyledText::from("abc"), BoxSize::UNBOUNDED, false);
        assert_eq!(rect.width, 3.0);
    }

    #[test]
    fn test_single_line_unwrapped() {
        let measurer = ShapingMeasurer::new();
        let rect = measurer.measure(&sized("Hello World", 10.0), BoxSize::new(10.0, 10.0), false);
        // Hello 2.4 + space 0.3 + World (.9+.55+.3+.3+.55) 2.6 = 5.3 em
        assert!(close(rect.width, 53.0));
        assert!(close(rect.height, 10.0));
    }

    #[test]
    fn test_wrapping_adds_lines() {
        let measurer = ShapingMeasurer::new();
        let rect = measurer.measure(
            &sized("Hello World", 10.0),
            BoxSize::with_unbounded_height(30.0),
            true,
        );
        assert!(close(rect.width, 26.0));
        assert!(close(rect.height, 20.0));
    }

    #[test]
    fn test_line_spacing_applies() {
        let measurer = ShapingMeasurer::with_shaper(
            TextShaper::new(),
            MeasureSettings { line_spacing: 1.5 },
        );
        let rect = measurer.measure(&sized("a\nb", 10.0), BoxSize::UNBOUNDED, false);
        assert!(close(rect.height, 30.0));
    }

    #[test]
    fn test_empty_text_measures_zero() {
        let measurer = ShapingMeasurer::new();
        let rect = measurer.measure(&StyledText::new(), BoxSize::UNBOUNDED, true);
        assert_eq!(rect, MeasuredRect::zero());
    }
}
