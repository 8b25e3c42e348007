//! Auto-fit: the largest font size at which styled text fits a box
//!
//! Fitting runs two binary searches over font size:
//!
//! 1. **Longest-word ceiling.** The widest word (compared at a reference
//!    size) is searched on its own, on a single line, against the box. The
//!    result is the largest size at which that word never has to be broken.
//! 2. **Whole-text refinement.** The complete text is searched with wrapping
//!    at the box width, capped by the ceiling from phase 1.
//!
//! The cap relies on wrapping only ever reducing the width each line needs:
//! a wrapped layout of the whole text cannot require a larger size than its
//! longest word needs on one line. Without it, the wrapping measurer would
//! happily break a long word across lines and report a fit.
//!
//! Nothing is cached here; every call re-measures. See [`crate::FitCache`]
//! for memoization keyed by text and box.

use crate::{segment_words, BoxSize, LayoutError, MeasuredRect, Result, SearchSettings, TextMeasurer};
use serde::{Deserialize, Serialize};
use text_model::StyledText;

/// No font size below this is ever searched
pub const MIN_FONT_SIZE_FLOOR: f32 = 1.0;

/// A closed interval of font sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSizeRange {
    min: f32,
    max: f32,
}

impl FontSizeRange {
    /// Create a range; `min` must be at least [`MIN_FONT_SIZE_FLOOR`] and
    /// `max` at least `min`, both finite.
    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min < MIN_FONT_SIZE_FLOOR || max < min {
            return Err(LayoutError::InvalidFontRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }
}

/// What a single search measures and what it must fit into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery {
    /// Bounds handed to the measurer
    pub bounds: BoxSize,
    /// Box the measured extent is compared against
    pub target: BoxSize,
    /// Whether the measurer wraps lines
    pub wrap: bool,
}

impl SearchQuery {
    /// One unwrapped line with no measurement bounds, checked against `target`
    pub fn single_line(target: BoxSize) -> Self {
        Self {
            bounds: BoxSize::UNBOUNDED,
            target,
            wrap: false,
        }
    }

    /// Lines wrapped at the target width, checked against `target`
    pub fn wrapped(target: BoxSize) -> Self {
        Self {
            bounds: BoxSize::with_unbounded_height(target.width),
            target,
            wrap: true,
        }
    }
}

/// Outcome of a successful fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// The chosen font size
    pub font_size: f32,
    /// Ceiling from the longest-word phase; `font_size` never exceeds it
    pub longest_word_font_size: f32,
    /// The wrapped text measured at `font_size`
    pub measured: MeasuredRect,
}

/// Finds the largest font size at which styled text fits a box without
/// breaking any word.
///
/// The engine holds only settings, so one instance can be shared across
/// threads; measurement goes through the [`TextMeasurer`] passed to each call.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoFitEngine {
    range: FontSizeRange,
    accuracy_threshold: f32,
    reference_font_size: f32,
}

impl AutoFitEngine {
    /// Create an engine from validated settings
    pub fn new(settings: &SearchSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            range: settings.font_range()?,
            accuracy_threshold: settings.accuracy_threshold,
            reference_font_size: settings.reference_font_size,
        })
    }

    pub fn range(&self) -> FontSizeRange {
        self.range
    }

    pub fn accuracy_threshold(&self) -> f32 {
        self.accuracy_threshold
    }

    /// Size at which words are compared to find the longest
    pub fn reference_font_size(&self) -> f32 {
        self.reference_font_size
    }

    /// Fit `text` into `target`.
    ///
    /// Returns `Ok(None)` when there is nothing to draw (empty or
    /// whitespace-only text). If even the minimum font size overflows the
    /// box, the minimum is returned and the caller sees the overflow.
    pub fn fit<M>(&self, text: &StyledText, target: BoxSize, measurer: &M) -> Result<Option<FitResult>>
    where
        M: TextMeasurer + ?Sized,
    {
        target.validate()?;

        let Some(word) = self.longest_word(text, measurer) else {
            tracing::debug!(target: "layout_engine::autofit", "Nothing to draw");
            return Ok(None);
        };

        let longest_word_font_size = self.longest_word_font_size(&word, target, measurer);
        tracing::debug!(
            target: "layout_engine::autofit",
            word = %word.plain_text(),
            size = longest_word_font_size,
            "Longest word ceiling"
        );

        let query = SearchQuery::wrapped(target);
        let font_size = binary_search(
            text,
            self.range.min(),
            longest_word_font_size,
            &query,
            self.accuracy_threshold,
            measurer,
        );
        let measured = measurer.measure(&text.with_font_size(font_size), query.bounds, query.wrap);

        tracing::debug!(
            target: "layout_engine::autofit",
            size = font_size,
            width = measured.width,
            height = measured.height,
            "Fitted text"
        );

        Ok(Some(FitResult {
            font_size,
            longest_word_font_size,
            measured,
        }))
    }

    /// The widest word at the reference size; ties go to the first.
    ///
    /// `None` when no word has any width.
    pub fn longest_word<M>(&self, text: &StyledText, measurer: &M) -> Option<StyledText>
    where
        M: TextMeasurer + ?Sized,
    {
        let mut longest: Option<(f32, StyledText)> = None;

        for word in segment_words(text) {
            let width = measurer
                .measure(
                    &word.with_font_size(self.reference_font_size),
                    BoxSize::UNBOUNDED,
                    false,
                )
                .width;

            let wider = match &longest {
                Some((best, _)) => width > *best,
                None => width > 0.0,
            };
            if wider {
                longest = Some((width, word));
            }
        }

        longest.map(|(_, word)| word)
    }

    /// Largest size at which `word` fits `target` on one line.
    ///
    /// A trailing space is measured with the word so that glyphs overhanging
    /// their advance at the end of a run (italics mostly) are not clipped.
    pub fn longest_word_font_size<M>(&self, word: &StyledText, target: BoxSize, measurer: &M) -> f32
    where
        M: TextMeasurer + ?Sized,
    {
        let padded = word.with_suffix(" ");
        let ceiling = self.range.max().min(target.min_dimension());
        binary_search(
            &padded,
            self.range.min(),
            ceiling,
            &SearchQuery::single_line(target),
            self.accuracy_threshold,
            measurer,
        )
    }
}

impl Default for AutoFitEngine {
    fn default() -> Self {
        let settings = SearchSettings::default();
        Self {
            range: FontSizeRange {
                min: settings.min_font_size,
                max: settings.max_font_size,
            },
            accuracy_threshold: settings.accuracy_threshold,
            reference_font_size: settings.reference_font_size,
        }
    }
}

/// Binary search for the largest font size in `[min_size, max_size]` at which
/// `text` fits `query.target`.
///
/// Stops once the interval is narrower than `accuracy_threshold` and returns
/// its lower bound, which is the last size known to fit (or `min_size` if
/// nothing did). The result may undershoot the true maximum by up to the
/// threshold but never overshoots it. A threshold of zero still terminates,
/// once the midpoint stops moving.
pub fn binary_search<M>(
    text: &StyledText,
    min_size: f32,
    max_size: f32,
    query: &SearchQuery,
    accuracy_threshold: f32,
    measurer: &M,
) -> f32
where
    M: TextMeasurer + ?Sized,
{
    let mut lo = min_size;
    let mut hi = max_size;

    while hi - lo >= accuracy_threshold {
        let mid = lo + (hi - lo) / 2.0;
        if mid <= lo || mid >= hi {
            break;
        }

        let measured = measurer.measure(&text.with_font_size(mid), query.bounds, query.wrap);
        let fits = measured.fits_within(query.target);
        tracing::trace!(
            target: "layout_engine::autofit",
            lo, hi, mid, fits,
            width = measured.width,
            height = measured.height,
            "Search step"
        );

        if fits {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    lo
}
