//! Styled text - ordered runs treated as one immutable value
//!
//! Every operation that "changes" the text returns a new value; nothing here
//! edits runs in place. That keeps measurement side-effect free and lets the
//! same text be fitted from several threads at once.

use crate::{RunStyle, TextRun};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// An ordered sequence of styled runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TextRun>", into = "Vec<TextRun>")]
pub struct StyledText {
    runs: Vec<TextRun>,
}

impl StyledText {
    /// Create empty styled text
    pub fn new() -> Self {
        Self::default()
    }

    /// A single run of text in one style
    pub fn plain(text: impl Into<String>, style: RunStyle) -> Self {
        Self::from_runs([TextRun::with_style(text, style)])
    }

    /// Build from runs; empty runs are dropped
    pub fn from_runs(runs: impl IntoIterator<Item = TextRun>) -> Self {
        Self {
            runs: runs.into_iter().filter(|r| !r.is_empty()).collect(),
        }
    }

    /// Append a run, consuming self
    pub fn with_run(mut self, run: TextRun) -> Self {
        if !run.is_empty() {
            self.runs.push(run);
        }
        self
    }

    /// The runs in order
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Total length in UTF-8 bytes
    pub fn len(&self) -> usize {
        self.runs.iter().map(TextRun::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// The concatenated text of all runs
    pub fn plain_text(&self) -> String {
        let mut text = String::with_capacity(self.len());
        for run in &self.runs {
            text.push_str(&run.text);
        }
        text
    }

    /// Each run together with its byte range in [`plain_text`](Self::plain_text)
    pub fn run_ranges(&self) -> impl Iterator<Item = (Range<usize>, &TextRun)> {
        let mut offset = 0;
        self.runs.iter().map(move |run| {
            let start = offset;
            offset += run.len();
            (start..offset, run)
        })
    }

    /// The styled text covering a byte range of the plain text.
    ///
    /// Returns `None` if the range is out of bounds or does not fall on char
    /// boundaries, mirroring [`str::get`].
    pub fn get(&self, range: Range<usize>) -> Option<StyledText> {
        if range.start > range.end || range.end > self.len() {
            return None;
        }

        let mut runs = Vec::new();
        for (run_range, run) in self.run_ranges() {
            let start = range.start.max(run_range.start);
            let end = range.end.min(run_range.end);
            if start >= end {
                continue;
            }
            let local = (start - run_range.start)..(end - run_range.start);
            let text = run.text.get(local)?;
            runs.push(TextRun::with_style(text, run.style.clone()));
        }

        Some(Self { runs })
    }

    /// Copy with every run's font set to `size`, preserving all other attributes
    pub fn with_font_size(&self, size: f32) -> StyledText {
        Self {
            runs: self
                .runs
                .iter()
                .map(|run| TextRun::with_style(run.text.clone(), run.style.with_font_size(size)))
                .collect(),
        }
    }

    /// Copy with `suffix` appended in the style of the last run
    pub fn with_suffix(&self, suffix: &str) -> StyledText {
        let style = self
            .runs
            .last()
            .map(|run| run.style.clone())
            .unwrap_or_default();
        self.clone().with_run(TextRun::with_style(suffix, style))
    }

    /// Hash of text and style, stable for the lifetime of the process.
    ///
    /// Float attributes are hashed by bit pattern.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for run in &self.runs {
            run.text.hash(&mut hasher);
            hash_style(&run.style, &mut hasher);
        }
        hasher.finish()
    }
}

fn hash_style(style: &RunStyle, hasher: &mut DefaultHasher) {
    match &style.font {
        Some(font) => {
            1u8.hash(hasher);
            font.family.hash(hasher);
            font.size.to_bits().hash(hasher);
            font.bold.hash(hasher);
            font.italic.hash(hasher);
        }
        None => 0u8.hash(hasher),
    }
    style.color.hash(hasher);
    style.underline.hash(hasher);
}

impl From<Vec<TextRun>> for StyledText {
    fn from(runs: Vec<TextRun>) -> Self {
        Self::from_runs(runs)
    }
}

impl From<StyledText> for Vec<TextRun> {
    fn from(text: StyledText) -> Self {
        text.runs
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::plain(text, RunStyle::default())
    }
}
