//! Word segmentation
//!
//! Splits styled text into the whitespace-delimited words the fitting
//! engine measures on their own.

use std::ops::Range;
use text_model::StyledText;

/// Split styled text into words, keeping each character's style.
///
/// A word is the text between two successive delimiter ranges, where a
/// delimiter range is a maximal run of whitespace (newlines included). The
/// delimiters themselves are dropped. Text that starts or ends with
/// whitespace yields an empty first or last segment; empty segments measure
/// zero wide, so they never win the longest-word selection.
///
/// Empty input yields no segments.
pub fn segment_words(text: &StyledText) -> Vec<StyledText> {
    word_ranges(&text.plain_text())
        .into_iter()
        .filter_map(|range| text.get(range))
        .collect()
}

/// Byte ranges of the words in `text`
pub fn word_ranges(text: &str) -> Vec<Range<usize>> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut word_start = 0;
    let mut in_delimiters = false;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if !in_delimiters {
                ranges.push(word_start..idx);
                in_delimiters = true;
            }
        } else if in_delimiters {
            word_start = idx;
            in_delimiters = false;
        }
    }

    if in_delimiters {
        ranges.push(text.len()..text.len());
    } else {
        ranges.push(word_start..text.len());
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_model::{FontDescriptor, RunStyle, TextRun};

    fn words(text: &str) -> Vec<String> {
        segment_words(&StyledText::from(text))
            .iter()
            .map(StyledText::plain_text)
            .collect()
    }

    #[test]
    fn test_simple_words() {
        assert_eq!(words("Hello World"), vec!["Hello", "World"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(words("").is_empty());
    }

    #[test]
    fn test_consecutive_delimiters_collapse() {
        assert_eq!(words("a  \n\t b"), vec!["a", "b"]);
    }

    #[test]
    fn test_leading_and_trailing_delimiters_give_empty_segments() {
        assert_eq!(words(" a "), vec!["", "a", ""]);
        assert_eq!(words("   "), vec!["", ""]);
    }

    #[test]
    fn test_newline_is_a_delimiter() {
        assert_eq!(words("line one\nline two"), vec!["line", "one", "line", "two"]);
    }

    #[test]
    fn test_unicode_whitespace() {
        assert_eq!(words("a\u{3000}b\u{00A0}c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_styles_preserved_across_runs() {
        let serif = RunStyle::with_font(FontDescriptor::new("Serif", 12.0));
        let bold = RunStyle::with_font(FontDescriptor::new("Serif", 12.0).with_bold(true));
        let text = StyledText::new()
            .with_run(TextRun::with_style("plain bo", serif.clone()))
            .with_run(TextRun::with_style("ld rest", bold.clone()));

        let segments = segment_words(&text);
        assert_eq!(segments.len(), 3);

        let mixed = &segments[1];
        assert_eq!(mixed.plain_text(), "bold");
        assert_eq!(mixed.runs().len(), 2);
        assert_eq!(mixed.runs()[0].style, serif);
        assert_eq!(mixed.runs()[1].style, bold);
    }

    #[test]
    fn test_ranges_are_char_boundaries() {
        let text = "héllo wörld";
        for range in word_ranges(text) {
            assert!(text.get(range).is_some());
        }
    }
}
