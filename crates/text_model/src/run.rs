//! Text run - a contiguous span of text with consistent formatting

use crate::RunStyle;
use serde::{Deserialize, Serialize};

/// A text run - contiguous text with consistent formatting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content of this run
    pub text: String,
    /// Style applied to the whole run
    #[serde(default)]
    pub style: RunStyle,
}

impl TextRun {
    /// Create a run with the default style
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    /// Create a run with a style
    pub fn with_style(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Length of the text in UTF-8 bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if this run is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
