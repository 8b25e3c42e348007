//! Handing fitted text to a renderer
//!
//! [`AutoFitLabel`] ties the pieces together for a host: fit the text, place
//! it in the container, and draw it through a [`TextRenderer`]. [`DisplayList`]
//! is a renderer that records draw calls, for hosts that paint later and for
//! tests.

use crate::{
    place, AutoFitConfig, AutoFitEngine, FitResult, Rect, Result, TextMeasurer, VerticalAlignment,
};
use serde::{Deserialize, Serialize};
use text_model::StyledText;

/// Paints styled text into a rectangle of the current drawing surface
pub trait TextRenderer {
    fn draw(&mut self, text: &StyledText, rect: Rect, wrap: bool);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderItem {
    /// Styled text drawn into a rectangle
    Text {
        rect: Rect,
        font_size: f32,
        text: StyledText,
        wrap: bool,
    },
}

/// Renderer that records draw calls in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub items: Vec<RenderItem>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl TextRenderer for DisplayList {
    fn draw(&mut self, text: &StyledText, rect: Rect, wrap: bool) {
        let font_size = text.runs().first().map(|run| run.style.font_size()).unwrap_or_default();
        self.items.push(RenderItem::Text {
            rect,
            font_size,
            text: text.clone(),
            wrap,
        });
    }
}

/// Fitted text ready to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedText {
    /// The text at its fitted font size
    pub text: StyledText,
    /// Where to draw it
    pub rect: Rect,
    pub fit: FitResult,
}

/// A text label that always fills its container as far as it can
#[derive(Debug, Clone, Default)]
pub struct AutoFitLabel {
    engine: AutoFitEngine,
    alignment: VerticalAlignment,
}

impl AutoFitLabel {
    pub fn new(engine: AutoFitEngine, alignment: VerticalAlignment) -> Self {
        Self { engine, alignment }
    }

    pub fn from_config(config: &AutoFitConfig) -> Result<Self> {
        Ok(Self::new(
            AutoFitEngine::new(&config.search)?,
            config.placement.alignment,
        ))
    }

    pub fn engine(&self) -> &AutoFitEngine {
        &self.engine
    }

    pub fn alignment(&self) -> VerticalAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: VerticalAlignment) {
        self.alignment = alignment;
    }

    /// Fit and place `text` in `container`; `None` when there is nothing to draw
    pub fn layout<M>(&self, text: &StyledText, container: Rect, measurer: &M) -> Result<Option<PlacedText>>
    where
        M: TextMeasurer + ?Sized,
    {
        let Some(fit) = self.engine.fit(text, container.size(), measurer)? else {
            return Ok(None);
        };

        Ok(Some(PlacedText {
            text: text.with_font_size(fit.font_size),
            rect: place(container, &fit.measured, self.alignment),
            fit,
        }))
    }

    /// Lay out `text` and draw it, wrapped, through `renderer`.
    ///
    /// Draws nothing when the text is empty or only whitespace.
    pub fn draw<M, R>(
        &self,
        text: &StyledText,
        container: Rect,
        measurer: &M,
        renderer: &mut R,
    ) -> Result<Option<PlacedText>>
    where
        M: TextMeasurer + ?Sized,
        R: TextRenderer + ?Sized,
    {
        let placed = self.layout(text, container, measurer)?;
        if let Some(placed) = &placed {
            renderer.draw(&placed.text, placed.rect, true);
        }
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoxSize, MeasuredRect};

    fn mono(text: &StyledText, _bounds: BoxSize, _wrap: bool) -> MeasuredRect {
        let size = text.runs().first().map(|r| r.style.font_size()).unwrap_or(12.0);
        MeasuredRect::new(text.plain_text().chars().count() as f32 * size * 0.5, size)
    }

    #[test]
    fn test_draw_records_fitted_text() {
        let label = AutoFitLabel::new(AutoFitEngine::default(), VerticalAlignment::Bottom);
        let mut list = DisplayList::new();
        let container = Rect::new(0.0, 0.0, 200.0, 100.0);

        let placed = label
            .draw(&StyledText::from("Hello"), container, &mono, &mut list)
            .unwrap()
            .unwrap();

        assert_eq!(list.len(), 1);
        let RenderItem::Text { rect, font_size, wrap, .. } = &list.items[0];
        assert_eq!(*rect, placed.rect);
        assert_eq!(*font_size, placed.fit.font_size);
        assert!(*wrap);
        assert!((rect.bottom() - container.bottom()).abs() < 1e-3);
        assert_eq!(rect.width, 200.0);
    }

    #[test]
    fn test_nothing_to_draw_is_a_no_op() {
        let label = AutoFitLabel::default();
        let mut list = DisplayList::new();

        let placed = label
            .draw(&StyledText::from(" \n "), Rect::from_size(50.0, 50.0), &mono, &mut list)
            .unwrap();

        assert!(placed.is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_layout_applies_font_size() {
        let label = AutoFitLabel::default();
        let placed = label
            .layout(&StyledText::from("abcd"), Rect::from_size(100.0, 100.0), &mono)
            .unwrap()
            .unwrap();

        for run in placed.text.runs() {
            assert_eq!(run.style.font_size(), placed.fit.font_size);
        }
    }

    #[test]
    fn test_from_config() {
        let mut config = AutoFitConfig::default();
        config.placement.alignment = VerticalAlignment::Top;
        let label = AutoFitLabel::from_config(&config).unwrap();
        assert_eq!(label.alignment(), VerticalAlignment::Top);
    }
}
