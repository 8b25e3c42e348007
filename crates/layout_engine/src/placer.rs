//! Placement of fitted text inside its container

use crate::{LayoutError, MeasuredRect, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where fitted text sits vertically inside its container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    /// Flush with the container top
    Top,
    /// Centered on the container
    #[default]
    Center,
    /// Flush with the container bottom
    Bottom,
}

impl VerticalAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Center => "center",
            VerticalAlignment::Bottom => "bottom",
        }
    }
}

impl fmt::Display for VerticalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerticalAlignment {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(VerticalAlignment::Top),
            "center" | "middle" => Ok(VerticalAlignment::Center),
            "bottom" => Ok(VerticalAlignment::Bottom),
            other => Err(LayoutError::InvalidConfig(format!(
                "unknown vertical alignment: {}",
                other
            ))),
        }
    }
}

/// Compute the rectangle to draw fitted text into.
///
/// The result spans the container's width, centered on its horizontal
/// center, and is as tall as the measured text. Coordinates are top-down.
///
/// A container with unbounded height has no center or bottom, so text in it
/// is always placed at the top. Likewise an unbounded width starts at the
/// container's left edge.
pub fn place(container: Rect, measured: &MeasuredRect, alignment: VerticalAlignment) -> Rect {
    let width = container.width;
    let height = measured.height;
    let x = if width.is_finite() {
        container.center().x - width / 2.0
    } else {
        container.x
    };

    let y = match alignment {
        _ if !container.height.is_finite() => container.y,
        VerticalAlignment::Top => container.y,
        VerticalAlignment::Center => container.center().y - height / 2.0,
        VerticalAlignment::Bottom => container.bottom() - height,
    };

    Rect::new(x, y, width, height)
}
