//! Geometry in layout coordinates (top-down: y grows downwards)

use crate::{LayoutError, Result};
use serde::{Deserialize, Serialize};

/// A point in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// A rectangle at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The size of this rectangle as a fitting target
    pub fn size(&self) -> BoxSize {
        BoxSize::new(self.width, self.height)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Width and height of a box text is fitted into or measured against.
///
/// Either dimension may be unbounded (`f32::INFINITY`); an unbounded
/// dimension never constrains a fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

impl BoxSize {
    /// No constraint on either axis
    pub const UNBOUNDED: BoxSize = BoxSize {
        width: f32::INFINITY,
        height: f32::INFINITY,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A fixed width with unbounded height, as used for wrapped measurement
    pub fn with_unbounded_height(width: f32) -> Self {
        Self {
            width,
            height: f32::INFINITY,
        }
    }

    pub fn is_width_bounded(&self) -> bool {
        self.width.is_finite()
    }

    pub fn is_height_bounded(&self) -> bool {
        self.height.is_finite()
    }

    /// The smaller of the two dimensions
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Whether a `width` x `height` extent fits inside this box.
    ///
    /// Each axis is compared independently and non-strictly; unbounded axes
    /// are always satisfied.
    pub fn can_contain(&self, width: f32, height: f32) -> bool {
        let width_fits = !self.is_width_bounded() || self.width >= width;
        let height_fits = !self.is_height_bounded() || self.height >= height;
        width_fits && height_fits
    }

    /// Reject negative or NaN dimensions
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f32| !v.is_nan() && v >= 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(LayoutError::InvalidBox {
                width: self.width,
                height: self.height,
            })
        }
    }
}
