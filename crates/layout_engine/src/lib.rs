//! Layout Engine - Auto-fit sizing, line breaking, and placement
//!
//! This crate finds the largest font size at which styled text fits a box
//! without breaking words, and places the result for drawing. Measurement is
//! delegated to a [`TextMeasurer`]; [`ShapingMeasurer`] provides one built on
//! the workspace's text shaper and a UAX #14 line breaker.

mod geometry;
mod error;
mod measurer;
mod line_breaker;
mod segmenter;
mod autofit;
mod placer;
mod render;
mod cache;
mod config;

pub use geometry::*;
pub use error::*;
pub use measurer::*;
pub use line_breaker::*;
pub use segmenter::*;
pub use autofit::*;
pub use placer::*;
pub use render::*;
pub use cache::*;
pub use config::*;
