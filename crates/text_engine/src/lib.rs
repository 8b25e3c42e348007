//! Text Engine - Text shaping and font metrics
//!
//! This crate handles text shaping using rustybuzz and provides the metric
//! calculations the layout engine measures lines with.
//!
//! # Modules
//!
//! - `shaper`: Text shaping using rustybuzz, with width estimation when no
//!   face is loaded
//! - `font`: Font identity and metrics
//! - `metrics`: Line height and baseline calculations

mod error;
mod font;
mod metrics;
mod shaper;

pub use error::*;
pub use font::*;
pub use metrics::*;
pub use shaper::*;
