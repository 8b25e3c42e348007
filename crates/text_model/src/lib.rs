//! Text Model - Immutable styled text
//!
//! This crate holds the value types that flow through measurement and
//! fitting: runs of text with per-run style, and the font descriptor each
//! run is drawn with.
//!
//! # Modules
//!
//! - `style`: Font descriptors and run styles
//! - `run`: A single run of uniformly styled text
//! - `styled_text`: Ordered runs with slicing and font-size derivation

mod run;
mod style;
mod styled_text;

pub use run::*;
pub use style::*;
pub use styled_text::*;
