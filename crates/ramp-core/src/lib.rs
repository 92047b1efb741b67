//! Ramp Core — domain layer for colormap assets.
//!
//! This crate contains the colormap data type, source-file parsing and
//! normalization, and the name-keyed registry with its builtin asset set.
//! No rendering dependencies.

pub mod colormap;
pub mod parse;
pub mod registry;

// Re-exports for convenience.
pub use colormap::{Colormap, REVERSED_SUFFIX};
pub use parse::{DATA_EXTENSIONS, ParseError, SAMPLE_MARKER};
pub use registry::{ColormapRegistry, LoadIssue, NameCollision};
