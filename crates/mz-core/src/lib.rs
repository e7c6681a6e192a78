//! mz-core: Procedural maze generation
//!
//! Builds a grid of rooms, reshapes it with modifiers, carves one randomized
//! path per path end and joins the paths into a single maze.
//! This crate has no I/O besides logging; it is designed to be pure and
//! testable. Output formats are provided through the [`render::Layout`] trait.

pub mod generator;
pub mod geometry;
pub mod grid;
pub mod parse;
pub mod render;

mod error;
mod rng;

pub use error::{ErrorMark, GeneratorError};
pub use generator::{GenerationState, Generator, GeneratorSetup, MazeView, PathEnd};
pub use parse::ParseError;
pub use render::{Canvas, JsonLayout, Layout, Parity, RenderError, TextLayout};
pub use rng::MazeRng;
