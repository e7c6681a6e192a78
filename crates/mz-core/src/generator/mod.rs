//! Maze generation: setup, carving, joining and the pipeline driving them

mod carving;
mod joining;
mod pipeline;
mod setup;
mod view;

pub use carving::CarvingStack;
pub use joining::{PathGroups, join_paths};
pub use pipeline::{GenerationState, Generator};
pub use setup::{GeneratorSetup, PathEnd};
pub use view::MazeView;
