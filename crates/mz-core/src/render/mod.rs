//! Rendering finished mazes
//!
//! A layout decides how many rooms fit its canvas and turns a [`MazeView`]
//! into text output.

mod json;
mod text;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::generator::MazeView;
use crate::geometry::Size;

pub use json::JsonLayout;
pub use text::TextLayout;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("The maze has {maze} rooms but the layout expects {layout} rooms.")]
    SizeMismatch { maze: Size, layout: Size },

    #[error("Could not serialize the maze: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parity requested for a room count
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Parity {
    None,
    #[default]
    Odd,
    Even,
}

impl Parity {
    /// Adjust `count` to this parity, never going up by more than one
    pub fn apply(self, count: i32) -> i32 {
        match self {
            Parity::None => count,
            Parity::Odd => (count / 2) * 2 + 1,
            Parity::Even => (count / 2) * 2,
        }
    }
}

/// Requested canvas size in rooms, with a parity per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: i32,
    pub height: i32,
    pub width_parity: Parity,
    pub height_parity: Parity,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            width_parity: Parity::Odd,
            height_parity: Parity::Odd,
        }
    }

    pub fn with_parity(mut self, width_parity: Parity, height_parity: Parity) -> Self {
        self.width_parity = width_parity;
        self.height_parity = height_parity;
        self
    }

    pub fn room_count(&self) -> Size {
        Size::new(
            self.width_parity.apply(self.width),
            self.height_parity.apply(self.height),
        )
    }

    fn check(&self, maze: &MazeView<'_>) -> Result<(), RenderError> {
        let layout = self.room_count();
        if maze.size() != layout {
            return Err(RenderError::SizeMismatch {
                maze: maze.size(),
                layout,
            });
        }
        Ok(())
    }
}

/// Output format of a maze
pub trait Layout {
    /// Number of rooms the maze needs to fill this layout
    fn room_count(&self) -> Size;

    /// Short description of the layout dimensions
    fn dimension_info(&self) -> String;

    fn render(&self, maze: &MazeView<'_>) -> Result<String, RenderError>;
}
