//! Sizes and insets in room units

use std::fmt;

use serde::{Deserialize, Serialize};

/// Size of a room or an area, in room units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ONE: Size = Size::new(1, 1);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check if this is a single 1x1 cell
    pub const fn is_one(&self) -> bool {
        self.width == 1 && self.height == 1
    }

    /// Number of cells covered by this size
    pub const fn area(&self) -> i32 {
        self.width * self.height
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::ONE
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Frame thickness on each side of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Insets {
    pub north: i32,
    pub east: i32,
    pub south: i32,
    pub west: i32,
}

impl Insets {
    pub const fn new(north: i32, east: i32, south: i32, west: i32) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }

    /// The same inset on all four sides
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Insets::uniform(1)
    }
}

impl fmt::Display for Insets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.north, self.east, self.south, self.west)
    }
}
