//! Walls of room cells and the closing patterns that select them

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::location::{Direction, Location};
use super::location_grid::{Corner, LocationGrid};

/// Wall selection pattern used by closing modifiers
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum ClosingType {
    #[strum(to_string = "corner_paths", serialize = "c")]
    CornerPaths,
    #[strum(to_string = "corner_top_left", serialize = "cnw")]
    CornerTopLeft,
    #[strum(to_string = "corner_top_right", serialize = "cne")]
    CornerTopRight,
    #[strum(to_string = "corner_bottom_right", serialize = "cse")]
    CornerBottomRight,
    #[strum(to_string = "corner_bottom_left", serialize = "csw")]
    CornerBottomLeft,
    #[strum(to_string = "direction_west", serialize = "dw")]
    DirectionWest,
    #[strum(to_string = "direction_north", serialize = "dn")]
    DirectionNorth,
    #[strum(to_string = "direction_east", serialize = "de")]
    DirectionEast,
    #[strum(to_string = "direction_south", serialize = "ds")]
    DirectionSouth,
    #[strum(to_string = "direction_horizontal", serialize = "dh")]
    DirectionHorizontal,
    #[strum(to_string = "direction_vertical", serialize = "dv")]
    DirectionVertical,
    #[strum(to_string = "middle_paths", serialize = "m")]
    MiddlePaths,
    #[strum(to_string = "middle_west", serialize = "mw")]
    MiddleWest,
    #[strum(to_string = "middle_north", serialize = "mn")]
    MiddleNorth,
    #[strum(to_string = "middle_east", serialize = "me")]
    MiddleEast,
    #[strum(to_string = "middle_south", serialize = "ms")]
    MiddleSouth,
}

/// A closing pattern, optionally inverted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Closing {
    pub closing_type: ClosingType,
    pub invert: bool,
}

impl Closing {
    pub const fn new(closing_type: ClosingType, invert: bool) -> Self {
        Self {
            closing_type,
            invert,
        }
    }

    /// Check if the wall is selected by this closing, relative to `grid`
    pub fn selects(&self, wall: &Wall, grid: &LocationGrid) -> bool {
        wall.matches_closing_type(self.closing_type, grid) != self.invert
    }
}

impl fmt::Display for Closing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invert {
            write!(f, "^{}", self.closing_type)
        } else {
            write!(f, "{}", self.closing_type)
        }
    }
}

/// One side of a 1x1 room cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Wall {
    pub location: Location,
    pub direction: Direction,
}

impl Wall {
    pub const fn new(location: Location, direction: Direction) -> Self {
        Self {
            location,
            direction,
        }
    }

    /// The same wall seen from the neighbouring cell
    pub fn opposite(&self) -> Wall {
        Wall::new(
            self.location.advance(self.direction),
            self.direction.opposite(),
        )
    }

    /// Check if this wall matches the closing type in relation to `grid`
    pub fn matches_closing_type(&self, closing_type: ClosingType, grid: &LocationGrid) -> bool {
        match closing_type {
            ClosingType::CornerPaths => grid.is_corner(self.location, None),
            ClosingType::CornerTopLeft => grid.is_corner(self.location, Some(Corner::TopLeft)),
            ClosingType::CornerTopRight => grid.is_corner(self.location, Some(Corner::TopRight)),
            ClosingType::CornerBottomRight => {
                grid.is_corner(self.location, Some(Corner::BottomRight))
            }
            ClosingType::CornerBottomLeft => {
                grid.is_corner(self.location, Some(Corner::BottomLeft))
            }
            ClosingType::DirectionWest => self.direction == Direction::West,
            ClosingType::DirectionNorth => self.direction == Direction::North,
            ClosingType::DirectionEast => self.direction == Direction::East,
            ClosingType::DirectionSouth => self.direction == Direction::South,
            ClosingType::DirectionHorizontal => {
                matches!(self.direction, Direction::West | Direction::East)
            }
            ClosingType::DirectionVertical => {
                matches!(self.direction, Direction::North | Direction::South)
            }
            ClosingType::MiddlePaths => grid.is_middle(self.location, None),
            ClosingType::MiddleWest => grid.is_middle(self.location, Some(Direction::West)),
            ClosingType::MiddleNorth => grid.is_middle(self.location, Some(Direction::North)),
            ClosingType::MiddleEast => grid.is_middle(self.location, Some(Direction::East)),
            ClosingType::MiddleSouth => grid.is_middle(self.location, Some(Direction::South)),
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.location, self.direction)
    }
}
