//! Symbolic placements and offsets for path ends and modifiers

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::location::Location;
use super::size::Size;

/// Logical placement of an element inside a grid
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
pub enum Placement {
    #[strum(to_string = "left", serialize = "w")]
    Left,
    #[strum(to_string = "top_left", serialize = "nw")]
    TopLeft,
    #[strum(to_string = "top", serialize = "n")]
    Top,
    #[strum(to_string = "top_right", serialize = "ne")]
    TopRight,
    #[strum(to_string = "right", serialize = "e")]
    Right,
    #[strum(to_string = "bottom_right", serialize = "se")]
    BottomRight,
    #[strum(to_string = "bottom", serialize = "s")]
    Bottom,
    #[strum(to_string = "bottom_left", serialize = "sw")]
    BottomLeft,
    #[strum(to_string = "center", serialize = "c")]
    Center,
    #[strum(to_string = "random", serialize = "r")]
    Random,
}

impl Placement {
    pub const fn is_random(self) -> bool {
        matches!(self, Placement::Random)
    }

    /// Direction of this placement as seen from the grid center
    pub const fn direction_normals(self) -> (i32, i32) {
        match self {
            Placement::Left => (-1, 0),
            Placement::TopLeft => (-1, -1),
            Placement::Top => (0, -1),
            Placement::TopRight => (1, -1),
            Placement::Right => (1, 0),
            Placement::BottomRight => (1, 1),
            Placement::Bottom => (0, 1),
            Placement::BottomLeft => (-1, 1),
            Placement::Center | Placement::Random => (0, 0),
        }
    }

    /// Correction that keeps an area of `size` inside the grid when its
    /// reference cell sits at this placement
    pub fn size_offset(self, size: Size) -> Location {
        let full_x = size.width - 1;
        let full_y = size.height - 1;
        let half_x = -(full_x / 2);
        let half_y = -(full_y / 2);
        match self {
            Placement::Left => Location::new(0, half_y),
            Placement::TopLeft => Location::new(0, 0),
            Placement::Top => Location::new(half_x, 0),
            Placement::TopRight => Location::new(-full_x, 0),
            Placement::Right => Location::new(-full_x, half_y),
            Placement::BottomRight => Location::new(-full_x, -full_y),
            Placement::Bottom => Location::new(half_x, -full_y),
            Placement::BottomLeft => Location::new(0, -full_y),
            Placement::Center => Location::new(half_x, half_y),
            Placement::Random => Location::new(0, 0),
        }
    }

    /// Sort key that applies placements in the order causing the fewest conflicts:
    /// center first, random last.
    pub const fn order_value(self) -> u32 {
        match self {
            Placement::Center => 100,
            Placement::TopLeft => 201,
            Placement::Top => 202,
            Placement::TopRight => 203,
            Placement::Right => 204,
            Placement::BottomRight => 205,
            Placement::Bottom => 206,
            Placement::BottomLeft => 207,
            Placement::Left => 208,
            Placement::Random => 300,
        }
    }
}

/// Offset applied after a placement was resolved
///
/// A relative offset moves `x` rooms from the placement towards the grid
/// center; `y` is ignored for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
    pub relative: bool,
}

impl Offset {
    pub const fn absolute(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            relative: false,
        }
    }

    pub const fn relative(distance: i32) -> Self {
        Self {
            x: distance,
            y: 0,
            relative: true,
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Apply this offset to a location resolved for `placement`
    ///
    /// `None` when the result leaves the coordinate range.
    pub fn translate(&self, location: Location, placement: Placement) -> Option<Location> {
        if self.is_zero() || placement.is_random() {
            return Some(location);
        }
        if self.relative {
            let (dx, dy) = placement.direction_normals();
            return location
                .checked_translated(self.x.checked_mul(-dx)?, self.x.checked_mul(-dy)?);
        }
        location.checked_translated(self.x, self.y)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative {
            write!(f, "{}", self.x)
        } else {
            write!(f, "{},{}", self.x, self.y)
        }
    }
}
