//! Rectangular grids of room locations
//!
//! A `LocationGrid` is used both for the whole maze and for the extent of a
//! single (possibly merged) room.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rng::MazeRng;

use super::location::{Direction, Location};
use super::placement::Placement;
use super::size::{Insets, Size};

/// A corner of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub const fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomRight => Corner::TopLeft,
            Corner::BottomLeft => Corner::TopRight,
        }
    }
}

/// A rectangle of locations, given by its top-left location and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationGrid {
    pub location: Location,
    pub size: Size,
}

impl LocationGrid {
    pub const fn new(location: Location, size: Size) -> Self {
        Self { location, size }
    }

    pub fn top_left(&self) -> Location {
        self.location
    }

    pub fn top_right(&self) -> Location {
        self.location.translated(self.size.width - 1, 0)
    }

    pub fn bottom_right(&self) -> Location {
        self.location
            .translated(self.size.width - 1, self.size.height - 1)
    }

    pub fn bottom_left(&self) -> Location {
        self.location.translated(0, self.size.height - 1)
    }

    pub fn corner(&self, corner: Corner) -> Location {
        match corner {
            Corner::TopLeft => self.top_left(),
            Corner::TopRight => self.top_right(),
            Corner::BottomRight => self.bottom_right(),
            Corner::BottomLeft => self.bottom_left(),
        }
    }

    /// Check if `location` is the given corner, or any corner for `None`
    pub fn is_corner(&self, location: Location, corner: Option<Corner>) -> bool {
        match corner {
            Some(c) => location == self.corner(c),
            None => Corner::ALL.iter().any(|&c| location == self.corner(c)),
        }
    }

    /// Middle cell of the edge in `direction`; even edges round towards top/left
    pub fn middle(&self, direction: Direction) -> Location {
        let mid_x = (self.size.width - 1) / 2;
        let mid_y = (self.size.height - 1) / 2;
        match direction {
            Direction::North => self.location.translated(mid_x, 0),
            Direction::East => self.location.translated(self.size.width - 1, mid_y),
            Direction::South => self.location.translated(mid_x, self.size.height - 1),
            Direction::West => self.location.translated(0, mid_y),
        }
    }

    /// Check if `location` is the given edge middle, or any edge middle for `None`
    pub fn is_middle(&self, location: Location, direction: Option<Direction>) -> bool {
        match direction {
            Some(d) => location == self.middle(d),
            None => Direction::ALL.iter().any(|&d| location == self.middle(d)),
        }
    }

    pub fn contains(&self, location: Location) -> bool {
        let dx = location.x - self.location.x;
        let dy = location.y - self.location.y;
        (0..self.size.width).contains(&dx) && (0..self.size.height).contains(&dy)
    }

    /// Check if `other` lies completely inside this grid
    pub fn contains_grid(&self, other: &LocationGrid) -> bool {
        self.contains(other.top_left()) && self.contains(other.bottom_right())
    }

    /// All locations, row-major
    pub fn all_locations(&self) -> Vec<Location> {
        let mut result = Vec::with_capacity(self.size.area().max(0) as usize);
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                result.push(self.location.translated(x, y));
            }
        }
        result
    }

    /// Check if `location` is inside the frame described by `insets`
    pub fn is_frame(&self, location: Location, insets: &Insets) -> bool {
        if !self.contains(location) {
            return false;
        }
        let local = location - self.location;
        local.x < insets.west
            || local.y < insets.north
            || local.x >= self.size.width - insets.east
            || local.y >= self.size.height - insets.south
    }

    pub fn all_frame_locations(&self, insets: &Insets) -> Vec<Location> {
        self.all_locations()
            .into_iter()
            .filter(|&l| self.is_frame(l, insets))
            .collect()
    }

    /// Top-left location of an area of `size` at the given placement
    ///
    /// Random placements draw a location that keeps the area inside this grid.
    pub fn location_for_placement_and_size(
        &self,
        placement: Placement,
        size: Size,
        rng: &mut MazeRng,
    ) -> Location {
        let local = if placement.is_random() {
            Location::new(
                rng.up_to(self.size.width - size.width),
                rng.up_to(self.size.height - size.height),
            )
        } else {
            let (nx, ny) = placement.direction_normals();
            // (n + 1) / 2 maps the normals -1, 0, 1 to 0, 1/2, 1.
            let x = (self.size.width - 1) * (nx + 1) / 2;
            let y = (self.size.height - 1) * (ny + 1) / 2;
            Location::new(x, y) + placement.size_offset(size)
        };
        local + self.location
    }
}
