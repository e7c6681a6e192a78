//! Rooms of the maze
//!
//! A room is a 1x1 cell, or a larger rectangle after a merge. Rooms live in
//! the dense store of the [`super::RoomGrid`] and are addressed by [`RoomId`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::geometry::{Direction, Insets, Location, LocationGrid, Size, Wall};

use super::connection::ConnectionId;

/// First path id used for decoy paths
pub const FIRST_DECOY_PATH_ID: u32 = 100;

/// Index of a room in the room store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

/// Room type
///
/// Ordered by information content: a merge keeps the highest type in the group.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum RoomType {
    /// Not part of the maze; removed before carving
    Blank,
    /// Regular room on a path
    #[default]
    Path,
    /// Start room of a path end
    End,
}

/// A room in the maze
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub(crate) grid: LocationGrid,
    pub room_type: RoomType,
    pub(crate) connections: Vec<ConnectionId>,
    /// 0 = unused, 1..=99 primary paths, 100 and above decoy paths
    pub path_id: u32,
    /// Depth reached along the carving path
    pub path_length: u32,
    #[serde(skip)]
    pub(crate) removed: bool,
}

impl Room {
    /// Create an unused, unconnected 1x1 path room
    pub fn new(location: Location) -> Self {
        Self {
            grid: LocationGrid::new(location, Size::ONE),
            room_type: RoomType::Path,
            connections: Vec::new(),
            path_id: 0,
            path_length: 0,
            removed: false,
        }
    }

    pub fn grid(&self) -> &LocationGrid {
        &self.grid
    }

    /// Top-left location
    pub fn location(&self) -> Location {
        self.grid.location
    }

    pub fn size(&self) -> Size {
        self.grid.size
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub fn is_used(&self) -> bool {
        self.path_id != 0
    }

    pub fn is_primary_path(&self) -> bool {
        self.path_id > 0 && self.path_id < FIRST_DECOY_PATH_ID
    }

    /// All walls on the outline of this room
    pub fn walls(&self) -> Vec<Wall> {
        let mut result = Vec::new();
        for location in self.grid.all_frame_locations(&Insets::uniform(1)) {
            for direction in Direction::ALL {
                if !self.grid.contains(location.advance(direction)) {
                    result.push(Wall::new(location, direction));
                }
            }
        }
        result
    }

    /// Clear the carving state for another attempt
    pub(crate) fn reset(&mut self) {
        self.path_id = 0;
        self.path_length = 0;
    }
}
