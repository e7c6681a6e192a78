//! Read-only access to a generated maze for renderers

use crate::error::ErrorMark;
use crate::geometry::{Location, Size, Wall};
use crate::grid::{ConnectionId, Room, RoomConnection, RoomGrid, RoomId};

/// A borrowed, read-only view of the room graph
#[derive(Debug, Clone, Copy)]
pub struct MazeView<'a> {
    grid: &'a RoomGrid,
    path_end_rooms: &'a [RoomId],
    error_marks: &'a [ErrorMark],
}

impl<'a> MazeView<'a> {
    pub fn new(grid: &'a RoomGrid, path_end_rooms: &'a [RoomId], error_marks: &'a [ErrorMark]) -> Self {
        Self {
            grid,
            path_end_rooms,
            error_marks,
        }
    }

    /// Grid size in rooms
    pub fn size(&self) -> Size {
        self.grid.size()
    }

    /// All rooms in id order, which is row-major by top-left location
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &'a Room)> + 'a {
        self.grid.rooms()
    }

    pub fn room(&self, id: RoomId) -> &'a Room {
        self.grid.room(id)
    }

    pub fn room_at(&self, location: Location) -> Option<&'a Room> {
        self.grid.room_at(location)
    }

    pub fn room_id_at(&self, location: Location) -> Option<RoomId> {
        self.grid.room_id_at(location)
    }

    pub fn connection(&self, id: ConnectionId) -> &'a RoomConnection {
        self.grid.connection(id)
    }

    /// The connection anchored in `wall`, if any
    pub fn connection_at(&self, wall: &Wall) -> Option<&'a RoomConnection> {
        self.grid
            .connection_for_wall(wall)
            .map(|id| self.grid.connection(id))
    }

    pub fn is_wall_open(&self, wall: &Wall) -> bool {
        self.grid.is_wall_open(wall)
    }

    /// Connections that are passable, in id order
    pub fn open_connections(&self) -> impl Iterator<Item = (ConnectionId, &'a RoomConnection)> + 'a {
        self.grid.connections().filter(|(_, c)| !c.is_closed)
    }

    /// Start rooms in path id order; index 0 is path 1
    pub fn path_end_rooms(&self) -> &'a [RoomId] {
        self.path_end_rooms
    }

    /// Path number (1-based) of the path end starting in `room`
    pub fn path_end_number(&self, room: RoomId) -> Option<usize> {
        self.path_end_rooms
            .iter()
            .position(|&r| r == room)
            .map(|index| index + 1)
    }

    pub fn error_marks(&self) -> &'a [ErrorMark] {
        self.error_marks
    }
}
