//! Connections between rooms
//!
//! A connection is created once per adjacent cell pair. Merging re-points an
//! existing connection to the merged room; it is never duplicated.

use serde::{Deserialize, Serialize};

use crate::geometry::Wall;

use super::room::RoomId;

/// Index of a connection in the connection store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub usize);

/// One end of a connection: the room and the wall it is anchored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionSide {
    pub room: RoomId,
    pub wall: Wall,
}

/// An undirected passage between two rooms
#[derive(Debug, Clone, Serialize)]
pub struct RoomConnection {
    pub a: ConnectionSide,
    pub b: ConnectionSide,
    /// Claimed by a carving stack
    pub is_used: bool,
    /// Not traversable
    pub is_closed: bool,
    #[serde(skip)]
    pub(crate) removed: bool,
}

impl RoomConnection {
    pub fn new(a: ConnectionSide, b: ConnectionSide) -> Self {
        Self {
            a,
            b,
            is_used: false,
            is_closed: false,
            removed: false,
        }
    }

    /// The side anchored in `room`
    pub fn local(&self, room: RoomId) -> &ConnectionSide {
        if self.a.room == room { &self.a } else { &self.b }
    }

    /// The side opposite to `room`
    pub fn remote(&self, room: RoomId) -> &ConnectionSide {
        if self.a.room == room { &self.b } else { &self.a }
    }

    pub fn remote_room(&self, room: RoomId) -> RoomId {
        self.remote(room).room
    }

    pub fn touches(&self, room: RoomId) -> bool {
        self.a.room == room || self.b.room == room
    }

    /// Re-point every side anchored in `old` to `new`
    pub(crate) fn replace_room(&mut self, old: RoomId, new: RoomId) {
        if self.a.room == old {
            self.a.room = new;
        }
        if self.b.room == old {
            self.b.room = new;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.is_used = false;
        self.is_closed = false;
    }
}
