//! The room grid: a dense store of rooms and connections
//!
//! Rooms and connections are addressed by index. Merged and removed entries
//! stay in the store flagged as removed, so ids are stable for a whole
//! generation run. A location index maps every grid location to the room
//! covering it.

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::error::GeneratorError;
use crate::geometry::{Closing, Direction, Location, LocationGrid, Size, Wall};
use crate::rng::MazeRng;

use super::connection::{ConnectionId, ConnectionSide, RoomConnection};
use super::modifier::{Area, Modifier, ModifierKind};
use super::room::{Room, RoomId, RoomType};

/// Retries for modifiers and path ends with a random placement
pub(crate) const MAX_RANDOM_TRIES: usize = 100;

#[derive(Debug, Clone)]
pub struct RoomGrid {
    bounds: LocationGrid,
    rooms: Vec<Room>,
    connections: Vec<RoomConnection>,
    index: Vec<Option<RoomId>>,
}

impl RoomGrid {
    /// Create an empty grid of `size` rooms
    pub fn new(size: Size) -> Self {
        let cells = size.area().max(0) as usize;
        Self {
            bounds: LocationGrid::new(Location::new(0, 0), size),
            rooms: Vec::with_capacity(cells),
            connections: Vec::with_capacity(cells * 2),
            index: vec![None; cells],
        }
    }

    pub fn size(&self) -> Size {
        self.bounds.size
    }

    pub fn bounds(&self) -> &LocationGrid {
        &self.bounds
    }

    fn index_of(&self, location: Location) -> Option<usize> {
        if !self.bounds.contains(location) {
            return None;
        }
        Some((location.y * self.bounds.size.width + location.x) as usize)
    }

    pub fn room_id_at(&self, location: Location) -> Option<RoomId> {
        self.index_of(location).and_then(|i| self.index[i])
    }

    pub fn room_at(&self, location: Location) -> Option<&Room> {
        self.room_id_at(location).map(|id| self.room(id))
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub(crate) fn room_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id.0]
    }

    pub fn connection(&self, id: ConnectionId) -> &RoomConnection {
        &self.connections[id.0]
    }

    pub(crate) fn connection_mut(&mut self, id: ConnectionId) -> &mut RoomConnection {
        &mut self.connections[id.0]
    }

    /// Live rooms in id order
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| !room.removed)
            .map(|(i, room)| (RoomId(i), room))
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms().map(|(id, _)| id).collect()
    }

    pub fn room_count(&self) -> usize {
        self.rooms().count()
    }

    /// Live connections in id order
    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &RoomConnection)> {
        self.connections
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.removed)
            .map(|(i, c)| (ConnectionId(i), c))
    }

    pub fn connection_count(&self) -> usize {
        self.connections().count()
    }

    /// Create one 1x1 path room per location, row-major
    pub fn fill_with_rooms(&mut self) {
        self.rooms.clear();
        self.connections.clear();
        for location in self.bounds.all_locations() {
            let id = RoomId(self.rooms.len());
            self.rooms.push(Room::new(location));
            if let Some(i) = self.index_of(location) {
                self.index[i] = Some(id);
            }
        }
        trace!("filled grid {} with {} rooms", self.size(), self.rooms.len());
    }

    /// Connect every pair of adjacent rooms exactly once
    pub fn connect_all_rooms(&mut self) -> Result<(), GeneratorError> {
        for location in self.bounds.all_locations() {
            let Some(room) = self.room_id_at(location) else {
                continue;
            };
            for direction in [Direction::East, Direction::South] {
                let Some(target) = self.room_id_at(location.advance(direction)) else {
                    continue;
                };
                if target != room {
                    self.add_connection(room, Wall::new(location, direction), target)?;
                }
            }
        }
        debug!(
            "connected {} rooms with {} connections",
            self.room_count(),
            self.connection_count()
        );
        Ok(())
    }

    fn add_connection(
        &mut self,
        room: RoomId,
        wall: Wall,
        target: RoomId,
    ) -> Result<ConnectionId, GeneratorError> {
        let remote_wall = wall.opposite();
        if self.connection_at(room, &wall).is_some() {
            return Err(GeneratorError::Topology(format!(
                "duplicate connection at wall {wall}"
            )));
        }
        if self.connection_at(target, &remote_wall).is_some() {
            return Err(GeneratorError::Topology(format!(
                "duplicate connection at wall {remote_wall}"
            )));
        }
        let id = ConnectionId(self.connections.len());
        self.connections.push(RoomConnection::new(
            ConnectionSide { room, wall },
            ConnectionSide {
                room: target,
                wall: remote_wall,
            },
        ));
        self.rooms[room.0].connections.push(id);
        self.rooms[target.0].connections.push(id);
        Ok(id)
    }

    /// The connection of `room` anchored in `wall`
    pub fn connection_at(&self, room: RoomId, wall: &Wall) -> Option<ConnectionId> {
        self.room(room)
            .connections
            .iter()
            .copied()
            .find(|&id| self.connection(id).local(room).wall == *wall)
    }

    /// The connection anchored in `wall`, looked up through the room covering it
    pub fn connection_for_wall(&self, wall: &Wall) -> Option<ConnectionId> {
        let room = self.room_id_at(wall.location)?;
        self.connection_at(room, wall)
    }

    /// Check if a wall can be passed: it lies inside a merged room, or it
    /// holds a connection that is not closed
    pub fn is_wall_open(&self, wall: &Wall) -> bool {
        let Some(room) = self.room_at(wall.location) else {
            return false;
        };
        if room.grid.contains(wall.location.advance(wall.direction)) {
            return true;
        }
        self.connection_for_wall(wall)
            .is_some_and(|id| !self.connection(id).is_closed)
    }

    /// Detach a connection from both rooms and drop it
    pub(crate) fn remove_connection(&mut self, id: ConnectionId) {
        let (a, b) = {
            let connection = &self.connections[id.0];
            (connection.a.room, connection.b.room)
        };
        self.rooms[a.0].connections.retain(|&c| c != id);
        self.rooms[b.0].connections.retain(|&c| c != id);
        self.connections[id.0].removed = true;
    }

    /// Apply a single modifier
    pub fn apply_modifier(
        &mut self,
        modifier: &Modifier,
        rng: &mut MazeRng,
    ) -> Result<(), GeneratorError> {
        debug!("applying modifier {modifier}");
        match &modifier.kind {
            ModifierKind::Frame(insets) => {
                let locations = self.bounds.all_frame_locations(insets);
                self.set_blank(&locations);
                Ok(())
            }
            ModifierKind::Blank(area) => {
                let grid = self.resolve_inside(modifier, area, rng)?;
                self.set_blank(&grid.all_locations());
                Ok(())
            }
            ModifierKind::Merge(area) => self.apply_merge(modifier, area, rng),
            ModifierKind::Closing(closing, area) => {
                let grid = self.resolve_inside(modifier, area, rng)?;
                self.apply_closing(closing, &grid);
                Ok(())
            }
        }
    }

    fn resolve_inside(
        &self,
        modifier: &Modifier,
        area: &Area,
        rng: &mut MazeRng,
    ) -> Result<LocationGrid, GeneratorError> {
        match area.resolve(&self.bounds, rng) {
            Some(grid) if self.bounds.contains_grid(&grid) => Ok(grid),
            grid => Err(GeneratorError::modifier(
                modifier,
                self.outside_message(area, grid.as_ref()),
            )),
        }
    }

    fn outside_message(&self, area: &Area, grid: Option<&LocationGrid>) -> String {
        match grid {
            Some(grid) => format!(
                "area of {} at {} is outside the maze of {}",
                grid.size,
                grid.location,
                self.size()
            ),
            None => format!("area '{area}' is outside the maze of {}", self.size()),
        }
    }

    fn set_blank(&mut self, locations: &[Location]) {
        for &location in locations {
            if let Some(id) = self.room_id_at(location) {
                self.rooms[id.0].room_type = RoomType::Blank;
            }
        }
    }

    fn apply_merge(
        &mut self,
        modifier: &Modifier,
        area: &Area,
        rng: &mut MazeRng,
    ) -> Result<(), GeneratorError> {
        if area.size.width < 2 || area.size.height < 2 {
            return Err(GeneratorError::modifier(
                modifier,
                format!("a merge needs at least 2x2 rooms, got {}", area.size),
            ));
        }
        let tries = if area.placement.is_random() {
            MAX_RANDOM_TRIES
        } else {
            1
        };
        let mut failure = String::new();
        for _ in 0..tries {
            let Some(grid) = area.resolve(&self.bounds, rng) else {
                failure = self.outside_message(area, None);
                continue;
            };
            match self.check_merge_area(&grid) {
                Ok(()) => {
                    let anchor = self.merge_area(&grid);
                    trace!("merged {} at {} into room {:?}", grid.size, grid.location, anchor);
                    return Ok(());
                }
                Err(message) => failure = message,
            }
        }
        Err(GeneratorError::modifier(modifier, failure))
    }

    fn check_merge_area(&self, grid: &LocationGrid) -> Result<(), String> {
        if !self.bounds.contains_grid(grid) {
            return Err(format!(
                "area of {} at {} is outside the maze of {}",
                grid.size,
                grid.location,
                self.size()
            ));
        }
        let mut all_blank = true;
        for location in grid.all_locations() {
            let Some(room) = self.room_at(location) else {
                return Err(format!("there is no room at {location}"));
            };
            if !room.size().is_one() {
                return Err(format!("the room at {location} is already merged"));
            }
            if room.room_type != RoomType::Blank {
                all_blank = false;
            }
        }
        if all_blank {
            return Err(format!(
                "all rooms of {} at {} are blank",
                grid.size, grid.location
            ));
        }
        Ok(())
    }

    /// Merge all rooms covering `grid` into its top-left room
    ///
    /// Connections inside the group are dropped, boundary connections are
    /// re-pointed to the merged room. The area must have been checked.
    fn merge_area(&mut self, grid: &LocationGrid) -> RoomId {
        let mut group: Vec<RoomId> = Vec::new();
        for location in grid.all_locations() {
            if let Some(id) = self.room_id_at(location) {
                if !group.contains(&id) {
                    group.push(id);
                }
            }
        }
        let anchor = group[0];
        let members: BTreeSet<RoomId> = group.iter().copied().collect();

        let mut room_type = self.rooms[anchor.0].room_type;
        let mut path_id = self.rooms[anchor.0].path_id;
        for &id in &group[1..] {
            let room = &self.rooms[id.0];
            room_type = room_type.max(room.room_type);
            if path_id == 0 && room.path_id > 0 {
                path_id = room.path_id;
            }
        }

        let mut seen = BTreeSet::new();
        let mut kept = Vec::new();
        for &id in &group {
            let connections = std::mem::take(&mut self.rooms[id.0].connections);
            for cid in connections {
                if !seen.insert(cid) {
                    continue;
                }
                let connection = &mut self.connections[cid.0];
                if members.contains(&connection.a.room) && members.contains(&connection.b.room) {
                    connection.removed = true;
                    continue;
                }
                connection.replace_room(id, anchor);
                kept.push(cid);
            }
        }

        for &id in &group[1..] {
            self.rooms[id.0].removed = true;
        }
        for location in grid.all_locations() {
            if let Some(i) = self.index_of(location) {
                self.index[i] = Some(anchor);
            }
        }

        let room = &mut self.rooms[anchor.0];
        room.grid = *grid;
        room.room_type = room_type;
        room.path_id = path_id;
        room.connections = kept;
        anchor
    }

    fn apply_closing(&mut self, closing: &Closing, grid: &LocationGrid) {
        let mut targets: Vec<RoomId> = Vec::new();
        for location in grid.all_locations() {
            if let Some(id) = self.room_id_at(location) {
                if !targets.contains(&id) {
                    targets.push(id);
                }
            }
        }
        let mut removed = 0;
        for room in targets {
            let extent = self.rooms[room.0].grid;
            for wall in self.rooms[room.0].walls() {
                if !closing.selects(&wall, &extent) {
                    continue;
                }
                if let Some(id) = self.connection_at(room, &wall) {
                    self.remove_connection(id);
                    removed += 1;
                }
            }
        }
        trace!("closing {closing} removed {removed} connections");
    }

    /// Check if every connection of `room` leads to a blank room
    ///
    /// True for a room without connections.
    pub fn is_surrounded_by_blanks(&self, room: RoomId) -> bool {
        self.room(room).connections.iter().all(|&id| {
            let remote = self.connection(id).remote_room(room);
            self.room(remote).room_type == RoomType::Blank
        })
    }

    /// Drop all blank rooms together with their connections
    pub fn remove_blank_rooms(&mut self) {
        let blanks: Vec<RoomId> = self
            .rooms()
            .filter(|(_, room)| room.room_type == RoomType::Blank)
            .map(|(id, _)| id)
            .collect();
        for &id in &blanks {
            let connections = self.rooms[id.0].connections.clone();
            for cid in connections {
                self.remove_connection(cid);
            }
            let extent = self.rooms[id.0].grid;
            for location in extent.all_locations() {
                if let Some(i) = self.index_of(location) {
                    self.index[i] = None;
                }
            }
            self.rooms[id.0].removed = true;
        }
        debug!("removed {} blank rooms", blanks.len());
    }

    /// Check that every location is covered by at most one live room and
    /// that the location index agrees with the room extents
    pub fn verify_unique_rooms(&self) -> Result<(), GeneratorError> {
        let mut covered = 0usize;
        for (id, room) in self.rooms() {
            for location in room.grid.all_locations() {
                if self.room_id_at(location) != Some(id) {
                    return Err(GeneratorError::Topology(format!(
                        "room {} of {} does not own location {location}",
                        room.location(),
                        room.size()
                    )));
                }
                covered += 1;
            }
        }
        let indexed = self.index.iter().filter(|e| e.is_some()).count();
        if covered != indexed {
            return Err(GeneratorError::Topology(format!(
                "{covered} locations covered by rooms but {indexed} indexed"
            )));
        }
        Ok(())
    }

    /// Clear carving state on all rooms and connections
    pub fn reset_rooms_and_connections(&mut self) {
        for room in self.rooms.iter_mut().filter(|r| !r.removed) {
            room.reset();
        }
        for connection in self.connections.iter_mut().filter(|c| !c.removed) {
            connection.reset();
        }
    }

    /// Mark unused connections of `room` that lead into used rooms as used
    /// and closed
    pub(crate) fn close_blocked_connections(&mut self, room: RoomId) {
        let connections = self.rooms[room.0].connections.clone();
        for cid in connections {
            let connection = &self.connections[cid.0];
            if connection.is_used {
                continue;
            }
            let remote = connection.remote_room(room);
            if self.rooms[remote.0].is_used() {
                let connection = &mut self.connections[cid.0];
                connection.is_used = true;
                connection.is_closed = true;
            }
        }
    }

    /// Unused connections of `room`, in list order
    pub(crate) fn unused_connections(&self, room: RoomId) -> Vec<ConnectionId> {
        self.room(room)
            .connections
            .iter()
            .copied()
            .filter(|&id| !self.connection(id).is_used)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ClosingType, Insets, Offset, Placement};

    fn prepared(width: i32, height: i32) -> RoomGrid {
        let mut grid = RoomGrid::new(Size::new(width, height));
        grid.fill_with_rooms();
        grid.connect_all_rooms().unwrap();
        grid
    }

    #[test]
    fn test_fill_and_connect() {
        let grid = prepared(4, 3);
        assert_eq!(grid.room_count(), 12);
        // Horizontal: 3 per row * 3 rows, vertical: 4 per column gap * 2.
        assert_eq!(grid.connection_count(), 9 + 8);
        let corner = grid.room_id_at(Location::new(0, 0)).unwrap();
        assert_eq!(grid.room(corner).connections().len(), 2);
        let inner = grid.room_id_at(Location::new(1, 1)).unwrap();
        assert_eq!(grid.room(inner).connections().len(), 4);
    }

    #[test]
    fn test_no_duplicate_walls() {
        let grid = prepared(6, 5);
        for (id, room) in grid.rooms() {
            let mut walls = BTreeSet::new();
            for &cid in room.connections() {
                assert!(walls.insert(grid.connection(cid).local(id).wall));
            }
        }
        grid.verify_unique_rooms().unwrap();
    }

    #[test]
    fn test_connect_twice_is_a_topology_error() {
        let mut grid = prepared(3, 3);
        let err = grid.connect_all_rooms().unwrap_err();
        assert!(matches!(err, GeneratorError::Topology(_)));
    }

    #[test]
    fn test_connection_for_wall() {
        let grid = prepared(3, 3);
        let wall = Wall::new(Location::new(1, 1), Direction::North);
        let id = grid.connection_for_wall(&wall).unwrap();
        let from_above = grid.connection_for_wall(&wall.opposite()).unwrap();
        assert_eq!(id, from_above);
        assert!(grid.is_wall_open(&wall));
        let outer = Wall::new(Location::new(0, 0), Direction::West);
        assert!(grid.connection_for_wall(&outer).is_none());
        assert!(!grid.is_wall_open(&outer));
    }

    #[test]
    fn test_merge_keeps_boundary_connections() {
        let mut grid = prepared(5, 5);
        let mut rng = MazeRng::new(3);
        let modifier = Modifier::merge(Area::new(Placement::Center, Size::new(3, 3)));
        grid.apply_modifier(&modifier, &mut rng).unwrap();

        let anchor = grid.room_id_at(Location::new(1, 1)).unwrap();
        assert_eq!(grid.room_id_at(Location::new(3, 3)), Some(anchor));
        let room = grid.room(anchor);
        assert_eq!(room.size(), Size::new(3, 3));
        // Perimeter walls with a neighbour on the other side.
        assert_eq!(room.connections().len(), 12);
        assert_eq!(grid.room_count(), 25 - 8);
        for &cid in room.connections() {
            let c = grid.connection(cid);
            assert_ne!(c.a.room, c.b.room);
            assert!(c.touches(anchor));
        }
        grid.verify_unique_rooms().unwrap();

        // Inside a merged room every wall is open.
        assert!(grid.is_wall_open(&Wall::new(Location::new(2, 2), Direction::East)));
    }

    #[test]
    fn test_merge_rejects_small_areas() {
        let mut grid = prepared(5, 5);
        let mut rng = MazeRng::new(3);
        let modifier = Modifier::merge(Area::new(Placement::Center, Size::new(1, 3)));
        let err = grid.apply_modifier(&modifier, &mut rng).unwrap_err();
        assert!(matches!(err, GeneratorError::Modifier { .. }));
    }

    #[test]
    fn test_merge_rejects_overlap_and_outside() {
        let mut grid = prepared(6, 6);
        let mut rng = MazeRng::new(3);
        let first = Modifier::merge(Area::new(Placement::TopLeft, Size::new(2, 2)));
        grid.apply_modifier(&first, &mut rng).unwrap();
        let overlapping = Modifier::merge(
            Area::new(Placement::TopLeft, Size::new(2, 2)).with_offset(Offset::absolute(1, 1)),
        );
        assert!(grid.apply_modifier(&overlapping, &mut rng).is_err());

        let outside = Modifier::merge(
            Area::new(Placement::BottomRight, Size::new(2, 2)).with_offset(Offset::absolute(1, 0)),
        );
        let err = grid.apply_modifier(&outside, &mut rng).unwrap_err();
        assert!(err.to_string().contains("outside"), "{err}");
    }

    #[test]
    fn test_merge_of_blank_area_fails() {
        let mut grid = prepared(6, 6);
        let mut rng = MazeRng::new(3);
        grid.apply_modifier(&Modifier::frame(Insets::uniform(2)), &mut rng)
            .unwrap();
        let modifier = Modifier::merge(Area::new(Placement::TopLeft, Size::new(2, 2)));
        let err = grid.apply_modifier(&modifier, &mut rng).unwrap_err();
        match err {
            GeneratorError::Modifier { modifier: m, .. } => {
                assert_eq!(m.name, "merge top_left/2x2");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_merge_takes_highest_type() {
        let mut grid = prepared(4, 4);
        let mut rng = MazeRng::new(3);
        let blank = Modifier::blank(Area::new(Placement::TopLeft, Size::ONE));
        grid.apply_modifier(&blank, &mut rng).unwrap();
        let merge = Modifier::merge(Area::new(Placement::TopLeft, Size::new(2, 2)));
        grid.apply_modifier(&merge, &mut rng).unwrap();
        let room = grid.room_at(Location::new(0, 0)).unwrap();
        assert_eq!(room.room_type, RoomType::Path);
    }

    #[test]
    fn test_random_merge_retries() {
        let mut grid = prepared(8, 8);
        let mut rng = MazeRng::new(11);
        for _ in 0..4 {
            let merge = Modifier::merge(Area::new(Placement::Random, Size::new(2, 2)));
            grid.apply_modifier(&merge, &mut rng).unwrap();
        }
        assert_eq!(grid.room_count(), 64 - 4 * 3);
        grid.verify_unique_rooms().unwrap();
    }

    #[test]
    fn test_random_merge_gives_up_on_merged_grid() {
        let mut grid = prepared(6, 6);
        let mut rng = MazeRng::new(11);
        for corner in [
            Placement::TopLeft,
            Placement::TopRight,
            Placement::BottomRight,
            Placement::BottomLeft,
        ] {
            let merge = Modifier::merge(Area::new(corner, Size::new(3, 3)));
            grid.apply_modifier(&merge, &mut rng).unwrap();
        }
        assert_eq!(grid.room_count(), 4);

        let random = Modifier::merge(Area::new(Placement::Random, Size::new(2, 2)));
        match grid.apply_modifier(&random, &mut rng).unwrap_err() {
            GeneratorError::Modifier { modifier, message } => {
                assert_eq!(*modifier, random);
                assert!(message.contains("already merged"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(grid.room_count(), 4);
    }

    #[test]
    fn test_random_merge_gives_up_on_blank_grid() {
        let mut grid = prepared(6, 6);
        let mut rng = MazeRng::new(11);
        grid.apply_modifier(&Modifier::frame(Insets::uniform(3)), &mut rng)
            .unwrap();
        let random = Modifier::merge(Area::new(Placement::Random, Size::new(2, 2)));
        match grid.apply_modifier(&random, &mut rng).unwrap_err() {
            GeneratorError::Modifier { message, .. } => {
                assert!(message.contains("are blank"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_offset_beyond_coordinate_range_is_outside() {
        let mut grid = prepared(6, 6);
        let mut rng = MazeRng::new(3);
        let area = Area::new(Placement::TopLeft, Size::new(2, 2))
            .with_offset(Offset::absolute(i32::MAX - 1, 0));
        for modifier in [
            Modifier::merge(area),
            Modifier::blank(area),
            Modifier::closing(Closing::new(ClosingType::CornerPaths, false), area),
        ] {
            match grid.apply_modifier(&modifier, &mut rng).unwrap_err() {
                GeneratorError::Modifier { message, .. } => {
                    assert!(message.contains("outside the maze"), "{message}");
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
        assert_eq!(grid.room_count(), 36);
    }

    #[test]
    fn test_frame_and_blank_removal() {
        let mut grid = prepared(5, 5);
        let mut rng = MazeRng::new(3);
        grid.apply_modifier(&Modifier::frame(Insets::uniform(1)), &mut rng)
            .unwrap();
        let corner = grid.room_id_at(Location::new(0, 0)).unwrap();
        assert_eq!(grid.room(corner).room_type, RoomType::Blank);
        let next_to_frame = grid.room_id_at(Location::new(1, 1)).unwrap();
        assert!(!grid.is_surrounded_by_blanks(next_to_frame));

        grid.remove_blank_rooms();
        assert_eq!(grid.room_count(), 9);
        assert!(grid.room_at(Location::new(0, 0)).is_none());
        assert_eq!(grid.room(next_to_frame).connections().len(), 2);
        grid.verify_unique_rooms().unwrap();
    }

    #[test]
    fn test_surrounded_by_blanks() {
        let mut grid = prepared(3, 3);
        let mut rng = MazeRng::new(3);
        grid.apply_modifier(&Modifier::frame(Insets::uniform(1)), &mut rng)
            .unwrap();
        let center = grid.room_id_at(Location::new(1, 1)).unwrap();
        assert!(grid.is_surrounded_by_blanks(center));
    }

    #[test]
    fn test_closing_removes_selected_walls() {
        let mut grid = prepared(3, 3);
        let mut rng = MazeRng::new(3);
        let closing = Modifier::closing(
            Closing::new(ClosingType::DirectionNorth, false),
            Area::new(Placement::Center, Size::ONE),
        );
        grid.apply_modifier(&closing, &mut rng).unwrap();
        let center = grid.room_id_at(Location::new(1, 1)).unwrap();
        assert_eq!(grid.room(center).connections().len(), 3);
        let above = grid.room_id_at(Location::new(1, 0)).unwrap();
        assert_eq!(grid.room(above).connections().len(), 2);
    }

    #[test]
    fn test_inverted_closing_keeps_only_pattern() {
        let mut grid = prepared(3, 3);
        let mut rng = MazeRng::new(3);
        let closing = Modifier::closing(
            Closing::new(ClosingType::DirectionWest, true),
            Area::new(Placement::Center, Size::ONE),
        );
        grid.apply_modifier(&closing, &mut rng).unwrap();
        let center = grid.room_id_at(Location::new(1, 1)).unwrap();
        let connections = grid.room(center).connections();
        assert_eq!(connections.len(), 1);
        let wall = grid.connection(connections[0]).local(center).wall;
        assert_eq!(wall.direction, Direction::West);
    }

    #[test]
    fn test_closing_outside_fails() {
        let mut grid = prepared(3, 3);
        let mut rng = MazeRng::new(3);
        let closing = Modifier::closing(
            Closing::new(ClosingType::CornerPaths, false),
            Area::new(Placement::Left, Size::ONE).with_offset(Offset::absolute(-1, 0)),
        );
        assert!(grid.apply_modifier(&closing, &mut rng).is_err());
    }

    #[test]
    fn test_blocked_connections_and_reset() {
        let mut grid = prepared(2, 1);
        let left = grid.room_id_at(Location::new(0, 0)).unwrap();
        let right = grid.room_id_at(Location::new(1, 0)).unwrap();
        grid.room_mut(right).path_id = 2;
        assert_eq!(grid.unused_connections(left).len(), 1);
        grid.close_blocked_connections(left);
        assert!(grid.unused_connections(left).is_empty());
        let cid = grid.room(left).connections()[0];
        assert!(grid.connection(cid).is_closed);

        grid.reset_rooms_and_connections();
        assert!(!grid.room(right).is_used());
        assert!(!grid.connection(cid).is_used);
        assert!(!grid.connection(cid).is_closed);
    }
}
