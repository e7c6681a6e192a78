//! Randomized depth-first carving with backtracking
//!
//! Each path grows from its own stack. All stacks are advanced one step at a
//! time in round-robin so that the paths intertwine.

use crate::grid::{RoomGrid, RoomId};
use crate::rng::MazeRng;

/// The current path from a start room to the carving frontier
#[derive(Debug, Clone)]
pub struct CarvingStack {
    path_id: u32,
    rooms: Vec<RoomId>,
}

impl CarvingStack {
    /// Claim `room` for `path_id` and start a stack on it
    pub fn start(grid: &mut RoomGrid, room: RoomId, path_id: u32) -> Self {
        let start = grid.room_mut(room);
        start.path_id = path_id;
        start.path_length = 1;
        Self {
            path_id,
            rooms: vec![room],
        }
    }

    pub fn path_id(&self) -> u32 {
        self.path_id
    }

    pub fn depth(&self) -> usize {
        self.rooms.len()
    }

    /// The stack can still backtrack, or its start room has unused connections
    pub fn has_moves_left(&self, grid: &RoomGrid) -> bool {
        if self.rooms.len() > 1 {
            return true;
        }
        self.rooms
            .first()
            .is_some_and(|&room| !grid.unused_connections(room).is_empty())
    }

    /// Advance the frontier by one room, or backtrack one room
    pub fn one_step(&mut self, grid: &mut RoomGrid, rng: &mut MazeRng) {
        let Some(&current) = self.rooms.last() else {
            return;
        };
        grid.close_blocked_connections(current);
        let unused = grid.unused_connections(current);
        if let Some(&id) = rng.choose(&unused) {
            let connection = grid.connection_mut(id);
            connection.is_used = true;
            let next = connection.remote_room(current);
            self.rooms.push(next);
            let room = grid.room_mut(next);
            room.path_id = self.path_id;
            room.path_length = self.rooms.len() as u32;
        } else if self.rooms.len() > 1 {
            self.rooms.pop();
        }
    }

    /// Run a single stack until it is exhausted
    pub fn run(&mut self, grid: &mut RoomGrid, rng: &mut MazeRng) {
        while self.has_moves_left(grid) {
            self.one_step(grid, rng);
        }
    }
}

/// Advance all stacks in lock-step until none has moves left
///
/// Returns the number of rounds.
pub(crate) fn carve_all(stacks: &mut [CarvingStack], grid: &mut RoomGrid, rng: &mut MazeRng) -> usize {
    let mut rounds = 0;
    while stacks.iter().any(|stack| stack.has_moves_left(grid)) {
        for stack in stacks.iter_mut() {
            stack.one_step(grid, rng);
        }
        rounds += 1;
    }
    rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Location, Size};

    fn prepared(width: i32, height: i32) -> RoomGrid {
        let mut grid = RoomGrid::new(Size::new(width, height));
        grid.fill_with_rooms();
        grid.connect_all_rooms().unwrap();
        grid
    }

    #[test]
    fn test_start_claims_room() {
        let mut grid = prepared(3, 3);
        let room = grid.room_id_at(Location::new(1, 1)).unwrap();
        let stack = CarvingStack::start(&mut grid, room, 4);
        assert_eq!(stack.path_id(), 4);
        assert_eq!(stack.depth(), 1);
        assert_eq!(grid.room(room).path_id, 4);
        assert_eq!(grid.room(room).path_length, 1);
        assert!(stack.has_moves_left(&grid));
    }

    #[test]
    fn test_single_stack_claims_every_room() {
        let mut grid = prepared(6, 5);
        let mut rng = MazeRng::new(42);
        let room = grid.room_id_at(Location::new(0, 0)).unwrap();
        let mut stack = CarvingStack::start(&mut grid, room, 1);
        stack.run(&mut grid, &mut rng);
        assert!(!stack.has_moves_left(&grid));
        assert_eq!(stack.depth(), 1);
        for (_, room) in grid.rooms() {
            assert_eq!(room.path_id, 1);
            assert!(room.path_length >= 1);
        }
        // A spanning tree over 30 rooms opens 29 connections.
        let open = grid
            .connections()
            .filter(|(_, c)| c.is_used && !c.is_closed)
            .count();
        assert_eq!(open, 29);
        assert!(grid.connections().all(|(_, c)| c.is_used));
    }

    #[test]
    fn test_lock_step_paths_share_the_grid() {
        let mut grid = prepared(8, 8);
        let mut rng = MazeRng::new(42);
        let a = grid.room_id_at(Location::new(0, 0)).unwrap();
        let b = grid.room_id_at(Location::new(7, 7)).unwrap();
        let mut stacks = vec![
            CarvingStack::start(&mut grid, a, 1),
            CarvingStack::start(&mut grid, b, 2),
        ];
        let rounds = carve_all(&mut stacks, &mut grid, &mut rng);
        assert!(rounds > 0);
        let first = grid.rooms().filter(|(_, r)| r.path_id == 1).count();
        let second = grid.rooms().filter(|(_, r)| r.path_id == 2).count();
        assert_eq!(first + second, 64);
        assert!(first > 0 && second > 0);
        // At least one boundary between the two paths was closed.
        assert!(grid.connections().any(|(_, c)| c.is_closed));
    }

    #[test]
    fn test_path_length_follows_depth() {
        let mut grid = prepared(5, 1);
        let mut rng = MazeRng::new(7);
        let room = grid.room_id_at(Location::new(0, 0)).unwrap();
        let mut stack = CarvingStack::start(&mut grid, room, 1);
        stack.run(&mut grid, &mut rng);
        for x in 0..5 {
            let room = grid.room_at(Location::new(x, 0)).unwrap();
            assert_eq!(room.path_length, x as u32 + 1);
        }
    }
}
