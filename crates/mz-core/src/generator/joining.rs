//! Joining independently carved paths
//!
//! After carving, the primary paths are separated by closed connections.
//! For every pair of path ids the closed connection with the longest total
//! path length is recorded; the join stage reopens the best of them until all
//! non-dead-end paths belong to one group.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::{Level, debug, log};

use crate::error::GeneratorError;
use crate::grid::{ConnectionId, RoomGrid};

/// An unordered pair of distinct path ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct PathPair {
    low: u32,
    high: u32,
}

impl PathPair {
    /// `None` for equal ids or the unused id 0
    pub fn new(a: u32, b: u32) -> Option<Self> {
        if a == b || a == 0 || b == 0 {
            return None;
        }
        Some(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }
}

impl fmt::Display for PathPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.low, self.high)
    }
}

/// A closed connection that could join two paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PathJoinInfo {
    pub pair: PathPair,
    /// Sum of the path lengths of both rooms
    pub total_length: u32,
    pub connection: ConnectionId,
}

/// Union-find over path ids
///
/// The parent map is ordered, so member sets and roots come out in a stable
/// order. The smaller root wins a union.
#[derive(Debug, Clone, Default)]
pub struct PathGroups {
    parent: BTreeMap<u32, u32>,
}

impl PathGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an id as its own group
    pub fn add(&mut self, id: u32) {
        self.parent.entry(id).or_insert(id);
    }

    pub fn contains(&self, id: u32) -> bool {
        self.parent.contains_key(&id)
    }

    /// Root of `id` without modifying the map; unknown ids are their own root
    pub fn root_of(&self, id: u32) -> u32 {
        let mut current = id;
        while let Some(&parent) = self.parent.get(&current) {
            if parent == current {
                break;
            }
            current = parent;
        }
        current
    }

    /// Root of `id`, compressing the path on the way
    fn find(&mut self, id: u32) -> u32 {
        self.add(id);
        let root = self.root_of(id);
        let mut current = id;
        while current != root {
            let next = self.parent.get(&current).copied().unwrap_or(root);
            self.parent.insert(current, root);
            current = next;
        }
        root
    }

    pub fn are_connected(&self, a: u32, b: u32) -> bool {
        self.root_of(a) == self.root_of(b)
    }

    pub fn union(&mut self, a: u32, b: u32) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent
                .insert(root_a.max(root_b), root_a.min(root_b));
        }
    }

    /// All ids in the group of `id`, including `id` itself
    pub fn members_of(&self, id: u32) -> BTreeSet<u32> {
        let root = self.root_of(id);
        let mut members: BTreeSet<u32> = self
            .parent
            .keys()
            .copied()
            .filter(|&other| self.root_of(other) == root)
            .collect();
        members.insert(id);
        members
    }

    pub fn roots(&self) -> BTreeSet<u32> {
        self.parent.keys().map(|&id| self.root_of(id)).collect()
    }

    /// The groups as ordered id lists, ordered by root
    pub fn groups(&self) -> Vec<Vec<u32>> {
        self.roots()
            .into_iter()
            .map(|root| self.members_of(root).into_iter().collect())
            .collect()
    }
}

/// Best join candidate per path pair
///
/// Candidates are closed connections between two different primary paths.
/// Connections are scanned in id order and a later candidate only replaces
/// an earlier one with a strictly greater total length.
pub(crate) fn best_joins(grid: &RoomGrid) -> BTreeMap<PathPair, PathJoinInfo> {
    let mut best: BTreeMap<PathPair, PathJoinInfo> = BTreeMap::new();
    for (id, connection) in grid.connections() {
        if !connection.is_closed {
            continue;
        }
        let room_a = grid.room(connection.a.room);
        let room_b = grid.room(connection.b.room);
        if !room_a.is_primary_path() || !room_b.is_primary_path() {
            continue;
        }
        let Some(pair) = PathPair::new(room_a.path_id, room_b.path_id) else {
            continue;
        };
        let info = PathJoinInfo {
            pair,
            total_length: room_a.path_length + room_b.path_length,
            connection: id,
        };
        match best.get(&pair) {
            Some(existing) if existing.total_length >= info.total_length => {}
            _ => {
                best.insert(pair, info);
            }
        }
    }
    best
}

/// The longest recorded join between any member of `group_a` and any member
/// of `group_b`
pub(crate) fn best_cross_join(
    best: &BTreeMap<PathPair, PathJoinInfo>,
    group_a: &BTreeSet<u32>,
    group_b: &BTreeSet<u32>,
) -> Option<PathJoinInfo> {
    let mut result: Option<PathJoinInfo> = None;
    for &a in group_a {
        for &b in group_b {
            let Some(info) = PathPair::new(a, b).and_then(|pair| best.get(&pair)) else {
                continue;
            };
            if result.is_none_or(|current| info.total_length > current.total_length) {
                result = Some(*info);
            }
        }
    }
    result
}

/// Reopen connections until all `connected_ids` form one group
///
/// Returns the final groups. Fails with `NoValidSolution` when more than one
/// group remains.
pub fn join_paths(
    grid: &mut RoomGrid,
    connected_ids: &[u32],
    level: Level,
) -> Result<PathGroups, GeneratorError> {
    let best = best_joins(grid);
    debug!("found {} path pairs with join candidates", best.len());

    let mut groups = PathGroups::new();
    for &id in connected_ids {
        groups.add(id);
    }
    for (index, &a) in connected_ids.iter().enumerate() {
        for &b in &connected_ids[index + 1..] {
            if groups.are_connected(a, b) {
                continue;
            }
            let join = best_cross_join(&best, &groups.members_of(a), &groups.members_of(b));
            if let Some(join) = join {
                grid.connection_mut(join.connection).is_closed = false;
                groups.union(join.pair.low(), join.pair.high());
                log!(level, "  - successfully joined paths {}", join.pair);
            }
        }
    }

    if groups.roots().len() > 1 {
        return Err(GeneratorError::NoValidSolution {
            groups: groups.groups(),
        });
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Direction, Location, Size, Wall};
    use crate::grid::RoomId;

    #[test]
    fn test_path_pair_is_unordered() {
        assert_eq!(PathPair::new(3, 1), PathPair::new(1, 3));
        assert!(PathPair::new(2, 2).is_none());
        assert!(PathPair::new(0, 2).is_none());
        let pair = PathPair::new(5, 2).unwrap();
        assert_eq!((pair.low(), pair.high()), (2, 5));
        assert_eq!(pair.to_string(), "2 and 5");
    }

    #[test]
    fn test_union_find() {
        let mut groups = PathGroups::new();
        for id in 1..=5 {
            groups.add(id);
        }
        assert!(!groups.are_connected(1, 2));
        groups.union(1, 2);
        assert!(groups.are_connected(1, 2));
        groups.union(4, 2);
        assert!(groups.are_connected(1, 4));
        assert!(!groups.are_connected(1, 3));
        assert_eq!(groups.members_of(4), BTreeSet::from([1, 2, 4]));
        assert_eq!(groups.roots(), BTreeSet::from([1, 3, 5]));
        assert_eq!(groups.groups(), vec![vec![1, 2, 4], vec![3], vec![5]]);

        groups.union(3, 5);
        groups.union(5, 4);
        assert_eq!(groups.roots().len(), 1);
    }

    #[test]
    fn test_members_of_unknown_id() {
        let groups = PathGroups::new();
        assert_eq!(groups.members_of(7), BTreeSet::from([7]));
        assert!(groups.roots().is_empty());
    }

    /// A 3x1 row of rooms carved as three separate paths
    fn three_paths(lengths: [u32; 3]) -> (RoomGrid, Vec<RoomId>) {
        let mut grid = RoomGrid::new(Size::new(3, 1));
        grid.fill_with_rooms();
        grid.connect_all_rooms().unwrap();
        let ids: Vec<RoomId> = (0..3)
            .map(|x| grid.room_id_at(Location::new(x, 0)).unwrap())
            .collect();
        for (i, &id) in ids.iter().enumerate() {
            let room = grid.room_mut(id);
            room.path_id = i as u32 + 1;
            room.path_length = lengths[i];
        }
        let connections: Vec<_> = grid.connections().map(|(id, _)| id).collect();
        for id in connections {
            let c = grid.connection_mut(id);
            c.is_used = true;
            c.is_closed = true;
        }
        (grid, ids)
    }

    #[test]
    fn test_best_joins_keep_longest() {
        let mut grid = RoomGrid::new(Size::new(2, 2));
        grid.fill_with_rooms();
        grid.connect_all_rooms().unwrap();
        // Column 0 is path 1, column 1 is path 2.
        for y in 0..2 {
            let left = grid.room_id_at(Location::new(0, y)).unwrap();
            let right = grid.room_id_at(Location::new(1, y)).unwrap();
            grid.room_mut(left).path_id = 1;
            grid.room_mut(left).path_length = 1 + y as u32;
            grid.room_mut(right).path_id = 2;
            grid.room_mut(right).path_length = 1 + y as u32;
        }
        let connections: Vec<_> = grid.connections().map(|(id, _)| id).collect();
        for id in connections {
            grid.connection_mut(id).is_closed = true;
        }
        let best = best_joins(&grid);
        assert_eq!(best.len(), 1);
        let info = best[&PathPair::new(1, 2).unwrap()];
        assert_eq!(info.total_length, 4);
        let c = grid.connection(info.connection);
        assert_eq!(c.a.wall.location, Location::new(0, 1));
    }

    #[test]
    fn test_decoy_boundaries_are_not_candidates() {
        let (mut grid, ids) = three_paths([1, 1, 1]);
        grid.room_mut(ids[2]).path_id = 101;
        let best = best_joins(&grid);
        assert_eq!(best.len(), 1);
        assert!(best.contains_key(&PathPair::new(1, 2).unwrap()));
    }

    #[test]
    fn test_join_chains_through_third_path() {
        // Layout 1 - 3 - 2: there is no direct candidate between 1 and 2.
        let (mut grid, ids) = three_paths([4, 5, 6]);
        grid.room_mut(ids[1]).path_id = 3;
        grid.room_mut(ids[2]).path_id = 2;
        let groups = join_paths(&mut grid, &[1, 2, 3], Level::Debug).unwrap();
        assert_eq!(groups.roots().len(), 1);
        assert!(grid.connections().all(|(_, c)| !c.is_closed));
    }

    #[test]
    fn test_join_fails_without_candidates() {
        let (mut grid, ids) = three_paths([1, 1, 1]);
        // Path 3 sits between the others but is a decoy.
        grid.room_mut(ids[1]).path_id = 101;
        grid.room_mut(ids[2]).path_id = 2;
        let err = join_paths(&mut grid, &[1, 2], Level::Debug).unwrap_err();
        match err {
            GeneratorError::NoValidSolution { groups } => {
                assert_eq!(groups, vec![vec![1], vec![2]]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_ids_out_of_scope_stay_closed() {
        // Row 1 - 2 - 3, where path 3 is not part of the join.
        let (mut grid, ids) = three_paths([2, 3, 4]);
        let groups = join_paths(&mut grid, &[1, 2], Level::Debug).unwrap();
        assert!(!groups.contains(3));
        assert_eq!(groups.roots().len(), 1);
        let wall = Wall::new(Location::new(1, 0), Direction::East);
        let to_third = grid.connection_at(ids[1], &wall).unwrap();
        assert!(grid.connection(to_third).is_closed);
    }
}
