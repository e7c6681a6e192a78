use std::collections::{BTreeSet, HashSet, VecDeque};

use proptest::prelude::*;

use mz_core::generator::PathGroups;
use mz_core::geometry::{Location, LocationGrid, Offset, Placement, Size, Wall};
use mz_core::grid::{Area, Modifier, RoomGrid};
use mz_core::{Generator, GeneratorSetup, MazeRng};

fn generate(width: i32, height: i32, seed: u64) -> Generator {
    let mut setup = GeneratorSetup::default();
    setup.verbose = false;
    let mut generator = Generator::new(Size::new(width, height), setup, MazeRng::new(seed))
        .expect("valid setup");
    generator.generate().expect("generation succeeds without modifiers");
    generator
}

fn open_walls(grid: &RoomGrid) -> BTreeSet<Wall> {
    grid.connections()
        .filter(|(_, connection)| !connection.is_closed)
        .map(|(_, connection)| connection.a.wall)
        .collect()
}

fn reachable_count(grid: &RoomGrid) -> usize {
    let Some(start) = grid.room_ids().first().copied() else {
        return 0;
    };
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(room) = queue.pop_front() {
        for &id in grid.room(room).connections() {
            let connection = grid.connection(id);
            if connection.is_closed {
                continue;
            }
            let next = connection.remote_room(room);
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn generated_maze_is_connected(width in 10i32..16, height in 10i32..16, seed in any::<u64>()) {
        let generator = generate(width, height, seed);
        let grid = generator.grid();
        prop_assert_eq!(grid.room_count(), (width * height) as usize);
        prop_assert_eq!(reachable_count(grid), grid.room_count());
        for (_, room) in grid.rooms() {
            prop_assert!(room.is_used());
            prop_assert!(!room.connections().is_empty());
        }
    }

    #[test]
    fn walls_are_never_shared(width in 10i32..16, height in 10i32..16, seed in any::<u64>()) {
        let generator = generate(width, height, seed);
        let mut walls = HashSet::new();
        for (_, connection) in generator.grid().connections() {
            prop_assert_eq!(connection.a.wall.opposite(), connection.b.wall);
            prop_assert!(walls.insert(connection.a.wall));
            prop_assert!(walls.insert(connection.b.wall));
        }
    }

    #[test]
    fn same_seed_same_maze(seed in any::<u64>()) {
        let first = generate(12, 11, seed);
        let second = generate(12, 11, seed);
        prop_assert_eq!(open_walls(first.grid()), open_walls(second.grid()));
        prop_assert_eq!(first.path_end_rooms(), second.path_end_rooms());
    }

    #[test]
    fn merge_keeps_boundary_connections(
        x in 0i32..6,
        y in 0i32..6,
        width in 2i32..5,
        height in 2i32..5,
    ) {
        let mut grid = RoomGrid::new(Size::new(10, 10));
        grid.fill_with_rooms();
        grid.connect_all_rooms().expect("fresh grid connects");
        let area = LocationGrid::new(Location::new(x, y), Size::new(width, height));
        let inside = |grid: &RoomGrid, room| area.contains(grid.room(room).location());
        let boundary = grid
            .connections()
            .filter(|(_, c)| inside(&grid, c.a.room) != inside(&grid, c.b.room))
            .count();
        let before = grid.connection_count();

        let merge = Modifier::merge(
            Area::new(Placement::TopLeft, Size::new(width, height))
                .with_offset(Offset::absolute(x, y)),
        );
        grid.apply_modifier(&merge, &mut MazeRng::new(0)).expect("merge succeeds");

        let merged = grid.room_at(Location::new(x, y)).expect("merged room exists");
        prop_assert_eq!(merged.size(), Size::new(width, height));
        prop_assert_eq!(merged.connections().len(), boundary);
        let interior = (width - 1) * height + width * (height - 1);
        prop_assert_eq!(grid.connection_count(), before - interior as usize);
        prop_assert_eq!(grid.room_count(), 100 - (width * height) as usize + 1);
    }

    #[test]
    fn union_find_partitions_ids(unions in prop::collection::vec((1u32..20, 1u32..20), 0..30)) {
        let mut groups = PathGroups::new();
        for id in 1..20 {
            groups.add(id);
        }
        for &(a, b) in &unions {
            groups.union(a, b);
            prop_assert!(groups.are_connected(a, b));
        }
        let mut seen = BTreeSet::new();
        for group in groups.groups() {
            // Roots are the smallest member of their group.
            prop_assert_eq!(groups.root_of(group[0]), group[0]);
            for id in group {
                prop_assert!(seen.insert(id));
            }
        }
        prop_assert_eq!(seen, (1..20).collect::<BTreeSet<u32>>());
    }
}
