//! ASCII rendering
//!
//! Every room location becomes a character cell with walls and posts in
//! between, so a maze of `w x h` rooms renders as `(2w+1) x (2h+1)`
//! characters.

use crate::generator::MazeView;
use crate::geometry::{Direction, Location, LocationGrid, Size, Wall};

use super::{Canvas, Layout, RenderError};

const WALL: char = '#';
const OPEN: char = ' ';
const REMOVED: char = '.';
const ERROR: char = '!';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    canvas: Canvas,
    show_marks: bool,
}

impl TextLayout {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            show_marks: true,
        }
    }

    /// Show or hide the path end numbers
    pub fn with_marks(mut self, show_marks: bool) -> Self {
        self.show_marks = show_marks;
        self
    }
}

/// Character for a path end number
fn path_end_char(number: usize) -> char {
    match number {
        1..=9 => char::from(b'0' + number as u8),
        _ => '*',
    }
}

struct CharGrid {
    columns: usize,
    cells: Vec<char>,
}

impl CharGrid {
    fn new(size: Size) -> Self {
        let columns = (size.width * 2 + 1).max(1) as usize;
        let rows = (size.height * 2 + 1).max(1) as usize;
        Self {
            columns,
            cells: vec![WALL; columns * rows],
        }
    }

    fn set(&mut self, column: i32, row: i32, value: char) {
        if column < 0 || row < 0 {
            return;
        }
        let index = row as usize * self.columns + column as usize;
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = value;
        }
    }

    fn into_string(self) -> String {
        let mut output = String::with_capacity(self.cells.len() + self.cells.len() / self.columns);
        for row in self.cells.chunks(self.columns) {
            output.extend(row.iter());
            output.push('\n');
        }
        output
    }
}

impl Layout for TextLayout {
    fn room_count(&self) -> Size {
        self.canvas.room_count()
    }

    fn dimension_info(&self) -> String {
        let size = self.room_count();
        format!(
            "text, {} x {} rooms, {} x {} characters",
            size.width,
            size.height,
            size.width * 2 + 1,
            size.height * 2 + 1
        )
    }

    fn render(&self, maze: &MazeView<'_>) -> Result<String, RenderError> {
        self.canvas.check(maze)?;
        let size = maze.size();
        let bounds = LocationGrid::new(Location::new(0, 0), size);
        let mut grid = CharGrid::new(size);
        let present = |location: Location| maze.room_id_at(location).is_some();

        // Posts and walls only vanish when no room touches them.
        let spans = |c: i32| {
            if c % 2 == 0 {
                [c / 2 - 1, c / 2]
            } else {
                [c / 2, c / 2]
            }
        };
        for row in 0..=size.height * 2 {
            for column in 0..=size.width * 2 {
                let any_room = spans(column)
                    .iter()
                    .any(|&x| spans(row).iter().any(|&y| present(Location::new(x, y))));
                if !any_room {
                    grid.set(column, row, REMOVED);
                }
            }
        }

        for location in bounds.all_locations() {
            let column = location.x * 2 + 1;
            let row = location.y * 2 + 1;
            if !present(location) {
                continue;
            }
            grid.set(column, row, OPEN);
            for (direction, dc, dr) in [(Direction::East, 1, 0), (Direction::South, 0, 1)] {
                if maze.is_wall_open(&Wall::new(location, direction)) {
                    grid.set(column + dc, row + dr, OPEN);
                }
            }
            // Close the post in the middle of a merged room.
            let east = location.advance(Direction::East);
            let south = location.advance(Direction::South);
            let south_east = east.advance(Direction::South);
            let id = maze.room_id_at(location);
            if [east, south, south_east]
                .iter()
                .all(|&l| maze.room_id_at(l) == id)
            {
                grid.set(column + 1, row + 1, OPEN);
            }
        }

        if self.show_marks {
            for (index, &room) in maze.path_end_rooms().iter().enumerate() {
                let location = maze.room(room).location();
                grid.set(location.x * 2 + 1, location.y * 2 + 1, path_end_char(index + 1));
            }
        }

        for mark in maze.error_marks() {
            let area = LocationGrid::new(mark.location, mark.size);
            for location in area.all_locations() {
                if bounds.contains(location) {
                    grid.set(location.x * 2 + 1, location.y * 2 + 1, ERROR);
                }
            }
        }

        Ok(grid.into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorMark;
    use crate::grid::{RoomGrid, RoomId};
    use crate::render::Parity;

    fn exact(width: i32, height: i32) -> Canvas {
        Canvas::new(width, height).with_parity(Parity::None, Parity::None)
    }

    fn closed_grid(size: Size) -> RoomGrid {
        let mut grid = RoomGrid::new(size);
        grid.fill_with_rooms();
        grid.connect_all_rooms().unwrap();
        let ids: Vec<_> = grid.connections().map(|(id, _)| id).collect();
        for id in ids {
            grid.connection_mut(id).is_closed = true;
        }
        grid
    }

    #[test]
    fn test_path_end_chars() {
        assert_eq!(path_end_char(1), '1');
        assert_eq!(path_end_char(9), '9');
        assert_eq!(path_end_char(10), '*');
    }

    #[test]
    fn test_render_closed_grid() {
        let grid = closed_grid(Size::new(2, 1));
        let view = MazeView::new(&grid, &[], &[]);
        let text = TextLayout::new(exact(2, 1)).render(&view).unwrap();
        assert_eq!(text, "#####\n# # #\n#####\n");
    }

    #[test]
    fn test_render_open_connection_and_marks() {
        let mut grid = closed_grid(Size::new(2, 1));
        let id = grid.connections().map(|(id, _)| id).next().unwrap();
        grid.connection_mut(id).is_closed = false;
        let ends = vec![RoomId(1)];
        let marks = vec![ErrorMark::new(Location::new(0, 0), Size::ONE, "bad")];
        let view = MazeView::new(&grid, &ends, &marks);
        let canvas = exact(2, 1);
        let text = TextLayout::new(canvas).render(&view).unwrap();
        assert_eq!(text, "#####\n#! 1#\n#####\n");

        let hidden = TextLayout::new(canvas).with_marks(false).render(&view).unwrap();
        assert_eq!(hidden, "#####\n#!  #\n#####\n");
    }

    #[test]
    fn test_size_mismatch() {
        let grid = closed_grid(Size::new(2, 1));
        let view = MazeView::new(&grid, &[], &[]);
        let err = TextLayout::new(Canvas::new(11, 11)).render(&view).unwrap_err();
        assert!(matches!(err, RenderError::SizeMismatch { .. }));
    }

    #[test]
    fn test_removed_rooms_and_merged_rooms() {
        let mut grid = RoomGrid::new(Size::new(3, 2));
        grid.fill_with_rooms();
        let mut rng = crate::rng::MazeRng::new(1);
        let blank = crate::grid::Modifier::blank(crate::grid::Area::new(
            crate::geometry::Placement::TopRight,
            Size::new(1, 2),
        ));
        grid.apply_modifier(&blank, &mut rng).unwrap();
        grid.connect_all_rooms().unwrap();
        let merge = crate::grid::Modifier::merge(crate::grid::Area::new(
            crate::geometry::Placement::TopLeft,
            Size::new(2, 2),
        ));
        grid.apply_modifier(&merge, &mut rng).unwrap();
        grid.remove_blank_rooms();
        let view = MazeView::new(&grid, &[], &[]);
        let text = TextLayout::new(exact(3, 2)).render(&view).unwrap();
        let expected = ["#####..", "#   #..", "#   #..", "#   #..", "#####.."];
        assert_eq!(text, expected.join("\n") + "\n");
    }
}
