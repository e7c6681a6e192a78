//! JSON export of the room graph

use serde::Serialize;

use crate::error::ErrorMark;
use crate::generator::MazeView;
use crate::geometry::{Location, Size, Wall};
use crate::grid::RoomType;

use super::{Canvas, Layout, RenderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonLayout {
    canvas: Canvas,
    pretty: bool,
}

impl JsonLayout {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            pretty: true,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

#[derive(Serialize)]
struct RoomEntry {
    location: Location,
    size: Size,
    room_type: RoomType,
    path_id: u32,
    path_length: u32,
}

#[derive(Serialize)]
struct PassageEntry {
    a: Wall,
    b: Wall,
}

#[derive(Serialize)]
struct MazeDocument<'a> {
    size: Size,
    rooms: Vec<RoomEntry>,
    passages: Vec<PassageEntry>,
    path_ends: Vec<Location>,
    error_marks: &'a [ErrorMark],
}

impl Layout for JsonLayout {
    fn room_count(&self) -> Size {
        self.canvas.room_count()
    }

    fn dimension_info(&self) -> String {
        let size = self.room_count();
        format!("json, {} x {} rooms", size.width, size.height)
    }

    fn render(&self, maze: &MazeView<'_>) -> Result<String, RenderError> {
        self.canvas.check(maze)?;
        let document = MazeDocument {
            size: maze.size(),
            rooms: maze
                .rooms()
                .map(|(_, room)| RoomEntry {
                    location: room.location(),
                    size: room.size(),
                    room_type: room.room_type,
                    path_id: room.path_id,
                    path_length: room.path_length,
                })
                .collect(),
            passages: maze
                .open_connections()
                .map(|(_, c)| PassageEntry {
                    a: c.a.wall,
                    b: c.b.wall,
                })
                .collect(),
            path_ends: maze
                .path_end_rooms()
                .iter()
                .map(|&id| maze.room(id).location())
                .collect(),
            error_marks: maze.error_marks(),
        };
        let mut output = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        output.push('\n');
        Ok(output)
    }
}
