//! Room graph and the modifiers that shape it
//!
//! The maze starts as a full grid of 1x1 rooms connected to their four
//! neighbours. Modifiers then blank, merge or close parts of it before
//! carving starts.

mod connection;
mod modifier;
mod room;
mod room_grid;

pub use connection::{ConnectionId, ConnectionSide, RoomConnection};
pub use modifier::{Area, Modifier, ModifierKind, ModifierStage, modifiers_for_stage};
pub use room::{FIRST_DECOY_PATH_ID, Room, RoomId, RoomType};
pub(crate) use room_grid::MAX_RANDOM_TRIES;
pub use room_grid::RoomGrid;
