//! Geometric primitives
//!
//! Locations, sizes, insets, rectangular location grids, placements and walls.
//! Pure value types; the only behavior is arithmetic and range tests.

mod location;
mod location_grid;
mod placement;
mod size;
mod wall;

pub use location::{Direction, Location};
pub use location_grid::{Corner, LocationGrid};
pub use placement::{Offset, Placement};
pub use size::{Insets, Size};
pub use wall::{Closing, ClosingType, Wall};
