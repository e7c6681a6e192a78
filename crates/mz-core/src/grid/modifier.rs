//! Modifiers that reshape the room grid before carving

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::geometry::{Closing, Insets, LocationGrid, Offset, Placement, Size};
use crate::rng::MazeRng;

/// A rectangular area given by placement, size and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    pub placement: Placement,
    pub size: Size,
    pub offset: Offset,
}

impl Area {
    pub const fn new(placement: Placement, size: Size) -> Self {
        Self {
            placement,
            size,
            offset: Offset::absolute(0, 0),
        }
    }

    pub const fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Resolve the area inside `bounds`; the result may still leave `bounds`
    /// when the offset pushes it out
    ///
    /// `None` when the offset pushes it beyond the coordinate range.
    pub fn resolve(&self, bounds: &LocationGrid, rng: &mut MazeRng) -> Option<LocationGrid> {
        let location = bounds.location_for_placement_and_size(self.placement, self.size, rng);
        let location = self.offset.translate(location, self.placement)?;
        location.checked_translated(self.size.width, self.size.height)?;
        Some(LocationGrid::new(location, self.size))
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.placement, self.size)?;
        if !self.offset.is_zero() {
            write!(f, "/{}", self.offset)?;
        }
        Ok(())
    }
}

/// Build stage a modifier belongs to, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ModifierStage {
    Frame,
    Blank,
    Merge,
    Closing,
}

/// What a modifier does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Mark the rooms of an area as blank
    Blank(Area),
    /// Mark a frame along the grid edges as blank
    Frame(Insets),
    /// Merge the rooms of an area into one room
    Merge(Area),
    /// Remove the connections selected by a closing pattern
    Closing(Closing, Area),
}

impl ModifierKind {
    pub fn stage(&self) -> ModifierStage {
        match self {
            ModifierKind::Frame(_) => ModifierStage::Frame,
            ModifierKind::Blank(_) => ModifierStage::Blank,
            ModifierKind::Merge(_) => ModifierStage::Merge,
            ModifierKind::Closing(..) => ModifierStage::Closing,
        }
    }

    pub fn area(&self) -> Option<&Area> {
        match self {
            ModifierKind::Blank(area) | ModifierKind::Merge(area) => Some(area),
            ModifierKind::Closing(_, area) => Some(area),
            ModifierKind::Frame(_) => None,
        }
    }

    /// Placement priority; frames sort first
    pub fn order_value(&self) -> u32 {
        self.area().map_or(0, |area| area.placement.order_value())
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKind::Blank(area) => write!(f, "blank {area}"),
            ModifierKind::Frame(insets) => write!(f, "frame {insets}"),
            ModifierKind::Merge(area) => write!(f, "merge {area}"),
            ModifierKind::Closing(closing, area) => write!(f, "closing {closing}/{area}"),
        }
    }
}

/// A named modifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    /// User-facing label used in error messages
    pub name: String,
}

impl Modifier {
    /// Create a modifier named after its description
    pub fn new(kind: ModifierKind) -> Self {
        let name = kind.to_string();
        Self { kind, name }
    }

    pub fn named(kind: ModifierKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn blank(area: Area) -> Self {
        Self::new(ModifierKind::Blank(area))
    }

    pub fn frame(insets: Insets) -> Self {
        Self::new(ModifierKind::Frame(insets))
    }

    pub fn merge(area: Area) -> Self {
        Self::new(ModifierKind::Merge(area))
    }

    pub fn closing(closing: Closing, area: Area) -> Self {
        Self::new(ModifierKind::Closing(closing, area))
    }

    pub fn stage(&self) -> ModifierStage {
        self.kind.stage()
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Modifiers of one stage in application order
///
/// Blanks and merges are stable-sorted by placement priority, frames and
/// closings keep their declaration order.
pub fn modifiers_for_stage(modifiers: &[Modifier], stage: ModifierStage) -> Vec<&Modifier> {
    let mut selected: Vec<&Modifier> = modifiers.iter().filter(|m| m.stage() == stage).collect();
    if matches!(stage, ModifierStage::Blank | ModifierStage::Merge) {
        selected.sort_by_key(|m| m.kind.order_value());
    }
    selected
}
