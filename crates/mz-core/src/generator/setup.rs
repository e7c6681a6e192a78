//! Generator configuration

use std::fmt;

use log::Level;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::geometry::{Offset, Placement, Size};
use crate::grid::Modifier;

/// Smallest accepted grid side, in rooms
pub(crate) const MIN_GRID_SIDE: i32 = 10;
/// Upper bound for `maximum_attempts`
pub(crate) const MAX_ATTEMPTS: u32 = 10_000;
/// Upper bound for path ends; ids must stay below the decoy range
pub(crate) const MAX_PATH_ENDS: usize = 99;

/// A user declared start or end point of a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEnd {
    pub placement: Placement,
    pub offset: Offset,
    /// Excluded from the mandatory connectivity requirement
    pub is_dead_end: bool,
    /// User-facing label used in error messages
    pub name: String,
}

impl PathEnd {
    pub fn new(placement: Placement) -> Self {
        Self::build(placement, Offset::default(), false)
    }

    pub fn with_offset(self, offset: Offset) -> Self {
        Self::build(self.placement, offset, self.is_dead_end)
    }

    pub fn dead_end(self) -> Self {
        Self::build(self.placement, self.offset, true)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn build(placement: Placement, offset: Offset, is_dead_end: bool) -> Self {
        let mut name = placement.to_string();
        if !offset.is_zero() || is_dead_end {
            name.push('/');
            name.push_str(&offset.to_string());
        }
        if is_dead_end {
            name.push_str("/x");
        }
        Self {
            placement,
            offset,
            is_dead_end,
            name,
        }
    }
}

impl fmt::Display for PathEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Configuration for one generator run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSetup {
    pub path_ends: Vec<PathEnd>,
    pub modifiers: Vec<Modifier>,
    /// Fill unreachable areas with decoy paths
    pub allow_islands: bool,
    pub maximum_attempts: u32,
    /// Log progress at info level instead of debug
    pub verbose: bool,
    /// Record located errors as marks and continue
    pub ignore_errors: bool,
    /// Stop after preparing the rooms
    pub layout_only: bool,
}

impl Default for GeneratorSetup {
    fn default() -> Self {
        Self {
            path_ends: vec![PathEnd::new(Placement::Left), PathEnd::new(Placement::Right)],
            modifiers: Vec::new(),
            allow_islands: true,
            maximum_attempts: 20,
            verbose: true,
            ignore_errors: false,
            layout_only: false,
        }
    }
}

impl GeneratorSetup {
    /// Setup with the given path ends and default options
    pub fn with_path_ends(path_ends: Vec<PathEnd>) -> Self {
        Self {
            path_ends,
            ..Self::default()
        }
    }

    /// Check the configuration for a grid of `size` rooms
    pub fn validate(&self, size: Size) -> Result<(), GeneratorError> {
        if size.width < MIN_GRID_SIDE || size.height < MIN_GRID_SIDE {
            return Err(GeneratorError::InvalidSetup(format!(
                "the maze needs at least {MIN_GRID_SIDE}x{MIN_GRID_SIDE} rooms, got {size}"
            )));
        }
        if self.path_ends.len() < 2 {
            return Err(GeneratorError::InvalidSetup(format!(
                "at least two path ends are required, got {}",
                self.path_ends.len()
            )));
        }
        if self.path_ends.len() > MAX_PATH_ENDS {
            return Err(GeneratorError::InvalidSetup(format!(
                "at most {MAX_PATH_ENDS} path ends are supported, got {}",
                self.path_ends.len()
            )));
        }
        let connected = self.path_ends.iter().filter(|p| !p.is_dead_end).count();
        if connected < 2 {
            return Err(GeneratorError::InvalidSetup(format!(
                "at least two path ends must not be dead-ends, got {connected}"
            )));
        }
        if !(1..=MAX_ATTEMPTS).contains(&self.maximum_attempts) {
            return Err(GeneratorError::InvalidSetup(format!(
                "the maximum attempts must be in 1..={MAX_ATTEMPTS}, got {}",
                self.maximum_attempts
            )));
        }
        Ok(())
    }

    /// Level for progress messages
    pub fn progress_level(&self) -> Level {
        if self.verbose { Level::Info } else { Level::Debug }
    }
}
