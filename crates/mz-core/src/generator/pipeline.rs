//! The generation pipeline
//!
//! Preparation (grid, modifiers, path ends) runs once. Carving, island
//! filling, verification and joining run per attempt; only a failed join
//! starts another attempt.

use log::{debug, log, warn};
use serde::Serialize;
use strum::Display;

use crate::error::{ErrorMark, GeneratorError};
use crate::geometry::{Location, Size};
use crate::grid::{
    FIRST_DECOY_PATH_ID, MAX_RANDOM_TRIES, ModifierStage, RoomGrid, RoomId, RoomType,
    modifiers_for_stage,
};
use crate::rng::MazeRng;

use super::carving::{CarvingStack, carve_all};
use super::joining::{PathGroups, join_paths};
use super::setup::{GeneratorSetup, PathEnd};
use super::view::MazeView;

/// Progress of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum GenerationState {
    Created,
    Prepared,
    Carving,
    Islands,
    Verified,
    Joined,
}

/// Generates one maze from a setup
#[derive(Debug, Clone)]
pub struct Generator {
    setup: GeneratorSetup,
    grid: RoomGrid,
    rng: MazeRng,
    state: GenerationState,
    /// Start room per path id, index 0 is path 1
    path_end_rooms: Vec<RoomId>,
    /// Dead-end flag per path id, parallel to `path_end_rooms`
    dead_ends: Vec<bool>,
    error_marks: Vec<ErrorMark>,
    /// Marks recorded while preparing; later marks belong to an attempt
    preparation_marks: usize,
    path_groups: PathGroups,
    attempts: u32,
}

impl Generator {
    /// Create a generator for a grid of `size` rooms
    pub fn new(size: Size, setup: GeneratorSetup, rng: MazeRng) -> Result<Self, GeneratorError> {
        setup.validate(size)?;
        log!(
            setup.progress_level(),
            "Room count: {} x {}",
            size.width,
            size.height
        );
        Ok(Self {
            grid: RoomGrid::new(size),
            setup,
            rng,
            state: GenerationState::Created,
            path_end_rooms: Vec::new(),
            dead_ends: Vec::new(),
            error_marks: Vec::new(),
            preparation_marks: 0,
            path_groups: PathGroups::new(),
            attempts: 0,
        })
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn setup(&self) -> &GeneratorSetup {
        &self.setup
    }

    pub fn grid(&self) -> &RoomGrid {
        &self.grid
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Number of carving attempts made so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn error_marks(&self) -> &[ErrorMark] {
        &self.error_marks
    }

    pub fn path_end_rooms(&self) -> &[RoomId] {
        &self.path_end_rooms
    }

    /// Path groups after the last successful join
    pub fn path_groups(&self) -> &PathGroups {
        &self.path_groups
    }

    pub fn view(&self) -> MazeView<'_> {
        MazeView::new(&self.grid, &self.path_end_rooms, &self.error_marks)
    }

    /// Prepare once, then carve and join until a solution is found or the
    /// attempts are exhausted
    pub fn generate(&mut self) -> Result<(), GeneratorError> {
        self.prepare_rooms()?;
        let level = self.setup.progress_level();
        if self.setup.layout_only {
            log!(level, "Layout only, skipping the path generation.");
            return Ok(());
        }
        let mut attempt = 1;
        loop {
            self.attempts = attempt;
            log!(level, "{attempt}. attempt to find a solution.");
            self.grid.reset_rooms_and_connections();
            self.error_marks.truncate(self.preparation_marks);
            match self.generate_maze() {
                Ok(()) => return Ok(()),
                Err(err) if err.is_retryable() && attempt < self.setup.maximum_attempts => {
                    debug!("attempt {attempt} failed: {err}");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Record the error in tolerant mode, fail otherwise
    fn raise_generator_error(
        &mut self,
        message: String,
        location: Location,
        size: Size,
    ) -> Result<(), GeneratorError> {
        if self.setup.ignore_errors {
            warn!("{message}");
            self.error_marks.push(ErrorMark::new(location, size, message));
            Ok(())
        } else {
            Err(GeneratorError::generator(message, location, size))
        }
    }

    /// Build the room grid, apply the modifiers and place the path ends
    ///
    /// Does nothing when the rooms are already prepared.
    pub fn prepare_rooms(&mut self) -> Result<(), GeneratorError> {
        if self.state != GenerationState::Created {
            return Ok(());
        }
        log!(self.setup.progress_level(), "Preparing rooms...");
        self.grid.fill_with_rooms();
        for stage in [ModifierStage::Frame, ModifierStage::Blank] {
            for modifier in modifiers_for_stage(&self.setup.modifiers, stage) {
                self.grid.apply_modifier(modifier, &mut self.rng)?;
            }
        }
        self.grid.connect_all_rooms()?;
        for stage in [ModifierStage::Merge, ModifierStage::Closing] {
            for modifier in modifiers_for_stage(&self.setup.modifiers, stage) {
                self.grid.apply_modifier(modifier, &mut self.rng)?;
            }
        }
        self.prepare_path_ends()?;
        self.grid.remove_blank_rooms();
        self.verify_preparations()?;
        self.grid.verify_unique_rooms()?;
        self.preparation_marks = self.error_marks.len();
        self.state = GenerationState::Prepared;
        Ok(())
    }

    fn location_for_path_end(&mut self, path_end: &PathEnd) -> Result<Location, GeneratorError> {
        let location = self.grid.bounds().location_for_placement_and_size(
            path_end.placement,
            Size::ONE,
            &mut self.rng,
        );
        path_end
            .offset
            .translate(location, path_end.placement)
            .ok_or_else(|| {
                GeneratorError::generator(
                    format!(
                        "The configured path end '{path_end}' is moved outside of the maze by its \
                         offset. Check the offset of the path end."
                    ),
                    location,
                    Size::ONE,
                )
            })
    }

    /// A random path end should start in a plain path room with a way out
    fn is_good_random_start(&self, location: Location) -> bool {
        match self.grid.room_id_at(location) {
            Some(id) => {
                self.grid.room(id).room_type == RoomType::Path
                    && !self.grid.is_surrounded_by_blanks(id)
            }
            None => false,
        }
    }

    /// Resolve every path end to its start room, in placement priority order
    fn prepare_path_ends(&mut self) -> Result<(), GeneratorError> {
        let mut ordered = self.setup.path_ends.clone();
        ordered.sort_by_key(|path_end| path_end.placement.order_value());

        for path_end in &ordered {
            let mut location = self.location_for_path_end(path_end)?;
            if path_end.placement.is_random() {
                let mut tries = 0;
                while tries < MAX_RANDOM_TRIES && !self.is_good_random_start(location) {
                    location = self.location_for_path_end(path_end)?;
                    tries += 1;
                }
            }
            let Some(room) = self.grid.room_id_at(location) else {
                return Err(GeneratorError::generator(
                    format!(
                        "The configured path end '{path_end}' is placed at location ({location}), \
                         outside of the maze. Check the offset of the path end."
                    ),
                    location,
                    Size::ONE,
                ));
            };
            let extent = *self.grid.room(room).grid();
            if self.grid.is_surrounded_by_blanks(room) {
                self.raise_generator_error(
                    format!(
                        "The configured path end '{path_end}' seems to end up in a spot at location \
                         ({location}) with no connections to other paths. Check your configuration. \
                         If the placement is random, {MAX_RANDOM_TRIES} attempts to find a better \
                         spot were unsuccessful."
                    ),
                    extent.location,
                    extent.size,
                )?;
            }
            if self.grid.room(room).room_type == RoomType::End {
                self.raise_generator_error(
                    format!(
                        "The configured path end '{path_end}' collides with another path end and \
                         would end up in the same room at location ({location}). Check your \
                         configuration. If the placement is random, {MAX_RANDOM_TRIES} attempts to \
                         find a better spot were unsuccessful."
                    ),
                    extent.location,
                    extent.size,
                )?;
            }
            self.grid.room_mut(room).room_type = RoomType::End;
            self.path_end_rooms.push(room);
            self.dead_ends.push(path_end.is_dead_end);
            debug!(
                "path end '{path_end}' starts path {} at {location}",
                self.path_end_rooms.len()
            );
        }
        Ok(())
    }

    /// Every path end must start in its own room
    fn verify_preparations(&mut self) -> Result<(), GeneratorError> {
        let mut collisions = Vec::new();
        for (index, room) in self.path_end_rooms.iter().enumerate() {
            if let Some(first) = self.path_end_rooms[..index].iter().position(|r| r == room) {
                collisions.push((first + 1, index + 1, *self.grid.room(*room).grid()));
            }
        }
        for (first, second, extent) in collisions {
            self.raise_generator_error(
                format!(
                    "The end-points {second} and {first} ending up in the same room. Make sure they \
                     are placed at different locations and room merging does not merge two \
                     end-points into one."
                ),
                extent.location,
                extent.size,
            )?;
        }
        Ok(())
    }

    /// One carving attempt: carve, fill islands, verify and join
    pub fn generate_maze(&mut self) -> Result<(), GeneratorError> {
        let level = self.setup.progress_level();
        self.state = GenerationState::Carving;
        log!(level, "Generating the paths for the maze...");
        let mut stacks: Vec<CarvingStack> = Vec::with_capacity(self.path_end_rooms.len());
        for (index, &room) in self.path_end_rooms.iter().enumerate() {
            stacks.push(CarvingStack::start(&mut self.grid, room, index as u32 + 1));
        }
        let rounds = carve_all(&mut stacks, &mut self.grid, &mut self.rng);
        debug!("carved {} paths in {rounds} rounds", stacks.len());

        if self.setup.allow_islands {
            self.state = GenerationState::Islands;
            self.fill_islands();
        }
        self.verify_maze()?;
        self.state = GenerationState::Verified;
        self.connect_longest_path()?;
        self.state = GenerationState::Joined;
        Ok(())
    }

    /// Carve decoy paths into every area no primary path reached
    ///
    /// Returns the number of decoy paths.
    pub fn fill_islands(&mut self) -> u32 {
        log!(self.setup.progress_level(), "Filling islands...");
        let mut path_id = FIRST_DECOY_PATH_ID + 1;
        while let Some(room) = self.first_unused_room() {
            let mut stack = CarvingStack::start(&mut self.grid, room, path_id);
            stack.run(&mut self.grid, &mut self.rng);
            path_id += 1;
        }
        let islands = path_id - FIRST_DECOY_PATH_ID - 1;
        debug!("filled {islands} islands");
        islands
    }

    fn first_unused_room(&self) -> Option<RoomId> {
        self.grid
            .rooms()
            .find(|(_, room)| !room.is_used())
            .map(|(id, _)| id)
    }

    /// Every room must be on a path and have at least one connection
    pub fn verify_maze(&mut self) -> Result<(), GeneratorError> {
        log!(self.setup.progress_level(), "Verifying generated paths...");
        let mut problems = Vec::new();
        for (_, room) in self.grid.rooms() {
            if !room.is_used() {
                problems.push((
                    format!("Found a room that is not in use. Location: {}", room.location()),
                    *room.grid(),
                ));
            }
            if room.connections().is_empty() {
                problems.push((
                    format!("Found a room without exits. Location: {}", room.location()),
                    *room.grid(),
                ));
            }
        }
        for (message, extent) in problems {
            self.raise_generator_error(message, extent.location, extent.size)?;
        }
        Ok(())
    }

    /// Join all non-dead-end paths at their longest candidate connections
    ///
    /// Dead-end paths are left out of the join and stay separated.
    pub fn connect_longest_path(&mut self) -> Result<(), GeneratorError> {
        let level = self.setup.progress_level();
        log!(level, "Connect all paths...");
        let connected: Vec<u32> = (1..=self.dead_ends.len() as u32)
            .filter(|&id| !self.dead_ends[id as usize - 1])
            .collect();
        self.path_groups = join_paths(&mut self.grid, &connected, level)?;
        Ok(())
    }
}
