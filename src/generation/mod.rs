//! # Generation Module
//!
//! Procedural floor generation and spawn-point sampling.
//!
//! Everything here draws from the caller's [`Mulberry32`] stream, so the same
//! seed always yields the same floor and the same spawn points.

pub mod dungeon;
pub mod spawn;

pub use dungeon::*;
pub use spawn::*;

use crate::config;
use crate::{Mulberry32, Position, WarrenError, WarrenResult};
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls floor size, room counts and sizes, corridor variety and the
/// spawn sampler's attempt bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Floor width in tiles
    pub width: u32,
    /// Floor height in tiles
    pub height: u32,
    /// Minimum target number of rooms
    pub min_rooms: u32,
    /// Maximum target number of rooms
    pub max_rooms: u32,
    /// Minimum room edge
    pub min_room_size: u32,
    /// Maximum room edge
    pub max_room_size: u32,
    /// Placement tries granted per target room
    pub tries_per_room: u32,
    /// Below this many placed rooms the generator carves one large fallback room
    pub fallback_threshold: u32,
    /// Minimum number of extra corridors between random room pairs
    pub min_extra_corridors: u32,
    /// Maximum number of extra corridors between random room pairs
    pub max_extra_corridors: u32,
    /// Whether validation flood-fills the floor and rejects disconnected levels
    pub ensure_connectivity: bool,
    /// Random draws before the spawn sampler falls back to a scan; `None`
    /// samples until it succeeds
    pub max_spawn_attempts: Option<u32>,
}

impl GenerationConfig {
    /// Creates the default configuration for a floor of the given size.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(40, 24);
    /// assert_eq!(config.width, 40);
    /// assert!(config.min_room_size >= 3);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            min_rooms: 5,
            max_rooms: 10,
            min_room_size: 3,
            max_room_size: 8,
            tries_per_room: 20,
            fallback_threshold: 3,
            min_extra_corridors: 2,
            max_extra_corridors: 4,
            ensure_connectivity: false,
            max_spawn_attempts: Some(config::MAX_SPAWN_ATTEMPTS),
        }
    }

    /// Creates a configuration for testing that also checks connectivity.
    pub fn for_testing(width: u32, height: u32) -> Self {
        Self {
            ensure_connectivity: true,
            ..Self::new(width, height)
        }
    }

    /// Checks that every range is ordered and the floor is large enough.
    pub fn validate(&self) -> WarrenResult<()> {
        const MIN_DIMENSION: u32 = 10;

        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(WarrenError::InvalidConfig(format!(
                "floor must be at least {0}x{0}, got {1}x{2}",
                MIN_DIMENSION, self.width, self.height
            )));
        }
        if self.min_rooms == 0 || self.min_rooms > self.max_rooms {
            return Err(WarrenError::InvalidConfig(format!(
                "room count range {}..={} is empty",
                self.min_rooms, self.max_rooms
            )));
        }
        if self.min_room_size == 0 || self.min_room_size > self.max_room_size {
            return Err(WarrenError::InvalidConfig(format!(
                "room size range {}..={} is empty",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.min_extra_corridors > self.max_extra_corridors {
            return Err(WarrenError::InvalidConfig(format!(
                "extra corridor range {}..={} is empty",
                self.min_extra_corridors, self.max_extra_corridors
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(config::DEFAULT_WIDTH, config::DEFAULT_HEIGHT)
    }
}

/// A rectangular room carved into the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Placement order, starting at 0
    pub id: u32,
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room in floor tiles
    pub width: u32,
    /// Height of the room in floor tiles
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{Room, Position};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8);
    /// assert_eq!(room.id, 1);
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
        }
    }

    /// Gets the bottom-right corner of the room.
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the center position of the room.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Gets the area of the room in tiles.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        let bottom_right = self.bottom_right();
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x <= bottom_right.x
            && pos.y <= bottom_right.y
    }

    /// Checks if this room, grown by `margin` tiles on every side, overlaps
    /// another room.
    pub fn overlaps_with_margin(&self, other: &Room, margin: i32) -> bool {
        let a_max = self.bottom_right();
        let b_max = other.bottom_right();
        self.top_left.x - margin <= b_max.x
            && a_max.x + margin >= other.top_left.x
            && self.top_left.y - margin <= b_max.y
            && a_max.y + margin >= other.top_left.y
    }

    /// Checks if this room overlaps another room.
    pub fn overlaps(&self, other: &Room) -> bool {
        self.overlaps_with_margin(other, 0)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random stream.
    fn generate(&self, config: &GenerationConfig, rng: &mut Mulberry32) -> WarrenResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> WarrenResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}
