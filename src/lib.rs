//! # Warren
//!
//! A deterministic, turn-based dungeon crawler core.
//!
//! ## Architecture Overview
//!
//! Warren is split into a handful of small systems that all share one seeded
//! random stream, so a session is fully reproducible from its seed:
//!
//! - **Utilities**: the `Mulberry32` generator every random decision draws from
//! - **World**: tiles, the flat `Grid` and the generated `Level`
//! - **Generation**: room-and-corridor floor generation and spawn sampling
//! - **Game State**: the `WorldStore` choke point with change notification
//! - **Turn Engine**: intent resolution, enemy AI, pickups and wave respawn
//!
//! Rendering, frame pacing and key handling are outer collaborators. The
//! crate ships a text renderer and a command parser only so the bundled
//! binary can drive a session from a terminal.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Warren engine.
#[derive(thiserror::Error, Debug)]
pub enum WarrenError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A line of player input could not be parsed
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The spawn sampler found no free floor tile
    #[error("No free floor tile left after {attempts} sampling attempts")]
    NoFreeTile { attempts: u32 },
}

/// Result type used throughout the Warren codebase.
pub type WarrenResult<T> = Result<T, WarrenError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default floor width in tiles
    pub const DEFAULT_WIDTH: u32 = 32;

    /// Default floor height in tiles
    pub const DEFAULT_HEIGHT: u32 = 32;

    /// Player hit points are clamped to `0..=MAX_HP`
    pub const MAX_HP: i32 = 30;

    /// Player attack at the start of a session
    pub const PLAYER_BASE_ATTACK: i32 = 10;

    /// Enemy hit points on spawn
    pub const ENEMY_HP: i32 = 40;

    /// Enemy melee damage
    pub const ENEMY_ATTACK: i32 = 3;

    /// Enemies per wave
    pub const WAVE_ENEMIES: u32 = 10;

    /// Potions per wave
    pub const WAVE_POTIONS: u32 = 10;

    /// Hit points restored by a wave potion
    pub const POTION_VALUE: i32 = 2;

    /// Swords per wave
    pub const WAVE_SWORDS: u32 = 2;

    /// Attack bonus granted by a wave sword
    pub const SWORD_VALUE: i32 = 1;

    /// Chance that an enemy wanders instead of chasing
    pub const AI_RANDOM_STEP_CHANCE: f64 = 0.3;

    /// Lifetime of a cosmetic effect in milliseconds
    pub const EFFECT_LIFETIME_MS: i64 = 120;

    /// Maximum number of live cosmetic effects
    pub const MAX_EFFECTS: usize = 64;

    /// Random draws the spawn sampler makes before falling back to a scan
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;
}
