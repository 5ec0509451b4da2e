//! # Game State Module
//!
//! The canonical world snapshot and the store that guards every mutation.
//!
//! A session owns exactly one [`WorldState`], held by a [`WorldStore`]. All
//! gameplay changes go through [`WorldStore::update`] or
//! [`WorldStore::reset`], and each call notifies subscribers once, after the
//! change has been applied. Resets overwrite the existing state in place so
//! the store never hands out a different state value.

use crate::{
    find_free_position, Actor, Effect, EntityId, GenerationConfig, Grid, Item, ItemKind, Level,
    Mulberry32, Overlay, Position, Tile, WarrenResult,
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock-derived seeds are masked to 28 bits.
const CLOCK_SEED_MASK: u32 = 0x0FFF_FFFF;

/// Where a fresh player stands before a level is installed.
const PLAYER_START: Position = Position { x: 1, y: 1 };

/// Everything the simulation knows about the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Current floor tiles
    pub map: Grid,
    /// The player character
    pub player: Actor,
    /// Enemies in storage order; the AI acts in this order
    pub enemies: Vec<Actor>,
    /// Items lying on the floor
    pub items: Vec<Item>,
    /// Cosmetic effects, aged by the effects ticker
    pub effects: Vec<Effect>,
    /// While set, turns resolve nothing until a restart
    pub input_locked: bool,
    /// Overlay to show, if any
    pub overlay: Option<Overlay>,
    /// Seed the session's random stream started from
    pub rng_seed: u32,
    /// The session's random stream
    pub rng: Mulberry32,
    /// Next identifier to hand out
    next_id: EntityId,
}

impl WorldState {
    /// Creates an empty state: an all-wall floor, a full-health player and
    /// no enemies or items.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{Tile, WorldState};
    ///
    /// let state = WorldState::new(32, 32, 1234);
    /// assert_eq!(state.tiles().len(), 32 * 32);
    /// assert!(state.tiles().iter().all(|&tile| tile == Tile::Wall));
    /// assert!(state.enemies.is_empty());
    /// ```
    pub fn new(width: u32, height: u32, seed: u32) -> Self {
        let mut state = Self {
            map: Grid::new(width, height),
            player: Actor::player(0, PLAYER_START),
            enemies: Vec::new(),
            items: Vec::new(),
            effects: Vec::new(),
            input_locked: false,
            overlay: None,
            rng_seed: seed,
            rng: Mulberry32::new(seed),
            next_id: 0,
        };
        state.player.id = state.allocate_id();
        state
    }

    /// Floor width in tiles.
    pub fn width(&self) -> u32 {
        self.map.width()
    }

    /// Floor height in tiles.
    pub fn height(&self) -> u32 {
        self.map.height()
    }

    /// Row-major tiles.
    pub fn tiles(&self) -> &[Tile] {
        self.map.tiles()
    }

    /// Hands out the next entity identifier.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Checks if a position is an in-bounds floor tile.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.map.is_walkable(pos)
    }

    /// Index of the enemy standing on a position.
    pub fn enemy_index_at(&self, pos: Position) -> Option<usize> {
        self.enemies.iter().position(|enemy| enemy.position == pos)
    }

    /// Index of the first item lying on a position.
    pub fn item_index_at(&self, pos: Position) -> Option<usize> {
        self.items.iter().position(|item| item.position == pos)
    }

    /// Copies a generated level's tiles into the state.
    pub fn install_level(&mut self, level: &Level) {
        self.map = level.grid.clone();
    }

    /// Samples a free floor tile.
    ///
    /// A tile is taken when an enemy or an item stands on it, or, with
    /// `avoid_player`, when the player does.
    pub fn sample_spawn_position(
        &mut self,
        max_attempts: Option<u32>,
        avoid_player: bool,
    ) -> WarrenResult<Position> {
        let enemies = &self.enemies;
        let items = &self.items;
        let player = self.player.position;

        find_free_position(&self.map, &mut self.rng, max_attempts, |pos| {
            (avoid_player && pos == player)
                || enemies.iter().any(|enemy| enemy.position == pos)
                || items.iter().any(|item| item.position == pos)
        })
    }

    /// Spawns an enemy on a free tile and returns its identifier.
    pub fn spawn_enemy(
        &mut self,
        hp: i32,
        attack: i32,
        max_attempts: Option<u32>,
    ) -> WarrenResult<EntityId> {
        let position = self.sample_spawn_position(max_attempts, true)?;
        let id = self.allocate_id();
        self.enemies.push(Actor::enemy(id, position, hp, attack));
        Ok(id)
    }

    /// Spawns an item on a free tile and returns its identifier.
    pub fn spawn_item(
        &mut self,
        kind: ItemKind,
        value: i32,
        max_attempts: Option<u32>,
    ) -> WarrenResult<EntityId> {
        let position = self.sample_spawn_position(max_attempts, true)?;
        let id = self.allocate_id();
        self.items.push(Item::new(id, position, kind, value));
        Ok(id)
    }

    /// Shows an overlay and stops accepting turns.
    pub fn lock_with(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
        self.input_locked = true;
    }

    /// Builds the read-only view handed to renderers.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            width: self.width(),
            height: self.height(),
            tiles: self.tiles().to_vec(),
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            items: self.items.clone(),
            effects: self.effects.clone(),
            overlay_text: self.overlay.map(|overlay| overlay.text().to_string()),
            input_locked: self.input_locked,
        }
    }
}

/// Immutable copy of what a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Tile>,
    pub player: Actor,
    pub enemies: Vec<Actor>,
    pub items: Vec<Item>,
    pub effects: Vec<Effect>,
    pub overlay_text: Option<String>,
    pub input_locked: bool,
}

impl RenderSnapshot {
    /// Serializes the snapshot to pretty JSON.
    pub fn to_json(&self) -> WarrenResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Handle returned by [`WorldStore::subscribe`].
pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&WorldState)>;

/// Owner of the session's [`WorldState`] and its change listeners.
pub struct WorldStore {
    state: WorldState,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
}

impl WorldStore {
    /// Creates a store with default dimensions, seeded from the clock.
    pub fn new() -> Self {
        Self::from_config(&GenerationConfig::default(), None)
    }

    /// Creates a store with default dimensions and a fixed seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::WorldStore;
    ///
    /// let store = WorldStore::with_seed(42);
    /// assert_eq!(store.state().rng_seed, 42);
    /// assert_eq!(store.state().width(), warren::config::DEFAULT_WIDTH);
    /// ```
    pub fn with_seed(seed: u32) -> Self {
        Self::from_config(&GenerationConfig::default(), Some(seed))
    }

    /// Creates a store sized for a generation config. Without a seed, the
    /// clock provides one.
    pub fn from_config(config: &GenerationConfig, seed: Option<u32>) -> Self {
        let seed = seed.unwrap_or_else(|| clock_seed(None));
        Self {
            state: WorldState::new(config.width, config.height, seed),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Read access to the current state.
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> RenderSnapshot {
        self.state.snapshot()
    }

    /// Rebuilds an empty state with a fresh clock-derived seed, keeping the
    /// current dimensions, then notifies listeners.
    pub fn reset(&mut self) {
        let seed = clock_seed(Some(self.state.rng_seed));
        self.reset_with_seed(seed);
    }

    /// Rebuilds an empty state with the given seed, then notifies listeners.
    pub fn reset_with_seed(&mut self, seed: u32) {
        let fresh = WorldState::new(self.state.width(), self.state.height(), seed);
        // Overwrite in place; the store keeps the same state value
        self.state.clone_from(&fresh);
        log::debug!("World state reset with seed {}", seed);
        self.emit();
    }

    /// Applies a mutation, then notifies listeners once.
    pub fn update<R>(&mut self, mutator: impl FnOnce(&mut WorldState) -> R) -> R {
        let result = mutator(&mut self.state);
        self.emit();
        result
    }

    /// Registers a listener called synchronously after every update or reset.
    pub fn subscribe(&mut self, listener: impl FnMut(&WorldState) + 'static) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false when the handle is unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn emit(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

impl Default for WorldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WorldStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Derives a seed from wall-clock milliseconds. Never repeats `previous`.
fn clock_seed(previous: Option<u32>) -> u32 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u32)
        .unwrap_or(0);
    let seed = millis & CLOCK_SEED_MASK;
    match previous {
        Some(previous) if previous == seed => seed.wrapping_add(1) & CLOCK_SEED_MASK,
        _ => seed,
    }
}
