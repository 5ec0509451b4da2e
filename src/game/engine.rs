//! # Turn Engine
//!
//! Resolves one player intent per call and runs the phase sequence:
//! move or attack, enemy AI, combat, end-of-turn checks.
//!
//! Every mutation goes through [`WorldStore::update`], one call per phase,
//! so listeners observe each phase's result. Randomness comes only from the
//! state's own stream, which keeps a session replayable from its seed.

use crate::config;
use crate::{
    Effect, EffectColor, GameConfig, GameEvent, GenerationConfig, Generator, Intent, ItemKind,
    Overlay, Position, RoomCorridorGenerator, WarrenResult, WorldState, WorldStore,
};
use rand::seq::SliceRandom;

/// Drives level setup and turn resolution for a [`WorldStore`].
///
/// # Examples
///
/// ```
/// use warren::{GameConfig, Intent, TurnEngine, WorldStore};
///
/// let engine = TurnEngine::new(GameConfig::default());
/// let mut store = WorldStore::with_seed(2024);
/// engine.init_level(&mut store).unwrap();
///
/// assert_eq!(store.state().enemies.len(), 10);
/// engine.step_turn(&mut store, Some(Intent::Attack)).unwrap();
/// assert!(engine.step_turn(&mut store, None).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TurnEngine {
    config: GameConfig,
    generator: RoomCorridorGenerator,
}

impl TurnEngine {
    /// Creates an engine with the given tunables.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            generator: RoomCorridorGenerator::new(),
        }
    }

    /// The engine's tunables.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Generates a floor from the state's random stream, places the player
    /// and spawns the opening wave.
    pub fn init_level(&self, store: &mut WorldStore) -> WarrenResult<()> {
        store.update(|state| -> WarrenResult<()> {
            let config = GenerationConfig {
                width: state.width(),
                height: state.height(),
                ..self.config.generation.clone()
            };
            let level = self.generator.generate(&config, &mut state.rng)?;

            state.install_level(&level);
            state.enemies.clear();
            state.items.clear();
            state.effects.clear();
            state.player.position = state.sample_spawn_position(config.max_spawn_attempts, false)?;
            self.spawn_wave(state)?;

            log::info!(
                "Level ready: player at {}, {} enemies, {} items",
                state.player.position,
                state.enemies.len(),
                state.items.len()
            );
            Ok(())
        })
    }

    /// Resets the store with a clock-derived seed and builds a new level.
    /// This is the only way out of a locked state.
    pub fn restart(&self, store: &mut WorldStore) -> WarrenResult<()> {
        store.reset();
        self.init_level(store)
    }

    /// Resets the store with a fixed seed and builds a new level.
    pub fn restart_with_seed(&self, store: &mut WorldStore, seed: u32) -> WarrenResult<()> {
        store.reset_with_seed(seed);
        self.init_level(store)
    }

    /// Resolves one turn.
    ///
    /// Without an intent, or while input is locked, nothing happens and no
    /// listener fires. Otherwise the full phase sequence runs and the events
    /// it produced are returned.
    pub fn step_turn(
        &self,
        store: &mut WorldStore,
        intent: Option<Intent>,
    ) -> WarrenResult<Vec<GameEvent>> {
        let Some(intent) = intent else {
            return Ok(Vec::new());
        };
        if store.state().input_locked {
            log::trace!("Ignoring {:?} while input is locked", intent);
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        match intent {
            Intent::Move { dx, dy } => self.move_phase(store, dx, dy, &mut events),
            Intent::Attack => self.attack_phase(store, &mut events),
        }
        self.ai_phase(store, &mut events);
        self.combat_phase(store);
        self.end_phase(store, &mut events)?;

        log::debug!(
            "Turn resolved: {:?}, {} events, player hp {}, {} enemies left",
            intent,
            events.len(),
            store.state().player.hp,
            store.state().enemies.len()
        );
        Ok(events)
    }

    /// Moves the player unless the target is blocked, then picks up.
    fn move_phase(&self, store: &mut WorldStore, dx: i32, dy: i32, events: &mut Vec<GameEvent>) {
        let state = store.state();
        let from = state.player.position;
        let target = from.offset(dx.signum(), dy.signum());

        if !state.is_walkable(target) || state.enemy_index_at(target).is_some() {
            events.push(GameEvent::MoveBlocked { target });
            return;
        }

        store.update(|state| state.player.position = target);
        events.push(GameEvent::PlayerMoved { from, to: target });
        self.pickup_phase(store, events);
    }

    /// Applies and removes the first item under the player.
    fn pickup_phase(&self, store: &mut WorldStore, events: &mut Vec<GameEvent>) {
        let picked = store.update(|state| -> Option<GameEvent> {
            let index = state.item_index_at(state.player.position)?;
            let item = state.items.remove(index);
            match item.kind {
                ItemKind::Potion => state.player.heal(item.value, config::MAX_HP),
                ItemKind::Sword => state.player.attack += item.value,
            }
            Some(GameEvent::ItemPickedUp {
                item: item.id,
                kind: item.kind,
                value: item.value,
            })
        });
        events.extend(picked);
    }

    /// Strikes all eight neighbours at once, then removes the dead.
    fn attack_phase(&self, store: &mut WorldStore, events: &mut Vec<GameEvent>) {
        store.update(|state| {
            let origin = state.player.position;
            let damage = state.player.attack;

            for cell in origin.adjacent_positions() {
                state.effects.push(Effect::new(cell, EffectColor::Swing));
                if let Some(index) = state.enemy_index_at(cell) {
                    let enemy = &mut state.enemies[index];
                    let remaining_hp = enemy.take_damage(damage);
                    events.push(GameEvent::EnemyDamaged {
                        enemy: enemy.id,
                        damage,
                        remaining_hp,
                    });
                }
            }

            state.enemies.retain(|enemy| {
                if !enemy.is_alive() {
                    events.push(GameEvent::EnemyDied { enemy: enemy.id });
                }
                enemy.is_alive()
            });
        });
    }

    /// Lets every enemy, in storage order, attack or step.
    fn ai_phase(&self, store: &mut WorldStore, events: &mut Vec<GameEvent>) {
        let random_step_chance = self.config.ai.random_step_chance;

        store.update(|state| {
            for index in 0..state.enemies.len() {
                let enemy_pos = state.enemies[index].position;
                let player_pos = state.player.position;

                if enemy_pos.chebyshev_distance(player_pos) <= 1 {
                    enemy_strike(state, index, events);
                    continue;
                }

                let candidates = if state.rng.chance(random_step_chance) {
                    let mut neighbours = enemy_pos.cardinal_adjacent_positions();
                    neighbours.shuffle(&mut state.rng);
                    neighbours
                } else {
                    chase_candidates(enemy_pos, player_pos)
                };

                let chosen = candidates.into_iter().find(|&candidate| {
                    state.is_walkable(candidate)
                        && !state
                            .enemies
                            .iter()
                            .enumerate()
                            .any(|(other, enemy)| other != index && enemy.position == candidate)
                });

                match chosen {
                    Some(step) if step == player_pos => enemy_strike(state, index, events),
                    Some(step) => {
                        let enemy = &mut state.enemies[index];
                        log::trace!("Enemy {} steps {} -> {}", enemy.id, enemy_pos, step);
                        enemy.position = step;
                        events.push(GameEvent::EnemyMoved {
                            enemy: enemy.id,
                            from: enemy_pos,
                            to: step,
                        });
                    }
                    None => log::trace!("Enemy {} has nowhere to go", state.enemies[index].id),
                }
            }
        });
    }

    /// Extension point for buffs and status effects; nothing to resolve yet.
    fn combat_phase(&self, _store: &mut WorldStore) {}

    /// Declares victory and respawns a wave once the floor is clear.
    fn end_phase(&self, store: &mut WorldStore, events: &mut Vec<GameEvent>) -> WarrenResult<()> {
        if !store.state().enemies.is_empty() {
            return Ok(());
        }

        store.update(|state| -> WarrenResult<()> {
            state.lock_with(Overlay::Victory);
            let items_before = state.items.len();
            self.spawn_wave(state)?;

            log::info!("Floor cleared, spawned a new wave");
            events.push(GameEvent::WaveCleared {
                enemies: state.enemies.len(),
                items: state.items.len() - items_before,
            });
            Ok(())
        })
    }

    /// Spawns enemies first, then potions, then swords. Items left from the
    /// previous wave stay on the floor.
    fn spawn_wave(&self, state: &mut WorldState) -> WarrenResult<()> {
        let wave = &self.config.wave;
        let max_attempts = self.config.generation.max_spawn_attempts;

        for _ in 0..wave.enemy_count {
            state.spawn_enemy(wave.enemy_hp, wave.enemy_attack, max_attempts)?;
        }
        for _ in 0..wave.potion_count {
            state.spawn_item(ItemKind::Potion, wave.potion_value, max_attempts)?;
        }
        for _ in 0..wave.sword_count {
            state.spawn_item(ItemKind::Sword, wave.sword_value, max_attempts)?;
        }
        Ok(())
    }
}

/// Enemy at `index` hits the player in place. Running out of hit points
/// locks input behind the defeat overlay and restores the player.
fn enemy_strike(state: &mut WorldState, index: usize, events: &mut Vec<GameEvent>) {
    let enemy = &state.enemies[index];
    let (enemy_id, damage) = (enemy.id, enemy.attack);

    state.player.hp = (state.player.hp - damage).clamp(0, config::MAX_HP);
    state
        .effects
        .push(Effect::new(state.player.position, EffectColor::Hit));
    events.push(GameEvent::PlayerDamaged {
        enemy: enemy_id,
        damage,
        remaining_hp: state.player.hp,
    });

    if state.player.hp <= 0 {
        log::info!("Player defeated by enemy {}", enemy_id);
        state.lock_with(Overlay::Defeat);
        state.player.hp = config::MAX_HP;
        events.push(GameEvent::PlayerDefeated);
    }
}

/// Single steps toward `target`, the axis with the larger offset first and
/// horizontal on ties. Axes without an offset contribute no step.
fn chase_candidates(from: Position, target: Position) -> Vec<Position> {
    let dx = target.x - from.x;
    let dy = target.y - from.y;
    let horizontal = from.offset(dx.signum(), 0);
    let vertical = from.offset(0, dy.signum());

    let ordered = if dx.abs() >= dy.abs() {
        [horizontal, vertical]
    } else {
        [vertical, horizontal]
    };
    ordered.into_iter().filter(|&step| step != from).collect()
}
