//! # Entities
//!
//! Actors, pickups and the short-lived cosmetic effects shown on the map.

use crate::config;
use crate::{EntityId, Position};
use serde::{Deserialize, Serialize};

/// Which side an actor fights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Enemy,
}

/// A creature on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub position: Position,
    pub hp: i32,
    pub attack: i32,
    pub kind: ActorKind,
}

impl Actor {
    /// Creates the player at full health with base attack.
    pub fn player(id: EntityId, position: Position) -> Self {
        Self {
            id,
            position,
            hp: config::MAX_HP,
            attack: config::PLAYER_BASE_ATTACK,
            kind: ActorKind::Player,
        }
    }

    /// Creates an enemy with the given stats.
    pub fn enemy(id: EntityId, position: Position, hp: i32, attack: i32) -> Self {
        Self {
            id,
            position,
            hp,
            attack,
            kind: ActorKind::Enemy,
        }
    }

    /// Checks if the actor still has hit points.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtracts damage and returns the remaining hit points.
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        self.hp -= damage;
        self.hp
    }

    /// Restores hit points up to `max_hp`.
    pub fn heal(&mut self, amount: i32, max_hp: i32) {
        self.hp = (self.hp + amount).clamp(0, max_hp);
    }
}

/// The kinds of pickups a wave can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Heals the player by its value
    Potion,
    /// Permanently raises player attack by its value
    Sword,
}

/// A pickup lying on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub position: Position,
    pub kind: ItemKind,
    pub value: i32,
}

impl Item {
    pub fn new(id: EntityId, position: Position, kind: ItemKind, value: i32) -> Self {
        Self {
            id,
            position,
            kind,
            value,
        }
    }
}

/// Colour family of a cosmetic effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectColor {
    /// The player's swing over a neighbouring cell
    Swing,
    /// An enemy landing a hit on the player
    Hit,
}

/// A short-lived marker drawn over a cell. Never affects gameplay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub position: Position,
    /// Milliseconds until the effect disappears
    pub remaining_ms: i64,
    pub color: EffectColor,
}

impl Effect {
    /// Creates an effect with the default lifetime.
    pub fn new(position: Position, color: EffectColor) -> Self {
        Self {
            position,
            remaining_ms: config::EFFECT_LIFETIME_MS,
            color,
        }
    }
}
