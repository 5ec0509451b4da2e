//! # Intents and Turn Events
//!
//! The player's per-turn command and the events a resolved turn reports.

use crate::{Direction, EntityId, ItemKind, Position};
use serde::{Deserialize, Serialize};

/// The single action the player submits for one turn.
///
/// Intents are passed straight into
/// [`TurnEngine::step_turn`](crate::TurnEngine::step_turn); nothing about a
/// pending intent is stored on the world state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Step by a delta; each component is in `-1..=1`. A zero delta stays in
    /// place but still triggers pickup.
    Move { dx: i32, dy: i32 },
    /// Strike all eight neighbouring cells at once
    Attack,
}

impl Intent {
    /// Creates a movement intent, clamping each component to `-1..=1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::Intent;
    ///
    /// assert_eq!(Intent::step(3, -1), Intent::Move { dx: 1, dy: -1 });
    /// ```
    pub fn step(dx: i32, dy: i32) -> Self {
        Intent::Move {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    /// Stays in place; useful for waiting and for picking up.
    pub fn wait() -> Self {
        Intent::Move { dx: 0, dy: 0 }
    }
}

impl From<Direction> for Intent {
    fn from(direction: Direction) -> Self {
        let delta = direction.to_delta();
        Intent::Move {
            dx: delta.x,
            dy: delta.y,
        }
    }
}

/// Which overlay the session is showing, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    /// Every enemy on the floor was cleared
    Victory,
    /// The player's hit points ran out
    Defeat,
}

impl Overlay {
    /// Overlay text for the HUD.
    pub fn text(self) -> &'static str {
        match self {
            Overlay::Victory => "You Win!",
            Overlay::Defeat => "Game Over!",
        }
    }
}

/// Something that happened while a turn resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player stepped (or stayed) on a floor tile
    PlayerMoved { from: Position, to: Position },
    /// The target tile was a wall or held an enemy
    MoveBlocked { target: Position },
    /// The player collected an item
    ItemPickedUp { item: EntityId, kind: ItemKind, value: i32 },
    /// A player swing hit an enemy
    EnemyDamaged { enemy: EntityId, damage: i32, remaining_hp: i32 },
    /// An enemy's hit points ran out and it was removed
    EnemyDied { enemy: EntityId },
    /// An enemy stepped towards or around the player
    EnemyMoved { enemy: EntityId, from: Position, to: Position },
    /// An enemy hit the player
    PlayerDamaged { enemy: EntityId, damage: i32, remaining_hp: i32 },
    /// The player ran out of hit points and was restored
    PlayerDefeated,
    /// The floor was cleared and a new wave spawned
    WaveCleared { enemies: usize, items: usize },
}

impl GameEvent {
    /// Human-readable message for a HUD message line, when one is worth showing.
    pub fn message(&self) -> Option<String> {
        match self {
            GameEvent::ItemPickedUp { kind: ItemKind::Potion, value, .. } => {
                Some(format!("You drink a potion (+{} hp).", value))
            }
            GameEvent::ItemPickedUp { kind: ItemKind::Sword, value, .. } => {
                Some(format!("You pick up a sword (+{} attack).", value))
            }
            GameEvent::EnemyDied { .. } => Some("An enemy falls.".to_string()),
            GameEvent::PlayerDamaged { damage, remaining_hp, .. } => Some(format!(
                "An enemy hits you for {} ({} hp left).",
                damage, remaining_hp
            )),
            GameEvent::PlayerDefeated => Some(Overlay::Defeat.text().to_string()),
            GameEvent::WaveCleared { .. } => Some(Overlay::Victory.text().to_string()),
            _ => None,
        }
    }
}
