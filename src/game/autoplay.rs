//! # Autoplay Module
//!
//! Picks the player's next intent without a human at the keyboard, for the
//! binary's demo mode and for soak tests.
//!
//! The driver walks toward the closest enemy along a breadth-first path over
//! floor tiles and attacks once one is in reach. It only reads the state.

use crate::{Direction, Intent, Position, WorldState};
use std::collections::{HashMap, VecDeque};

/// Chooses the player's next intent.
///
/// # Examples
///
/// ```
/// use warren::{autoplay_intent, Actor, Intent, Position, WorldStore};
///
/// let mut store = WorldStore::with_seed(3);
/// store.update(|state| {
///     state.map.carve_room(1, 1, 6, 6);
///     state.player.position = Position::new(2, 2);
///     state.enemies.push(Actor::enemy(99, Position::new(3, 3), 40, 3));
/// });
/// assert_eq!(autoplay_intent(store.state()), Intent::Attack);
/// ```
pub fn autoplay_intent(state: &WorldState) -> Intent {
    let player = state.player.position;
    let in_reach = |pos: Position| {
        state
            .enemies
            .iter()
            .any(|enemy| enemy.position.chebyshev_distance(pos) <= 1)
    };

    if in_reach(player) {
        return Intent::Attack;
    }

    let next_step = find_path(state, player, in_reach).and_then(|path| path.first().copied());
    match next_step.and_then(|step| Direction::from_delta(step - player)) {
        Some(direction) => Intent::from(direction),
        None => Intent::wait(),
    }
}

/// Breadth-first search over walkable, enemy-free tiles using cardinal steps.
///
/// Returns the path from `start` (exclusive) to the nearest tile satisfying
/// `is_goal`, or `None` when no such tile is reachable.
pub fn find_path<F>(state: &WorldState, start: Position, is_goal: F) -> Option<Vec<Position>>
where
    F: Fn(Position) -> bool,
{
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if current != start && is_goal(current) {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(&previous) = came_from.get(&cursor) {
                if previous == start {
                    break;
                }
                path.push(previous);
                cursor = previous;
            }
            path.reverse();
            return Some(path);
        }

        for neighbor in current.cardinal_adjacent_positions() {
            if neighbor == start || came_from.contains_key(&neighbor) {
                continue;
            }
            if !state.is_walkable(neighbor) || state.enemy_index_at(neighbor).is_some() {
                continue;
            }
            came_from.insert(neighbor, current);
            queue.push_back(neighbor);
        }
    }

    None
}
