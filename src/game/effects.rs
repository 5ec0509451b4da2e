//! # Effects Ticker
//!
//! Ages cosmetic effects by elapsed real time. Runs on the frame clock, not
//! on turns, and never touches gameplay data.

use crate::config;
use crate::{Effect, WorldStore};

/// Ages every effect by `elapsed_ms` and drops the expired ones.
pub fn tick_effects(store: &mut WorldStore, elapsed_ms: i64) {
    store.update(|state| age_effects(&mut state.effects, elapsed_ms));
}

/// Subtracts `elapsed_ms`, removes effects that ran out and keeps only the
/// newest [`config::MAX_EFFECTS`].
pub fn age_effects(effects: &mut Vec<Effect>, elapsed_ms: i64) {
    for effect in effects.iter_mut() {
        effect.remaining_ms -= elapsed_ms;
    }
    effects.retain(|effect| effect.remaining_ms > 0);

    if effects.len() > config::MAX_EFFECTS {
        let excess = effects.len() - config::MAX_EFFECTS;
        effects.drain(..excess);
    }
}
