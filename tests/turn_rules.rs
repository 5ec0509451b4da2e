//! Integration tests for turn resolution: combat, pickups, win and loss.

use warren::{
    autoplay_intent, config, Actor, GameConfig, GameEvent, Intent, Item, ItemKind, Overlay,
    Position, TurnEngine, WarrenResult, WorldStore,
};

/// A store with one open room over (1,1)..=(14,14) and the player at (5,5).
fn arena() -> WorldStore {
    let mut store = WorldStore::with_seed(31);
    store.update(|state| {
        state.map.carve_room(1, 1, 14, 14);
        state.player.position = Position::new(5, 5);
    });
    store
}

fn add_enemy(store: &mut WorldStore, pos: Position, hp: i32, attack: i32) -> u32 {
    store.update(|state| {
        let id = state.allocate_id();
        state.enemies.push(Actor::enemy(id, pos, hp, attack));
        id
    })
}

#[test]
fn test_two_attacks_kill_a_weak_enemy() -> WarrenResult<()> {
    let engine = TurnEngine::default();
    let mut store = arena();
    let target = add_enemy(&mut store, Position::new(6, 5), 15, 3);
    // Keeps the floor from being cleared by the kill
    add_enemy(&mut store, Position::new(14, 14), 40, 3);

    engine.step_turn(&mut store, Some(Intent::Attack))?;
    let hp = store
        .state()
        .enemies
        .iter()
        .find(|enemy| enemy.id == target)
        .map(|enemy| enemy.hp);
    assert_eq!(hp, Some(5));

    let events = engine.step_turn(&mut store, Some(Intent::Attack))?;
    assert!(events.contains(&GameEvent::EnemyDied { enemy: target }));
    assert!(store.state().enemies.iter().all(|enemy| enemy.id != target));
    assert!(!store.state().input_locked);
    Ok(())
}

#[test]
fn test_sword_pickup_with_zero_move() -> WarrenResult<()> {
    let engine = TurnEngine::default();
    let mut store = arena();
    add_enemy(&mut store, Position::new(14, 14), 40, 3);
    store.update(|state| {
        let id = state.allocate_id();
        state
            .items
            .push(Item::new(id, Position::new(5, 5), ItemKind::Sword, 3));
    });

    let events = engine.step_turn(&mut store, Some(Intent::wait()))?;
    assert_eq!(store.state().player.attack, config::PLAYER_BASE_ATTACK + 3);
    assert!(store.state().items.is_empty());
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::ItemPickedUp {
            kind: ItemKind::Sword,
            value: 3,
            ..
        }
    )));
    Ok(())
}

#[test]
fn test_clearing_the_floor_respawns_a_wave() -> WarrenResult<()> {
    let engine = TurnEngine::default();
    let mut store = arena();
    add_enemy(&mut store, Position::new(4, 6), 5, 3);

    let events = engine.step_turn(&mut store, Some(Intent::Attack))?;
    let state = store.state();

    assert!(state.input_locked);
    assert_eq!(state.overlay, Some(Overlay::Victory));
    assert_eq!(state.enemies.len(), 10);
    let potions = state.items.iter().filter(|i| i.kind == ItemKind::Potion).count();
    let swords = state.items.iter().filter(|i| i.kind == ItemKind::Sword).count();
    assert_eq!((potions, swords), (10, 2));
    assert!(events.contains(&GameEvent::WaveCleared { enemies: 10, items: 12 }));

    for enemy in &state.enemies {
        assert_eq!(enemy.hp, config::ENEMY_HP);
        assert_ne!(enemy.position, state.player.position);
        assert!(state.is_walkable(enemy.position));
    }
    for item in &state.items {
        assert!(state.enemies.iter().all(|enemy| enemy.position != item.position));
        assert_ne!(item.position, state.player.position);
    }
    Ok(())
}

#[test]
fn test_leftover_items_survive_a_new_wave() -> WarrenResult<()> {
    let engine = TurnEngine::default();
    let mut store = arena();
    add_enemy(&mut store, Position::new(4, 6), 5, 3);
    let leftover = Position::new(10, 10);
    store.update(|state| {
        let id = state.allocate_id();
        state
            .items
            .push(Item::new(id, leftover, ItemKind::Potion, 2));
    });

    let events = engine.step_turn(&mut store, Some(Intent::Attack))?;
    let state = store.state();

    assert_eq!(state.items.len(), 13);
    assert_eq!(state.items[0].position, leftover);
    let potions = state.items.iter().filter(|i| i.kind == ItemKind::Potion).count();
    assert_eq!(potions, 11);
    assert!(events.contains(&GameEvent::WaveCleared { enemies: 10, items: 12 }));
    Ok(())
}

#[test]
fn test_defeat_locks_and_restores_hp() -> WarrenResult<()> {
    let engine = TurnEngine::default();
    let mut store = arena();
    let attacker = add_enemy(&mut store, Position::new(6, 6), 40, 3);
    store.update(|state| state.player.hp = 2);

    let events = engine.step_turn(&mut store, Some(Intent::wait()))?;
    let state = store.state();

    assert!(events.contains(&GameEvent::PlayerDefeated));
    assert!(events.contains(&GameEvent::PlayerDamaged {
        enemy: attacker,
        damage: 3,
        remaining_hp: 0
    }));
    assert!(state.input_locked);
    assert_eq!(state.overlay, Some(Overlay::Defeat));
    assert_eq!(state.player.hp, config::MAX_HP);
    assert_eq!(state.enemies[0].position, Position::new(6, 6));

    // Nothing moves until a restart
    let before = state.clone();
    assert!(engine.step_turn(&mut store, Some(Intent::Attack))?.is_empty());
    assert_eq!(store.state(), &before);
    Ok(())
}

#[test]
fn test_restart_unlocks_with_a_fresh_floor() -> WarrenResult<()> {
    let engine = TurnEngine::default();
    let mut store = WorldStore::with_seed(404);
    engine.init_level(&mut store)?;
    store.update(|state| state.lock_with(Overlay::Defeat));

    engine.restart_with_seed(&mut store, 405)?;
    let state = store.state();
    assert!(!state.input_locked);
    assert_eq!(state.overlay, None);
    assert_eq!(state.rng_seed, 405);
    assert_eq!(state.enemies.len(), 10);
    assert_eq!(state.items.len(), 12);
    assert_eq!(state.player.hp, config::MAX_HP);
    Ok(())
}

#[test]
fn test_enemies_stay_in_bounds_and_apart() -> WarrenResult<()> {
    let engine = TurnEngine::default();
    let mut store = WorldStore::with_seed(5150);
    engine.init_level(&mut store)?;

    for _ in 0..40 {
        if store.state().input_locked {
            break;
        }
        engine.step_turn(&mut store, Some(Intent::wait()))?;
        let state = store.state();
        for (i, enemy) in state.enemies.iter().enumerate() {
            assert!(state.is_walkable(enemy.position));
            assert_ne!(enemy.position, state.player.position);
            for other in state.enemies.iter().skip(i + 1) {
                assert_ne!(enemy.position, other.position);
            }
        }
        assert!((0..=config::MAX_HP).contains(&state.player.hp));
    }
    Ok(())
}

/// Plays `turns` autoplay turns, restarting from derived seeds on lock.
fn replay(seed: u32, turns: u32) -> WarrenResult<WorldStore> {
    let engine = TurnEngine::new(GameConfig::default());
    let mut store = WorldStore::with_seed(seed);
    engine.init_level(&mut store)?;

    for turn in 0..turns {
        if store.state().input_locked {
            engine.restart_with_seed(&mut store, seed.wrapping_add(turn))?;
            continue;
        }
        let intent = autoplay_intent(store.state());
        engine.step_turn(&mut store, Some(intent))?;
    }
    Ok(store)
}

#[test]
fn test_same_seed_same_session() -> WarrenResult<()> {
    let first = replay(2718, 150)?;
    let second = replay(2718, 150)?;
    assert_eq!(first.state(), second.state());

    let other = replay(2719, 150)?;
    assert_ne!(first.state(), other.state());
    Ok(())
}
