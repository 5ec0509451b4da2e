//! Property tests for level generation and wave spawning across seeds.

use proptest::prelude::*;
use std::collections::HashSet;
use warren::{
    GenerationConfig, Generator, ItemKind, Mulberry32, RoomCorridorGenerator, TurnEngine,
    WorldStore,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_opening_wave_respects_spawn_rules(seed in any::<u32>()) {
        let engine = TurnEngine::default();
        let mut store = WorldStore::with_seed(seed);
        engine.init_level(&mut store).unwrap();
        let state = store.state();

        prop_assert!(state.is_walkable(state.player.position));
        prop_assert_eq!(state.enemies.len(), 10);
        prop_assert_eq!(state.items.iter().filter(|i| i.kind == ItemKind::Potion).count(), 10);
        prop_assert_eq!(state.items.iter().filter(|i| i.kind == ItemKind::Sword).count(), 2);

        let enemy_tiles: HashSet<_> = state.enemies.iter().map(|e| e.position).collect();
        prop_assert_eq!(enemy_tiles.len(), state.enemies.len());
        prop_assert!(!enemy_tiles.contains(&state.player.position));

        let item_tiles: HashSet<_> = state.items.iter().map(|i| i.position).collect();
        prop_assert_eq!(item_tiles.len(), state.items.len());
        for item in &state.items {
            prop_assert!(!enemy_tiles.contains(&item.position));
            prop_assert!(state.is_walkable(item.position));
        }
        for enemy in &state.enemies {
            prop_assert!(state.is_walkable(enemy.position));
        }
    }

    #[test]
    fn test_levels_are_connected_and_reproducible(seed in any::<u32>()) {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::for_testing(32, 32);

        let level = generator.generate(&config, &mut Mulberry32::new(seed)).unwrap();
        let again = generator.generate(&config, &mut Mulberry32::new(seed)).unwrap();

        prop_assert!(level.grid.is_fully_connected());
        prop_assert_eq!(level, again);
    }

    #[test]
    fn test_ids_are_unique(seed in any::<u32>()) {
        let engine = TurnEngine::default();
        let mut store = WorldStore::with_seed(seed);
        engine.init_level(&mut store).unwrap();
        let state = store.state();

        let mut ids: HashSet<u32> = HashSet::new();
        prop_assert!(ids.insert(state.player.id));
        for enemy in &state.enemies {
            prop_assert!(ids.insert(enemy.id));
        }
        for item in &state.items {
            prop_assert!(ids.insert(item.id));
        }
    }
}
