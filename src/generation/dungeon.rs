//! # Dungeon Generation
//!
//! Room-and-corridor floor generation.
//!
//! The generator places non-overlapping rooms by rejection sampling, falls
//! back to a single large room when too few fit, chains the rooms together
//! with L-shaped corridors and then adds a few extra corridors so the floor
//! has alternate routes.

use crate::{
    Generator, GenerationConfig, Grid, Level, Mulberry32, Position, Room, Tile, WarrenError,
    WarrenResult,
};

/// Tiles of wall kept between a room and its neighbours and the map edge.
const ROOM_BUFFER: i32 = 1;

/// Primary floor generator.
///
/// This generator creates floors by:
/// 1. Placing rooms randomly with a one-tile buffer between them
/// 2. Carving one large centred room when fewer than the fallback threshold fit
/// 3. Chaining rooms, ordered by centre, with L-shaped corridors
/// 4. Adding a few extra corridors between random room pairs
#[derive(Debug, Clone, Default)]
pub struct RoomCorridorGenerator;

impl RoomCorridorGenerator {
    /// Creates a new floor generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{GenerationConfig, Generator, Mulberry32, RoomCorridorGenerator};
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// let level = generator
    ///     .generate(&GenerationConfig::default(), &mut Mulberry32::new(1))
    ///     .unwrap();
    /// assert!(!level.rooms.is_empty());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Places rooms by rejection sampling and carves each accepted one.
    fn place_rooms(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut Mulberry32,
    ) -> Vec<Room> {
        let target = rng.range_inclusive(config.min_rooms as i32, config.max_rooms as i32) as usize;
        let max_tries = target * config.tries_per_room as usize;
        let mut rooms: Vec<Room> = Vec::with_capacity(target);

        for _ in 0..max_tries {
            if rooms.len() >= target {
                break;
            }

            let room_id = rooms.len() as u32;
            let Some(candidate) = self.generate_room_candidate(grid, config, rng, room_id) else {
                continue;
            };

            if rooms
                .iter()
                .any(|existing| candidate.overlaps_with_margin(existing, ROOM_BUFFER))
            {
                continue;
            }

            carve_room(grid, &candidate);
            rooms.push(candidate);
        }

        log::debug!("Placed {} of {} target rooms", rooms.len(), target);
        rooms
    }

    /// Draws a candidate room, or `None` when its size cannot fit the floor.
    fn generate_room_candidate(
        &self,
        grid: &Grid,
        config: &GenerationConfig,
        rng: &mut Mulberry32,
        room_id: u32,
    ) -> Option<Room> {
        let width = rng.range_inclusive(config.min_room_size as i32, config.max_room_size as i32);
        let height = rng.range_inclusive(config.min_room_size as i32, config.max_room_size as i32);

        let max_x = grid.width() as i32 - width - ROOM_BUFFER;
        let max_y = grid.height() as i32 - height - ROOM_BUFFER;
        if max_x < ROOM_BUFFER || max_y < ROOM_BUFFER {
            return None;
        }

        let x = rng.range_inclusive(ROOM_BUFFER, max_x);
        let y = rng.range_inclusive(ROOM_BUFFER, max_y);

        Some(Room::new(
            room_id,
            Position::new(x, y),
            width as u32,
            height as u32,
        ))
    }

    /// Replaces whatever was carved with one large room in the middle of the
    /// floor, roughly a third of each dimension.
    fn carve_fallback_room(&self, grid: &mut Grid) -> Room {
        let width = (grid.width() / 3).max(1);
        let height = (grid.height() / 3).max(1);
        let top_left = Position::new(
            ((grid.width() - width) / 2) as i32,
            ((grid.height() - height) / 2) as i32,
        );
        let room = Room::new(0, top_left, width, height);

        grid.fill(Tile::Wall);
        carve_room(grid, &room);
        room
    }

    /// Chains rooms in centre order, then adds random extra corridors.
    fn connect_rooms(
        &self,
        grid: &mut Grid,
        rooms: &mut [Room],
        config: &GenerationConfig,
        rng: &mut Mulberry32,
    ) {
        rooms.sort_by_key(|room| {
            let center = room.center();
            (center.x, center.y)
        });

        for pair in rooms.windows(2) {
            carve_corridor(grid, pair[0].center(), pair[1].center());
        }

        let extra = rng.range_inclusive(
            config.min_extra_corridors as i32,
            config.max_extra_corridors as i32,
        );
        for _ in 0..extra {
            let first = rng.index(rooms.len());
            let second = rng.index(rooms.len());
            if first == second {
                continue;
            }
            carve_corridor(grid, rooms[first].center(), rooms[second].center());
        }
    }
}

/// Carves a room's full rectangle.
fn carve_room(grid: &mut Grid, room: &Room) {
    let bottom_right = room.bottom_right();
    grid.carve_room(room.top_left.x, room.top_left.y, bottom_right.x, bottom_right.y);
}

fn carve_corridor(grid: &mut Grid, from: Position, to: Position) {
    grid.carve_corridor(from.x, from.y, to.x, to.y);
}

impl Generator<Level> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut Mulberry32) -> WarrenResult<Level> {
        config.validate()?;

        // Create empty level (all walls)
        let mut level = Level::new(config.width, config.height);

        let mut rooms = self.place_rooms(&mut level.grid, config, rng);

        if rooms.len() < config.fallback_threshold as usize {
            log::debug!(
                "Only {} rooms fit, carving a single fallback room",
                rooms.len()
            );
            rooms = vec![self.carve_fallback_room(&mut level.grid)];
        }

        self.connect_rooms(&mut level.grid, &mut rooms, config, rng);
        level.rooms = rooms;

        self.validate(&level, config)?;

        log::info!(
            "Generated {}x{} floor with {} rooms and {} floor tiles",
            level.width(),
            level.height(),
            level.rooms.len(),
            level.grid.floor_count()
        );
        Ok(level)
    }

    fn validate(&self, level: &Level, config: &GenerationConfig) -> WarrenResult<()> {
        let grid = &level.grid;
        if grid.tiles().len() != grid.width() as usize * grid.height() as usize {
            return Err(WarrenError::GenerationFailed(
                "Tile count does not match floor dimensions".to_string(),
            ));
        }

        if grid.floor_count() == 0 {
            return Err(WarrenError::GenerationFailed(
                "Level has no floor tiles".to_string(),
            ));
        }

        if config.ensure_connectivity && !grid.is_fully_connected() {
            return Err(WarrenError::GenerationFailed(
                "Level has unreachable floor tiles".to_string(),
            ));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u32) -> Level {
        RoomCorridorGenerator::new()
            .generate(&GenerationConfig::for_testing(32, 32), &mut Mulberry32::new(seed))
            .unwrap()
    }

    #[test]
    fn test_generation_produces_rooms() {
        let level = generate(12345);
        assert_eq!(level.width(), 32);
        assert_eq!(level.height(), 32);
        assert!(level.rooms.len() >= 3 || level.rooms.len() == 1);
        assert!(level.rooms.len() <= 10);
        assert!(level.grid.floor_count() > 0);
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate(777), generate(777));
    }

    #[test]
    fn test_rooms_stay_inside_margin() {
        for seed in 0..50 {
            let level = generate(seed);
            for room in &level.rooms {
                let bottom_right = room.bottom_right();
                assert!(room.top_left.x >= 1 && room.top_left.y >= 1);
                assert!(bottom_right.x <= 30 && bottom_right.y <= 30);
            }
            // The outer ring is never carved
            for x in 0..32 {
                assert_eq!(level.grid.get(x, 0), Tile::Wall);
                assert_eq!(level.grid.get(x, 31), Tile::Wall);
            }
        }
    }

    #[test]
    fn test_rooms_do_not_touch() {
        for seed in 0..50 {
            let level = generate(seed);
            for (i, a) in level.rooms.iter().enumerate() {
                for b in level.rooms.iter().skip(i + 1) {
                    assert!(!a.overlaps_with_margin(b, ROOM_BUFFER));
                }
            }
        }
    }

    #[test]
    fn test_rooms_are_chained_in_center_order() {
        let level = generate(4242);
        let centers: Vec<_> = level
            .rooms
            .iter()
            .map(|room| (room.center().x, room.center().y))
            .collect();
        let mut sorted = centers.clone();
        sorted.sort();
        assert_eq!(centers, sorted);
    }

    #[test]
    fn test_room_floor_is_carved() {
        let level = generate(99);
        for room in &level.rooms {
            let bottom_right = room.bottom_right();
            for y in room.top_left.y..=bottom_right.y {
                for x in room.top_left.x..=bottom_right.x {
                    assert_eq!(level.grid.get(x, y), Tile::Floor);
                }
            }
        }
    }

    #[test]
    fn test_fallback_room_on_cramped_floor() {
        // Rooms of 8 tiles can never fit a 10-wide floor twice with a buffer.
        let config = GenerationConfig {
            min_room_size: 8,
            max_room_size: 8,
            ..GenerationConfig::for_testing(10, 10)
        };
        let level = RoomCorridorGenerator::new()
            .generate(&config, &mut Mulberry32::new(3))
            .unwrap();

        assert_eq!(level.rooms.len(), 1);
        let room = &level.rooms[0];
        assert_eq!((room.width, room.height), (3, 3));
        assert_eq!(room.top_left, Position::new(3, 3));
        assert_eq!(level.grid.floor_count(), 9);
    }

    #[test]
    fn test_generated_levels_are_connected() {
        for seed in 0..100 {
            assert!(generate(seed).grid.is_fully_connected(), "seed {}", seed);
        }
    }

    #[test]
    fn test_validation() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::for_testing(10, 10);

        let mut level = Level::new(10, 10);
        level.grid.set(5, 5, Tile::Floor);
        assert!(generator.validate(&level, &config).is_ok());

        let empty_level = Level::new(10, 10);
        assert!(generator.validate(&empty_level, &config).is_err());

        level.grid.set(1, 1, Tile::Floor);
        assert!(generator.validate(&level, &config).is_err());
        assert!(generator
            .validate(&level, &GenerationConfig::new(10, 10))
            .is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GenerationConfig {
            min_rooms: 9,
            max_rooms: 2,
            ..GenerationConfig::default()
        };
        let result = RoomCorridorGenerator::new().generate(&config, &mut Mulberry32::new(1));
        assert!(matches!(result, Err(WarrenError::InvalidConfig(_))));
    }

    #[test]
    fn test_generator_type() {
        assert_eq!(RoomCorridorGenerator::new().generator_type(), "RoomCorridorGenerator");
    }
}
