//! # World Representation
//!
//! Tiles, the flat tile grid and the generated level value.
//!
//! The grid never fails on out-of-bounds access: reads outside the map see
//! a wall and writes outside the map are dropped. Carving primitives build
//! on that, so callers can carve near the edge without clipping by hand.

use crate::generation::Room;
use crate::Position;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// The two kinds of terrain on a floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Blocks movement
    Wall,
    /// Walkable ground
    Floor,
}

impl Tile {
    /// Checks if actors can stand on this tile.
    pub fn is_walkable(self) -> bool {
        self == Tile::Floor
    }
}

/// Flat row-major tile array.
///
/// # Examples
///
/// ```
/// use warren::{Grid, Tile};
///
/// let mut grid = Grid::new(10, 10);
/// grid.carve_room(2, 2, 7, 7);
/// assert_eq!(grid.get(2, 2), Tile::Floor);
/// assert_eq!(grid.get(0, 0), Tile::Wall);
/// assert_eq!(grid.get(-5, 40), Tile::Wall);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid filled with walls.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Wall; width as usize * height as usize],
        }
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major tile slice, `width * height` long.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Checks whether a coordinate lies inside the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Row-major index of an in-bounds coordinate.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Reads a tile; anything outside the grid is a wall.
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.index(x, y)
            .map(|idx| self.tiles[idx])
            .unwrap_or(Tile::Wall)
    }

    /// Writes a tile; writes outside the grid are ignored.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(idx) = self.index(x, y) {
            self.tiles[idx] = tile;
        }
    }

    /// Reads the tile at a position.
    pub fn tile_at(&self, pos: Position) -> Tile {
        self.get(pos.x, pos.y)
    }

    /// Checks if a position is an in-bounds floor tile.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile_at(pos).is_walkable()
    }

    /// Overwrites every tile.
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Sets the inclusive rectangle `(x0, y0)..=(x1, y1)` to floor.
    pub fn carve_room(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(x, y, Tile::Floor);
            }
        }
    }

    /// Carves an L-shaped corridor: along row `y0` from `x0` to `x1`, then
    /// along column `x1` from `y0` to `y1`. Both endpoints end up floor.
    pub fn carve_corridor(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.set(x, y0, Tile::Floor);
        }
        for y in y0.min(y1)..=y0.max(y1) {
            self.set(x1, y, Tile::Floor);
        }
    }

    /// Counts floor tiles.
    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_walkable()).count()
    }

    /// Iterates over the positions of all floor tiles in row-major order.
    pub fn floor_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as usize;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_walkable())
            .map(move |(idx, _)| Position::new((idx % width) as i32, (idx / width) as i32))
    }

    /// Checks that every floor tile can reach every other one through
    /// cardinal steps. An all-wall grid counts as connected.
    pub fn is_fully_connected(&self) -> bool {
        let Some(start) = self.floor_positions().next() else {
            return true;
        };

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            for adjacent_pos in pos.cardinal_adjacent_positions() {
                if self.is_walkable(adjacent_pos) && visited.insert(adjacent_pos) {
                    queue.push_back(adjacent_pos);
                }
            }
        }

        visited.len() == self.floor_count()
    }
}

/// A generated floor: the carved grid plus the rooms it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Carved tiles
    pub grid: Grid,
    /// Rooms in corridor-chaining order
    pub rooms: Vec<Room>,
}

impl Level {
    /// Creates an all-wall level without rooms.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            rooms: Vec::new(),
        }
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_walls() {
        let grid = Grid::new(12, 7);
        assert_eq!(grid.tiles().len(), 12 * 7);
        assert!(grid.tiles().iter().all(|&tile| tile == Tile::Wall));
        assert_eq!(grid.floor_count(), 0);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = Grid::new(5, 5);
        grid.fill(Tile::Floor);
        assert_eq!(grid.get(-1, 0), Tile::Wall);
        assert_eq!(grid.get(0, 5), Tile::Wall);
        assert_eq!(grid.get(5, 0), Tile::Wall);

        grid.set(5, 5, Tile::Wall);
        grid.set(-1, -1, Tile::Wall);
        assert_eq!(grid.floor_count(), 25);
    }

    #[test]
    fn test_index_is_row_major() {
        let grid = Grid::new(10, 4);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(1, 0), Some(1));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(10, 0), None);
    }

    #[test]
    fn test_carve_room_inclusive() {
        let mut grid = Grid::new(10, 10);
        grid.carve_room(2, 2, 7, 7);
        assert_eq!(grid.get(2, 2), Tile::Floor);
        assert_eq!(grid.get(7, 7), Tile::Floor);
        assert_eq!(grid.get(1, 2), Tile::Wall);
        assert_eq!(grid.get(8, 7), Tile::Wall);
        assert_eq!(grid.floor_count(), 36);
    }

    #[test]
    fn test_carving_is_idempotent() {
        let mut once = Grid::new(16, 16);
        once.carve_room(3, 4, 9, 8);
        once.carve_corridor(1, 1, 14, 12);

        let mut twice = once.clone();
        twice.carve_room(3, 4, 9, 8);
        twice.carve_corridor(1, 1, 14, 12);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_corridor_shape() {
        let mut grid = Grid::new(20, 20);
        grid.carve_corridor(15, 3, 4, 12);

        // Horizontal run on the starting row
        for x in 4..=15 {
            assert_eq!(grid.get(x, 3), Tile::Floor);
        }
        // Vertical run on the ending column
        for y in 3..=12 {
            assert_eq!(grid.get(4, y), Tile::Floor);
        }
        assert_eq!(grid.get(15, 12), Tile::Wall);
        assert_eq!(grid.floor_count(), 12 + 10 - 1);
    }

    #[test]
    fn test_corridor_degenerate_points() {
        let mut grid = Grid::new(8, 8);
        grid.carve_corridor(3, 3, 3, 3);
        assert_eq!(grid.floor_count(), 1);
        assert_eq!(grid.get(3, 3), Tile::Floor);
    }

    #[test]
    fn test_connectivity_check() {
        let mut grid = Grid::new(20, 10);
        grid.carve_room(1, 1, 4, 4);
        grid.carve_room(10, 1, 14, 4);
        assert!(!grid.is_fully_connected());

        grid.carve_corridor(2, 2, 12, 2);
        assert!(grid.is_fully_connected());
    }

    #[test]
    fn test_floor_positions_order() {
        let mut grid = Grid::new(4, 4);
        grid.set(2, 0, Tile::Floor);
        grid.set(1, 3, Tile::Floor);
        let positions: Vec<_> = grid.floor_positions().collect();
        assert_eq!(positions, vec![Position::new(2, 0), Position::new(1, 3)]);
    }
}
