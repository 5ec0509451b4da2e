//! # Spawn Sampling
//!
//! Picks free floor tiles for the player, enemies and items.
//!
//! Positions are drawn uniformly over the whole floor and rejected until a
//! free floor tile turns up. Pure rejection sampling never terminates on a
//! floor without a free tile, so the number of draws is bounded: once the
//! bound is spent, the sampler scans the floor row by row and takes the first
//! free tile it finds.

use crate::{Grid, Mulberry32, Position, WarrenError, WarrenResult};

/// Finds a free floor tile.
///
/// `is_occupied` decides which floor tiles are taken. With
/// `max_attempts == None` the sampler draws until it succeeds, which hangs
/// when no free tile exists.
///
/// # Examples
///
/// ```
/// use warren::{find_free_position, Grid, Mulberry32, Position};
///
/// let mut grid = Grid::new(10, 10);
/// grid.carve_room(2, 2, 4, 4);
/// let taken = Position::new(3, 3);
///
/// let pos = find_free_position(&grid, &mut Mulberry32::new(9), Some(1_000), |p| p == taken)
///     .unwrap();
/// assert!(grid.is_walkable(pos));
/// assert_ne!(pos, taken);
/// ```
pub fn find_free_position<F>(
    grid: &Grid,
    rng: &mut Mulberry32,
    max_attempts: Option<u32>,
    is_occupied: F,
) -> WarrenResult<Position>
where
    F: Fn(Position) -> bool,
{
    let is_free = |pos: Position| grid.is_walkable(pos) && !is_occupied(pos);
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    let mut attempts: u32 = 0;
    while max_attempts.map_or(true, |limit| attempts < limit) {
        attempts = attempts.saturating_add(1);
        let x = rng.index(width) as i32;
        let y = rng.index(height) as i32;
        let pos = Position::new(x, y);
        if is_free(pos) {
            return Ok(pos);
        }
    }

    log::debug!(
        "Spawn sampling gave up after {} draws, scanning for a free tile",
        attempts
    );
    grid.floor_positions()
        .find(|&pos| is_free(pos))
        .ok_or(WarrenError::NoFreeTile { attempts })
}
