//! Random start placement.

use pursuit_core::{Grid, Position, PursuitError, Result};
use rand::Rng;

/// Draw `count` distinct free cells with pairwise Manhattan distance of at
/// least `min_distance`.
///
/// The first cell is uniform over the free cells. Every later candidate is
/// uniform too and is rejected while it sits too close to an accepted one.
///
/// # Errors
/// - [`PursuitError::NotEnoughFreeCells`] if the grid has fewer than `count`
///   free cells.
/// - [`PursuitError::StartSamplingFailed`] if `max_attempts` candidates were
///   rejected before all positions were placed.
pub fn sample_start_positions<R: Rng + ?Sized>(
    grid: &Grid,
    count: usize,
    min_distance: u32,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Vec<Position>> {
    let free: Vec<Position> = grid.free_cells().collect();
    if free.len() < count {
        return Err(PursuitError::NotEnoughFreeCells {
            needed: count,
            available: free.len(),
        });
    }

    let mut selected = Vec::with_capacity(count);
    if count == 0 {
        return Ok(selected);
    }
    selected.push(free[rng.gen_range(0..free.len())]);

    let mut attempts = 0;
    while selected.len() < count {
        if attempts >= max_attempts {
            return Err(PursuitError::StartSamplingFailed { attempts });
        }
        attempts += 1;

        let candidate = free[rng.gen_range(0..free.len())];
        let spaced = selected
            .iter()
            .all(|p| p.manhattan(candidate) >= min_distance && *p != candidate);
        if spaced {
            selected.push(candidate);
        }
    }

    Ok(selected)
}
