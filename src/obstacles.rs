use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{GridSize, SPAWN_SAFE_RADIUS, obstacle_count_for_level};
use crate::snake::Position;

/// Static blocking cells for the current level.
#[derive(Debug, Clone)]
pub struct ObstacleManager {
    cells: HashSet<Position>,
    bounds: GridSize,
}

impl ObstacleManager {
    /// Creates an empty manager; call [`ObstacleManager::reset`] to populate it.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self {
            cells: HashSet::new(),
            bounds,
        }
    }

    /// Creates a manager with a fixed layout.
    #[must_use]
    pub fn from_cells(bounds: GridSize, cells: impl IntoIterator<Item = Position>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            bounds,
        }
    }

    /// Replaces the layout with a fresh one sized for `level`.
    ///
    /// Cells near `spawn` are never used so the first moves after a reset
    /// are always safe.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, level: u32, spawn: Position) {
        self.cells.clear();

        let candidates: Vec<Position> = (0..i32::from(self.bounds.height))
            .flat_map(|y| (0..i32::from(self.bounds.width)).map(move |x| Position { x, y }))
            .filter(|cell| cell.chebyshev_distance(spawn) > SPAWN_SAFE_RADIUS)
            .collect();

        let count = obstacle_count_for_level(level).min(candidates.len());
        self.cells
            .extend(candidates.choose_multiple(rng, count).copied());

        log::debug!("placed {} obstacles for level {level}", self.cells.len());
    }

    /// Returns true when `position` is blocked.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    /// Read-only view of every blocked cell.
    #[must_use]
    pub fn cells(&self) -> &HashSet<Position> {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::{GRID, MAX_LEVEL, SPAWN_SAFE_RADIUS, obstacle_count_for_level};
    use crate::snake::Position;

    use super::ObstacleManager;

    const SPAWN: Position = Position { x: 15, y: 10 };

    #[test]
    fn reset_places_level_sized_layout() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut obstacles = ObstacleManager::new(GRID);

        for level in 1..=MAX_LEVEL {
            obstacles.reset(&mut rng, level, SPAWN);
            assert_eq!(obstacles.len(), obstacle_count_for_level(level));
        }
    }

    #[test]
    fn reset_keeps_spawn_area_clear_and_stays_in_grid() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut obstacles = ObstacleManager::new(GRID);

        for _ in 0..50 {
            obstacles.reset(&mut rng, MAX_LEVEL, SPAWN);
            for cell in obstacles.cells() {
                assert!(cell.is_within_bounds(GRID));
                assert!(cell.chebyshev_distance(SPAWN) > SPAWN_SAFE_RADIUS);
            }
        }
    }

    #[test]
    fn reset_discards_previous_layout() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut obstacles = ObstacleManager::from_cells(GRID, [Position { x: 15, y: 10 }]);

        obstacles.reset(&mut rng, 1, SPAWN);

        assert!(!obstacles.contains(Position { x: 15, y: 10 }));
        assert_eq!(obstacles.len(), obstacle_count_for_level(1));
    }
}
