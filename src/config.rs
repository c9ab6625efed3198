use std::time::Duration;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// The fixed play field.
pub const GRID: GridSize = GridSize {
    width: 30,
    height: 20,
};

/// Terminal columns drawn per logical cell, keeping cells roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Base tick interval in milliseconds (level 1).
pub const BASE_TICK_INTERVAL_MS: u64 = 200;

/// Tick interval reduction per level in milliseconds.
pub const LEVEL_TICK_STEP_MS: u64 = 20;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 10;

/// Score granted for every food item.
pub const FOOD_REWARD: u32 = 10;

/// Food needed to leave level 1.
pub const INITIAL_FOOD_TO_NEXT_LEVEL: u32 = 5;

/// Added to the food threshold on each level advance.
pub const FOOD_TO_NEXT_LEVEL_STEP: u32 = 2;

/// One in this many respawned foods carries a power-up.
pub const POWER_UP_CHANCE: u32 = 5;

/// Tick interval multiplier while speed boost is active.
pub const SPEED_BOOST_FACTOR: f32 = 0.7;

/// Instant bonus granted by extra points food.
pub const EXTRA_POINTS_AMOUNT: u32 = 50;

/// Extra segments granted by multi grow food.
pub const MULTI_GROW_SEGMENTS: u32 = 3;

/// Lifetime of speed boost and ghost mode.
pub const POWER_UP_DURATION: Duration = Duration::from_secs(5);

/// How long the extra points indicator stays active.
pub const EXTRA_POINTS_DURATION: Duration = Duration::from_secs(8);

/// Lifetime of invincibility.
pub const INVINCIBILITY_DURATION: Duration = Duration::from_secs(7);

/// Obstacles placed on level 1.
pub const BASE_OBSTACLES: usize = 3;

/// Obstacles added per level.
pub const OBSTACLES_PER_LEVEL: usize = 3;

/// Upper bound on obstacles regardless of level.
pub const MAX_OBSTACLES: usize = 40;

/// Cells within this Chebyshev distance of the spawn cell stay free of obstacles.
pub const SPAWN_SAFE_RADIUS: i32 = 2;

/// Driver frame pacing.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Tick interval for `level` before any power-up modifier.
#[must_use]
pub fn tick_interval_for_level(level: u32) -> Duration {
    let level_penalty_ms = u64::from(level.saturating_sub(1)) * LEVEL_TICK_STEP_MS;
    let clamped_ms = BASE_TICK_INTERVAL_MS
        .saturating_sub(level_penalty_ms)
        .max(MIN_TICK_INTERVAL_MS);
    Duration::from_millis(clamped_ms)
}

/// Number of obstacle cells placed on `level`.
#[must_use]
pub fn obstacle_count_for_level(level: u32) -> usize {
    let extra = usize::try_from(level.saturating_sub(1)).unwrap_or(usize::MAX);
    BASE_OBSTACLES
        .saturating_add(extra.saturating_mul(OBSTACLES_PER_LEVEL))
        .min(MAX_OBSTACLES)
}
