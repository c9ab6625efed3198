use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::{
    EXTRA_POINTS_DURATION, GridSize, INVINCIBILITY_DURATION, POWER_UP_CHANCE, POWER_UP_DURATION,
};
use crate::obstacles::ObstacleManager;
use crate::snake::{Position, Snake};

/// Special effect carried by some food.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    SpeedBoost,
    GhostMode,
    ExtraPoints,
    MultiGrow,
    Invincibility,
}

impl PowerUp {
    pub const ALL: [Self; 5] = [
        Self::SpeedBoost,
        Self::GhostMode,
        Self::ExtraPoints,
        Self::MultiGrow,
        Self::Invincibility,
    ];

    /// How long the effect stays active, or `None` for one-shot effects.
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::SpeedBoost | Self::GhostMode => Some(POWER_UP_DURATION),
            Self::ExtraPoints => Some(EXTRA_POINTS_DURATION),
            Self::Invincibility => Some(INVINCIBILITY_DURATION),
            Self::MultiGrow => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SpeedBoost => "Speed Boost",
            Self::GhostMode => "Ghost Mode",
            Self::ExtraPoints => "Extra Points",
            Self::MultiGrow => "Multi Grow",
            Self::Invincibility => "Invincibility",
        }
    }
}

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub power_up: Option<PowerUp>,
    last_eaten: Option<PowerUp>,
}

impl Food {
    /// Creates plain food at `position`.
    #[must_use]
    pub fn normal(position: Position) -> Self {
        Self {
            position,
            power_up: None,
            last_eaten: None,
        }
    }

    /// Creates food carrying `power_up` at `position`.
    #[must_use]
    pub fn with_power_up(position: Position, power_up: PowerUp) -> Self {
        Self {
            position,
            power_up: Some(power_up),
            last_eaten: None,
        }
    }

    /// Spawns plain food on a free cell. The first food of a level never
    /// carries a power-up.
    #[must_use]
    pub fn spawn_initial<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        obstacles: &ObstacleManager,
    ) -> Self {
        Self::normal(spawn_position(rng, bounds, snake, obstacles, None))
    }

    /// Returns true when `snake`'s head sits on the food.
    ///
    /// On a hit the food moves to a new free cell with a freshly rolled
    /// power-up, and the eaten kind stays available through
    /// [`Food::power_up_type`].
    pub fn check_eaten<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        obstacles: &ObstacleManager,
    ) -> bool {
        if snake.head() != self.position {
            return false;
        }

        self.last_eaten = self.power_up;
        self.position = spawn_position(rng, bounds, snake, obstacles, Some(self.position));
        self.power_up = roll_power_up(rng);
        true
    }

    /// Whether the most recently eaten food carried a power-up.
    #[must_use]
    pub fn is_power_up_food(&self) -> bool {
        self.last_eaten.is_some()
    }

    /// Kind carried by the most recently eaten food.
    #[must_use]
    pub fn power_up_type(&self) -> Option<PowerUp> {
        self.last_eaten
    }
}

/// Rolls the power-up for a respawned food.
pub fn roll_power_up<R: Rng + ?Sized>(rng: &mut R) -> Option<PowerUp> {
    if !rng.gen_ratio(1, POWER_UP_CHANCE) {
        return None;
    }

    PowerUp::ALL.choose(rng).copied()
}

/// Picks a uniformly random cell not covered by the snake, an obstacle or
/// `exclude`.
///
/// # Panics
///
/// Panics when no such cell exists; the grid is sized so this cannot happen
/// during play.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
    obstacles: &ObstacleManager,
    exclude: Option<Position>,
) -> Position {
    let mut candidates = Vec::with_capacity(bounds.total_cells());

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position)
                && !obstacles.contains(position)
                && exclude != Some(position)
            {
                candidates.push(position);
            }
        }
    }

    assert!(
        !candidates.is_empty(),
        "spawn_position: no free cells on the board ({}×{})",
        bounds.width,
        bounds.height,
    );

    let index = rng.gen_range(0..candidates.len());
    candidates[index]
}
