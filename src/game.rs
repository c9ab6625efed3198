use std::time::Duration;

use log::{debug, info, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::{
    EXTRA_POINTS_AMOUNT, FOOD_REWARD, FOOD_TO_NEXT_LEVEL_STEP, GRID, GridSize,
    INITIAL_FOOD_TO_NEXT_LEVEL, MAX_LEVEL, MULTI_GROW_SEGMENTS, SPEED_BOOST_FACTOR,
    tick_interval_for_level,
};
use crate::food::{Food, PowerUp};
use crate::input::{Direction, GameInput};
use crate::obstacles::ObstacleManager;
use crate::snake::{Collision, Position, Snake};

/// Current high-level gameplay mode.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameMode {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Events that can move the game between modes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ModeEvent {
    Start,
    TogglePause,
    Restart,
    LethalCollision,
}

impl GameMode {
    /// Transition table. `None` means the event is ignored in this mode.
    #[must_use]
    pub fn next(self, event: ModeEvent) -> Option<Self> {
        match (self, event) {
            (Self::Menu, ModeEvent::Start) => Some(Self::Playing),
            (Self::Playing, ModeEvent::TogglePause) => Some(Self::Paused),
            (Self::Paused, ModeEvent::TogglePause) => Some(Self::Playing),
            (Self::Playing, ModeEvent::LethalCollision) => Some(Self::GameOver),
            (Self::GameOver, ModeEvent::Restart) => Some(Self::Playing),
            _ => None,
        }
    }
}

/// A timed power-up currently in effect.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ActivePowerUp {
    pub kind: PowerUp,
    pub remaining: Duration,
}

/// Read-only summary handed to the presentation layer and to logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub score: u32,
    pub level: u32,
    pub food_collected: u32,
    pub food_to_next_level: u32,
    pub snake_head: Position,
    pub snake_length: usize,
    pub food: Position,
    pub food_power_up: Option<PowerUp>,
    pub obstacle_count: usize,
    pub active_power_up: Option<PowerUp>,
    pub power_up_remaining_ms: u64,
    pub waiting_for_input: bool,
    pub death_reason: Option<Collision>,
    pub ticks: u64,
}

/// Complete mutable game state for one process run.
///
/// Owns every entity plus the RNG. Lifecycle: built once in menu mode,
/// reset on every new game and level transition, mutated once per frame
/// through [`GameState::update`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub obstacles: ObstacleManager,
    mode: GameMode,
    score: u32,
    level: u32,
    food_collected: u32,
    food_to_next_level: u32,
    active_power_up: Option<ActivePowerUp>,
    tick_interval: Duration,
    move_timer: Duration,
    waiting_for_input: bool,
    previous_snake_len: usize,
    death_reason: Option<Collision>,
    absorbed_collisions: u32,
    tick_count: u64,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates the game on the standard grid.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::new_with_seed(GRID, seed)
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let start = Position {
            x: i32::from(bounds.width / 2),
            y: i32::from(bounds.height / 2),
        };
        let snake = Snake::new(start, Direction::Right);
        let mut obstacles = ObstacleManager::new(bounds);
        obstacles.reset(&mut rng, 1, start);
        let food = Food::spawn_initial(&mut rng, bounds, &snake, &obstacles);

        Self {
            snake,
            food,
            obstacles,
            mode: GameMode::Menu,
            score: 0,
            level: 1,
            food_collected: 0,
            food_to_next_level: INITIAL_FOOD_TO_NEXT_LEVEL,
            active_power_up: None,
            tick_interval: tick_interval_for_level(1),
            move_timer: Duration::ZERO,
            waiting_for_input: true,
            previous_snake_len: 1,
            death_reason: None,
            absorbed_collisions: 0,
            tick_count: 0,
            bounds,
            rng,
        }
    }

    /// Runs one driver iteration: power-up expiry, mode inputs, direction
    /// inputs, then the movement gate.
    pub fn update(&mut self, elapsed: Duration, inputs: &[GameInput]) {
        self.update_power_up(elapsed);

        let (directions, mode_inputs): (Vec<GameInput>, Vec<GameInput>) = inputs
            .iter()
            .partition(|input| matches!(input, GameInput::Direction(_)));
        for input in mode_inputs.into_iter().chain(directions) {
            self.apply_input(input);
        }

        self.advance_clock(elapsed);
    }

    /// Counts down the active power-up; only time spent playing counts.
    pub fn update_power_up(&mut self, elapsed: Duration) {
        if self.mode != GameMode::Playing {
            return;
        }

        let Some(active) = self.active_power_up.as_mut() else {
            return;
        };

        active.remaining = active.remaining.saturating_sub(elapsed);
        if active.remaining.is_zero() {
            self.clear_power_up();
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Start => {
                if self.transition(ModeEvent::Start) {
                    self.start_new_game();
                }
            }
            GameInput::Restart => {
                if self.transition(ModeEvent::Restart) {
                    self.start_new_game();
                }
            }
            GameInput::Pause => {
                self.transition(ModeEvent::TogglePause);
            }
            GameInput::Direction(direction) => {
                if self.mode == GameMode::Playing {
                    self.steer(direction);
                } else {
                    trace!("ignoring {direction:?} while {:?}", self.mode);
                }
            }
            GameInput::Quit => {}
        }
    }

    /// Advances simulation by one movement step.
    pub fn tick(&mut self) {
        if self.mode != GameMode::Playing || self.waiting_for_input {
            return;
        }

        self.tick_count += 1;
        self.snake.move_forward(self.bounds);

        if let Some(collision) = self.snake.check_collision(self.bounds, &self.obstacles) {
            if self.snake.is_invincible() {
                self.absorbed_collisions += 1;
                debug!("{collision:?} collision absorbed by invincibility");
            } else {
                self.death_reason = Some(collision);
                self.transition(ModeEvent::LethalCollision);
                self.log_final_snapshot();
                return;
            }
        }

        if self
            .food
            .check_eaten(&mut self.rng, self.bounds, &self.snake, &self.obstacles)
        {
            self.on_food_eaten();
        }
    }

    fn transition(&mut self, event: ModeEvent) -> bool {
        match self.mode.next(event) {
            Some(next) => {
                info!("mode {:?} -> {next:?} on {event:?}", self.mode);
                self.mode = next;
                true
            }
            None => {
                trace!("ignoring {event:?} while {:?}", self.mode);
                false
            }
        }
    }

    fn steer(&mut self, direction: Direction) {
        if !self.waiting_for_input {
            self.snake.set_direction(direction);
            return;
        }

        self.snake.force_direction(direction);
        if self.previous_snake_len > 1 {
            let regrow = u32::try_from(self.previous_snake_len - 1).unwrap_or(u32::MAX);
            self.snake.grow(regrow);
        }
        self.waiting_for_input = false;
        self.move_timer = Duration::ZERO;
    }

    /// Paused keeps the accumulated time; every other idle state drops it.
    fn advance_clock(&mut self, elapsed: Duration) {
        if self.mode == GameMode::Paused {
            return;
        }

        if self.mode != GameMode::Playing || self.waiting_for_input {
            self.move_timer = Duration::ZERO;
            return;
        }

        self.move_timer += elapsed;
        if self.move_timer >= self.tick_interval {
            self.move_timer = (self.move_timer - self.tick_interval).min(self.tick_interval);
            self.tick();
        }
    }

    fn on_food_eaten(&mut self) {
        if let Some(kind) = self.food.power_up_type() {
            self.activate_power_up(kind);
        }

        self.score += FOOD_REWARD;
        self.snake.grow(1);
        self.food_collected += 1;

        if self.food_collected >= self.food_to_next_level && self.level < MAX_LEVEL {
            self.advance_level();
        }
    }

    fn activate_power_up(&mut self, kind: PowerUp) {
        debug!("power-up {} activated", kind.label());

        if kind == PowerUp::MultiGrow {
            self.snake.grow(MULTI_GROW_SEGMENTS);
            return;
        }

        self.clear_power_up();
        match kind {
            PowerUp::SpeedBoost => {
                self.tick_interval = self.tick_interval.mul_f32(SPEED_BOOST_FACTOR);
            }
            PowerUp::GhostMode => self.snake.set_ghost_mode(true),
            PowerUp::ExtraPoints => self.score += EXTRA_POINTS_AMOUNT,
            PowerUp::Invincibility => self.snake.set_invincible(true),
            PowerUp::MultiGrow => {}
        }

        self.active_power_up = kind
            .duration()
            .map(|remaining| ActivePowerUp { kind, remaining });
    }

    /// Ends the active power-up and falls back to the level speed.
    fn clear_power_up(&mut self) {
        let Some(active) = self.active_power_up.take() else {
            return;
        };

        match active.kind {
            PowerUp::GhostMode => self.snake.set_ghost_mode(false),
            PowerUp::Invincibility => self.snake.set_invincible(false),
            PowerUp::SpeedBoost | PowerUp::ExtraPoints | PowerUp::MultiGrow => {}
        }
        self.tick_interval = tick_interval_for_level(self.level);

        debug!("power-up {} ended", active.kind.label());
    }

    fn advance_level(&mut self) {
        self.level += 1;
        self.food_collected = 0;
        self.food_to_next_level += FOOD_TO_NEXT_LEVEL_STEP;
        self.previous_snake_len = self.snake.len();

        if let Some(active) = self.active_power_up {
            debug!(
                "power-up {} forfeited by advancing to level {}",
                active.kind.label(),
                self.level
            );
        }
        self.clear_power_up();
        self.tick_interval = tick_interval_for_level(self.level);
        self.reset_board();

        info!(
            "level {} reached, {} food to next level",
            self.level, self.food_to_next_level
        );
    }

    fn start_new_game(&mut self) {
        self.active_power_up = None;
        self.score = 0;
        self.level = 1;
        self.food_collected = 0;
        self.food_to_next_level = INITIAL_FOOD_TO_NEXT_LEVEL;
        self.tick_interval = tick_interval_for_level(1);
        self.previous_snake_len = 1;
        self.death_reason = None;
        self.absorbed_collisions = 0;
        self.tick_count = 0;
        self.reset_board();
    }

    fn reset_board(&mut self) {
        self.obstacles
            .reset(&mut self.rng, self.level, self.snake.spawn());
        self.snake.reset();
        self.food = Food::spawn_initial(&mut self.rng, self.bounds, &self.snake, &self.obstacles);
        self.waiting_for_input = true;
        self.move_timer = Duration::ZERO;
    }

    fn log_final_snapshot(&self) {
        if !log::log_enabled!(log::Level::Info) {
            return;
        }

        match serde_json::to_string(&self.snapshot()) {
            Ok(json) => info!("game over: {json}"),
            Err(error) => warn!("could not serialize final snapshot: {error}"),
        }
    }

    /// Captures the driver-facing view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            mode: self.mode,
            score: self.score,
            level: self.level,
            food_collected: self.food_collected,
            food_to_next_level: self.food_to_next_level,
            snake_head: self.snake.head(),
            snake_length: self.snake.len(),
            food: self.food.position,
            food_power_up: self.food.power_up,
            obstacle_count: self.obstacles.len(),
            active_power_up: self.active_power_up.map(|active| active.kind),
            power_up_remaining_ms: self
                .active_power_up
                .map_or(0, |active| {
                    u64::try_from(active.remaining.as_millis()).unwrap_or(u64::MAX)
                }),
            waiting_for_input: self.waiting_for_input,
            death_reason: self.death_reason,
            ticks: self.tick_count,
        }
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn food_collected(&self) -> u32 {
        self.food_collected
    }

    #[must_use]
    pub fn food_to_next_level(&self) -> u32 {
        self.food_to_next_level
    }

    #[must_use]
    pub fn active_power_up(&self) -> Option<ActivePowerUp> {
        self.active_power_up
    }

    /// Current interval between moves, including any speed boost.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn is_waiting_for_input(&self) -> bool {
        self.waiting_for_input
    }

    /// Length the snake regrows to on the first move of a level.
    #[must_use]
    pub fn previous_snake_len(&self) -> usize {
        self.previous_snake_len
    }

    #[must_use]
    pub fn is_invincible(&self) -> bool {
        self.snake.is_invincible()
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<Collision> {
        self.death_reason
    }

    /// Collisions ignored because invincibility was active.
    #[must_use]
    pub fn absorbed_collisions(&self) -> u32 {
        self.absorbed_collisions
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}
