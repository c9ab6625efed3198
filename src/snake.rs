use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};
use crate::obstacles::ObstacleManager;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance between two cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// What the head ran into on the last move.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Collision {
    Wall,
    Body,
    Obstacle,
}

/// Mutable snake state, movement buffering and ability flags.
///
/// `occupied` mirrors `body` as a multiset so overlap checks stay O(1) even
/// while ghost mode lets the head pass over its own segments.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    occupied: HashMap<Position, u16>,
    direction: Direction,
    buffered_direction: Direction,
    next_buffered_direction: Option<Direction>,
    pending_growth: u32,
    ghost: bool,
    invincible: bool,
    /// Set when the last move crossed the edge under invincibility alone.
    wall_absorbed: bool,
    spawn: Position,
    spawn_direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    ///
    /// `start` and `direction` become the spawn used by [`Snake::reset`].
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The head becomes the spawn cell.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        let spawn = segments[0];
        let mut snake = Self {
            body: VecDeque::with_capacity(segments.len()),
            occupied: HashMap::with_capacity(segments.len()),
            direction,
            buffered_direction: direction,
            next_buffered_direction: None,
            pending_growth: 0,
            ghost: false,
            invincible: false,
            wall_absorbed: false,
            spawn,
            spawn_direction: direction,
        };

        for segment in segments {
            snake.body.push_back(segment);
            snake.occupy(segment);
        }

        snake
    }

    /// Restores the one-cell spawn body and clears growth and abilities.
    pub fn reset(&mut self) {
        *self = Self::new(self.spawn, self.spawn_direction);
    }

    /// Queues `segments` extra cells, consumed one per move.
    pub fn grow(&mut self, segments: u32) {
        self.pending_growth = self.pending_growth.saturating_add(segments);
    }

    /// Applies one buffered movement step.
    ///
    /// Leaving the grid wraps to the opposite edge while ghost mode or
    /// invincibility is active; otherwise the head is left outside. Either
    /// way [`Snake::check_collision`] reports the wall hit unless ghost mode
    /// is on.
    pub fn move_forward(&mut self, bounds: GridSize) {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        self.direction = self.buffered_direction;
        let mut next_head = self.next_head_position();
        let left_grid = !next_head.is_within_bounds(bounds);
        if left_grid && (self.ghost || self.invincible) {
            next_head = next_head.wrapped(bounds);
        }
        self.wall_absorbed = left_grid && self.invincible && !self.ghost;

        if let Some(next) = self.next_buffered_direction.take() {
            self.buffered_direction = next;
        }

        self.body.push_front(next_head);
        self.occupy(next_head);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else if let Some(tail) = self.body.pop_back() {
            self.vacate(tail);
        }
    }

    /// Returns the head position for the next movement tick.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().stepped(self.buffered_direction)
    }

    /// Buffers the next direction, supporting a two-deep queue for quick turns.
    ///
    /// When no turn is queued yet, the direction is stored as the primary
    /// buffered direction (rejecting reversals of the current direction).
    /// When a turn is already queued, a second direction is stored with
    /// last-input-wins semantics (rejecting reversals of the queued one).
    /// A one-cell snake cannot hit itself, so it turns freely.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.body.len() <= 1 {
            self.buffered_direction = direction;
            self.next_buffered_direction = None;
            return;
        }

        if self.buffered_direction == self.direction {
            if !direction_change_is_valid(self.direction, direction) {
                return;
            }
            self.buffered_direction = direction;
        } else {
            if !direction_change_is_valid(self.buffered_direction, direction) {
                return;
            }
            self.next_buffered_direction = Some(direction);
        }
    }

    /// Overrides heading and drops any queued turn, bypassing the reversal guard.
    pub fn force_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.buffered_direction = direction;
        self.next_buffered_direction = None;
    }

    /// Reports what the head hit after the last move, if anything.
    ///
    /// Ghost mode hides body and obstacle hits. Invincibility does not hide
    /// anything; the caller decides whether a hit ends the game.
    #[must_use]
    pub fn check_collision(
        &self,
        bounds: GridSize,
        obstacles: &ObstacleManager,
    ) -> Option<Collision> {
        let head = self.head();
        if self.wall_absorbed || !head.is_within_bounds(bounds) {
            return Some(Collision::Wall);
        }

        if self.ghost {
            return None;
        }

        if self.head_overlaps_body() {
            return Some(Collision::Body);
        }

        if obstacles.contains(head) {
            return Some(Collision::Obstacle);
        }

        None
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.occupied.contains_key(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        self.occupied.get(&self.head()).is_some_and(|count| *count > 1)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    #[must_use]
    pub fn spawn(&self) -> Position {
        self.spawn
    }

    pub fn set_ghost_mode(&mut self, enabled: bool) {
        self.ghost = enabled;
    }

    #[must_use]
    pub fn is_ghost(&self) -> bool {
        self.ghost
    }

    pub fn set_invincible(&mut self, enabled: bool) {
        self.invincible = enabled;
    }

    #[must_use]
    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> std::collections::vec_deque::Iter<'_, Position> {
        self.body.iter()
    }

    fn occupy(&mut self, position: Position) {
        *self.occupied.entry(position).or_insert(0) += 1;
    }

    fn vacate(&mut self, position: Position) {
        if let Entry::Occupied(mut entry) = self.occupied.entry(position) {
            *entry.get_mut() -= 1;
            if *entry.get() == 0 {
                entry.remove();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::obstacles::ObstacleManager;

    use super::{Collision, Position, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 40,
        height: 20,
    };

    fn line(len: i32, head_x: i32, y: i32) -> Snake {
        let segments = (0..len).map(|i| Position { x: head_x - i, y }).collect();
        Snake::from_segments(segments, Direction::Right)
    }

    fn no_obstacles() -> ObstacleManager {
        ObstacleManager::new(BOUNDS)
    }

    #[test]
    fn position_wrapping_keeps_coordinates_inside_bounds() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert_eq!(Position { x: -1, y: 3 }.wrapped(bounds), Position { x: 9, y: 3 });
        assert_eq!(Position { x: 4, y: 8 }.wrapped(bounds), Position { x: 4, y: 0 });
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.move_forward(BOUNDS);

        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 1);
        assert!(!snake.occupies(Position { x: 5, y: 5 }));
    }

    #[test]
    fn grow_n_adds_exactly_n_segments() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.grow(3);
        assert_eq!(snake.len(), 1);

        for expected in 2..=4 {
            snake.move_forward(BOUNDS);
            assert_eq!(snake.len(), expected);
        }

        snake.move_forward(BOUNDS);
        snake.move_forward(BOUNDS);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.pending_growth(), 0);
    }

    #[test]
    fn reversal_is_ignored_for_long_snake() {
        let mut snake = line(3, 5, 5);

        snake.set_direction(Direction::Left);
        snake.move_forward(BOUNDS);

        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Position { x: 6, y: 5 });
    }

    #[test]
    fn single_cell_snake_may_reverse() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.set_direction(Direction::Left);
        snake.move_forward(BOUNDS);

        assert_eq!(snake.head(), Position { x: 4, y: 5 });
    }

    #[test]
    fn force_direction_bypasses_guard() {
        let mut snake = line(3, 5, 5);

        snake.force_direction(Direction::Left);

        assert_eq!(snake.direction(), Direction::Left);
        assert_eq!(snake.next_head_position(), Position { x: 4, y: 5 });
    }

    #[test]
    fn direction_buffer_two_deep_queue() {
        let mut snake = line(3, 5, 5);

        snake.set_direction(Direction::Up);
        snake.set_direction(Direction::Left);

        snake.move_forward(BOUNDS);
        assert_eq!(snake.head(), Position { x: 5, y: 4 });

        snake.move_forward(BOUNDS);
        assert_eq!(snake.head(), Position { x: 4, y: 4 });
    }

    #[test]
    fn direction_buffer_rejects_reversal_of_queued_direction() {
        let mut snake = line(3, 5, 5);

        snake.set_direction(Direction::Up);
        snake.set_direction(Direction::Down);

        assert!(snake.next_buffered_direction.is_none());
    }

    #[test]
    fn leaving_grid_is_a_wall_hit() {
        let mut snake = Snake::new(Position { x: 39, y: 3 }, Direction::Right);

        snake.move_forward(BOUNDS);

        assert_eq!(
            snake.check_collision(BOUNDS, &no_obstacles()),
            Some(Collision::Wall)
        );
    }

    #[test]
    fn ghost_wraps_at_edge() {
        let mut snake = Snake::new(Position { x: 39, y: 3 }, Direction::Right);
        snake.set_ghost_mode(true);

        snake.move_forward(BOUNDS);

        assert_eq!(snake.head(), Position { x: 0, y: 3 });
        assert_eq!(snake.check_collision(BOUNDS, &no_obstacles()), None);
    }

    #[test]
    fn invincible_wrap_still_reports_wall() {
        let mut snake = Snake::new(Position { x: 39, y: 3 }, Direction::Right);
        snake.set_invincible(true);

        snake.move_forward(BOUNDS);
        assert_eq!(snake.head(), Position { x: 0, y: 3 });
        assert_eq!(
            snake.check_collision(BOUNDS, &no_obstacles()),
            Some(Collision::Wall)
        );

        snake.move_forward(BOUNDS);
        assert_eq!(snake.check_collision(BOUNDS, &no_obstacles()), None);
    }

    #[test]
    fn following_the_tail_is_safe() {
        // Square loop: head moves into the cell the tail vacates this tick.
        let mut snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
            ],
            Direction::Left,
        );

        snake.move_forward(BOUNDS);

        assert_eq!(snake.head(), Position { x: 1, y: 2 });
        assert_eq!(snake.check_collision(BOUNDS, &no_obstacles()), None);
    }

    #[test]
    fn self_hit_is_detected_and_ghost_hides_it() {
        let segments = vec![
            Position { x: 2, y: 2 },
            Position { x: 1, y: 2 },
            Position { x: 1, y: 3 },
            Position { x: 2, y: 3 },
            Position { x: 3, y: 3 },
            Position { x: 3, y: 2 },
        ];

        let mut snake = Snake::from_segments(segments.clone(), Direction::Left);
        snake.move_forward(BOUNDS);
        assert_eq!(
            snake.check_collision(BOUNDS, &no_obstacles()),
            Some(Collision::Body)
        );

        let mut ghost = Snake::from_segments(segments, Direction::Left);
        ghost.set_ghost_mode(true);
        ghost.move_forward(BOUNDS);
        assert_eq!(ghost.check_collision(BOUNDS, &no_obstacles()), None);
        assert_eq!(ghost.len(), 6);
    }

    #[test]
    fn obstacle_hit_is_detected_unless_ghost() {
        let obstacles = ObstacleManager::from_cells(BOUNDS, [Position { x: 6, y: 5 }]);
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);
        snake.move_forward(BOUNDS);
        assert_eq!(
            snake.check_collision(BOUNDS, &obstacles),
            Some(Collision::Obstacle)
        );

        let mut ghost = Snake::new(Position { x: 5, y: 5 }, Direction::Right);
        ghost.set_ghost_mode(true);
        ghost.move_forward(BOUNDS);
        assert_eq!(ghost.check_collision(BOUNDS, &obstacles), None);
    }

    #[test]
    fn invincibility_still_reports_hits() {
        let obstacles = ObstacleManager::from_cells(BOUNDS, [Position { x: 6, y: 5 }]);
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);
        snake.set_invincible(true);

        snake.move_forward(BOUNDS);

        assert_eq!(
            snake.check_collision(BOUNDS, &obstacles),
            Some(Collision::Obstacle)
        );
    }

    #[test]
    fn body_stays_unique_without_ghost() {
        let mut snake = Snake::new(Position { x: 10, y: 10 }, Direction::Right);
        snake.grow(6);
        let turns = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];

        for direction in turns {
            snake.set_direction(direction);
            snake.move_forward(BOUNDS);
            snake.move_forward(BOUNDS);

            let unique: HashSet<_> = snake.segments().copied().collect();
            assert_eq!(unique.len(), snake.len());
        }
    }

    #[test]
    fn reset_restores_spawn_and_clears_flags() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);
        snake.grow(2);
        snake.set_ghost_mode(true);
        snake.set_invincible(true);
        snake.set_direction(Direction::Down);
        snake.move_forward(BOUNDS);
        snake.move_forward(BOUNDS);

        snake.reset();

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position { x: 5, y: 5 });
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_growth(), 0);
        assert!(!snake.is_ghost());
        assert!(!snake.is_invincible());
    }

    #[test]
    fn ability_toggles_are_idempotent() {
        let mut snake = line(3, 5, 5);
        let before: Vec<_> = snake.segments().copied().collect();

        snake.set_ghost_mode(true);
        snake.set_ghost_mode(true);
        snake.set_invincible(false);

        assert!(snake.is_ghost());
        assert!(!snake.is_invincible());
        assert_eq!(snake.segments().copied().collect::<Vec<_>>(), before);
    }
}
