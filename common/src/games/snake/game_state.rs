use std::time::Duration;

use crate::games::{RandomSource, SessionRng};
use super::events::SnakeEvent;
use super::food::{self, Placement};
use super::settings::{MAX_LEVELS_PER_FOOD, SettingsError, SnakeSettings};
use super::snake::Snake;
use super::types::{DeathReason, Direction, FieldSize, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationPhase {
    /// Board laid out, waiting for the first tick.
    Idle,
    Running,
    Paused,
    GameOver(DeathReason),
    /// The snake filled the board, no cell left for food.
    Won,
}

impl SimulationPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SimulationPhase::GameOver(_) | SimulationPhase::Won)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeSnapshot {
    pub field_size: FieldSize,
    pub snake: Vec<Point>,
    pub food: Vec<Point>,
    pub direction: Direction,
    pub score: u32,
    pub level: u32,
    pub tick_interval: Duration,
    pub phase: SimulationPhase,
    pub tick: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    /// Paused or finished, nothing changed.
    Skipped,
    Moved,
    Collided(DeathReason),
    BoardFull,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub status: TickStatus,
    pub ate_food: bool,
    /// New level, when this tick crossed at least one threshold.
    pub level_up: Option<u32>,
    /// New tick interval, when it changed. The tick source has to re-arm its timer.
    pub tick_interval: Option<Duration>,
    pub snapshot: SnakeSnapshot,
}

impl TickOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, TickStatus::Collided(_) | TickStatus::BoardFull)
    }
}

/// Single-player Snake on a walled grid.
///
/// All mutation goes through `reset`, `set_direction` and `advance`, so a host only has to
/// call them from one sequential scheduler. Direction intents are buffered in
/// `pending_direction` and committed at the start of the next tick; a request is checked
/// against the committed direction, which rules out a 180° turn made of two 90° requests.
pub struct SnakeGameState<R: RandomSource = SessionRng> {
    settings: SnakeSettings,
    rng: R,
    snake: Snake,
    food: Vec<Point>,
    direction: Direction,
    pending_direction: Option<Direction>,
    score: u32,
    level: u32,
    tick_interval: Duration,
    phase: SimulationPhase,
    tick: u64,
    events: Vec<SnakeEvent>,
}

impl<R: RandomSource> SnakeGameState<R> {
    pub fn new(settings: SnakeSettings, rng: R) -> Result<Self, SettingsError> {
        settings.validate()?;

        let mut state = Self {
            snake: Snake::horizontal(Point::new(0, 0), 1),
            food: Vec::new(),
            direction: Direction::Right,
            pending_direction: None,
            score: 0,
            level: 1,
            tick_interval: settings.initial_tick_interval(),
            phase: SimulationPhase::Idle,
            tick: 0,
            events: Vec::new(),
            settings,
            rng,
        };
        state.reset();
        Ok(state)
    }

    /// Re-validates the field before touching anything; on error the current game is kept.
    pub fn reset_with(&mut self, width: usize, height: usize, initial_length: usize) -> Result<(), SettingsError> {
        let candidate = self.settings.with_field(width, height, initial_length);
        candidate.validate()?;
        self.settings = candidate;
        self.reset();
        Ok(())
    }

    /// Centres the snake heading right, clears score and speed, places one food item.
    pub fn reset(&mut self) {
        let field = self.settings.field_size();
        let length = self.settings.initial_length;
        let tail_x = (field.width - length) / 2;
        let head = Point::new(tail_x + length - 1, field.height / 2);

        self.snake = Snake::horizontal(head, length);
        self.food.clear();
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.score = 0;
        self.level = 1;
        self.tick_interval = self.settings.initial_tick_interval();
        self.phase = SimulationPhase::Idle;
        self.tick = 0;
        self.events.clear();

        if self.place_food() == Placement::BoardFull {
            self.phase = SimulationPhase::Won;
        }
    }

    /// Buffers a turn for the next tick. Reversals and requests outside play are ignored.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if !matches!(self.phase, SimulationPhase::Idle | SimulationPhase::Running) {
            return false;
        }
        if requested.is_opposite(&self.direction) {
            return false;
        }

        let effective = self.pending_direction.unwrap_or(self.direction);
        self.pending_direction = Some(requested);
        if effective != requested {
            self.events.push(SnakeEvent::DirectionChanged(requested));
        }
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != SimulationPhase::Running {
            return false;
        }
        self.phase = SimulationPhase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != SimulationPhase::Paused {
            return false;
        }
        self.phase = SimulationPhase::Running;
        true
    }

    /// One tick: commit the pending turn, move, resolve collisions and food.
    pub fn advance(&mut self) -> TickOutcome {
        match self.phase {
            SimulationPhase::Idle => self.phase = SimulationPhase::Running,
            SimulationPhase::Running => {}
            _ => return self.outcome(TickStatus::Skipped, false, None, None),
        }

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
        self.tick += 1;

        let Some(next_head) = self.settings.field_size().step(self.snake.head(), self.direction) else {
            return self.collide(DeathReason::WallCollision);
        };

        let grows = self.food.contains(&next_head);
        if self.snake.would_bite(next_head, grows) {
            return self.collide(DeathReason::SelfCollision);
        }

        self.snake.advance(next_head, grows);
        if !grows {
            return self.outcome(TickStatus::Moved, false, None, None);
        }

        self.food.retain(|item| *item != next_head);
        self.score = self.score.saturating_add(self.settings.points_per_food);
        self.events.push(SnakeEvent::FoodEaten { score: self.score });

        let interval_before = self.tick_interval;
        let floor = self.settings.min_tick_interval();
        self.tick_interval = self.settings.speed_curve.after_food(self.tick_interval, floor);

        let level_up = self.apply_level_ups();
        let interval_changed = (self.tick_interval != interval_before).then_some(self.tick_interval);

        while self.food.len() < self.target_food_count() {
            if self.place_food() == Placement::BoardFull {
                break;
            }
        }

        if self.food.is_empty() {
            self.phase = SimulationPhase::Won;
            self.events.push(SnakeEvent::BoardFull { score: self.score });
            return self.outcome(TickStatus::BoardFull, true, level_up, interval_changed);
        }

        self.outcome(TickStatus::Moved, true, level_up, interval_changed)
    }

    /// Adds one food item on a free cell, see [`food::place_food`].
    pub fn place_food(&mut self) -> Placement {
        let snake = &self.snake;
        let food = &self.food;
        let placement = food::place_food(
            self.settings.field_size(),
            |cell| snake.contains(cell) || food.contains(cell),
            &mut self.rng,
            self.settings.placement_attempts,
        );

        if let Some(point) = placement.point() {
            self.food.push(point);
        }
        placement
    }

    pub fn drain_events(&mut self) -> Vec<SnakeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            field_size: self.settings.field_size(),
            snake: self.snake.segments().copied().collect(),
            food: self.food.clone(),
            direction: self.direction,
            score: self.score,
            level: self.level,
            tick_interval: self.tick_interval,
            phase: self.phase,
            tick: self.tick,
        }
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &[Point] {
        &self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, SimulationPhase::Idle | SimulationPhase::Running)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    fn apply_level_ups(&mut self) -> Option<u32> {
        let mut reached = None;
        let floor = self.settings.min_tick_interval();

        for _ in 0..MAX_LEVELS_PER_FOOD {
            if self.score < self.level.saturating_mul(self.settings.points_to_level_up) {
                break;
            }
            self.level += 1;
            self.tick_interval = self
                .settings
                .speed_curve
                .after_level_up(self.tick_interval, self.level, floor);
            self.events.push(SnakeEvent::LevelUp {
                level: self.level,
                tick_interval: self.tick_interval,
            });
            reached = Some(self.level);
        }

        reached
    }

    fn target_food_count(&self) -> usize {
        let bonus = match self.settings.bonus_food_every_levels {
            0 => 0,
            every => (self.level / every) as usize,
        };
        (1 + bonus).min(self.settings.max_food_count)
    }

    fn collide(&mut self, reason: DeathReason) -> TickOutcome {
        self.phase = SimulationPhase::GameOver(reason);
        self.events.push(SnakeEvent::GameOver {
            reason,
            score: self.score,
        });
        self.outcome(TickStatus::Collided(reason), false, None, None)
    }

    fn outcome(
        &self,
        status: TickStatus,
        ate_food: bool,
        level_up: Option<u32>,
        tick_interval: Option<Duration>,
    ) -> TickOutcome {
        TickOutcome {
            status,
            ate_food,
            level_up,
            tick_interval,
            snapshot: self.snapshot(),
        }
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Vec<Point>) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, segments: Vec<Point>, direction: Direction) {
        self.snake = Snake::from_segments(segments);
        self.direction = direction;
        self.pending_direction = None;
    }
}
