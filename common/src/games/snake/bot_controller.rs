use serde::{Deserialize, Serialize};

use crate::games::{RandomSource, SessionRng};
use super::game_state::SnakeGameState;
use super::types::{Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeBotType {
    /// Greedy walk towards the nearest food over safe cells.
    Efficient,
    /// Any safe, non-reversing move.
    Random,
}

pub struct BotController;

impl BotController {
    pub fn calculate_move<R: RandomSource>(
        bot_type: SnakeBotType,
        state: &SnakeGameState<R>,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        if !state.is_running() {
            return None;
        }

        match bot_type {
            SnakeBotType::Efficient => Self::efficient_pathfinding(state, rng),
            SnakeBotType::Random => Self::random_valid_move(state, rng),
        }
    }

    fn efficient_pathfinding<R: RandomSource>(
        state: &SnakeGameState<R>,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        let head = state.snake().head();
        let Some(nearest_food) = Self::find_nearest_food(head, state.food()) else {
            return Self::random_valid_move(state, rng);
        };

        let mut best_dir = None;
        let mut best_distance = usize::MAX;

        for dir in Self::get_valid_directions(state.direction()) {
            if let Some(next_pos) = Self::safe_next_position(state, dir) {
                let distance = next_pos.manhattan_distance(nearest_food);
                if distance < best_distance {
                    best_distance = distance;
                    best_dir = Some(dir);
                }
            }
        }

        best_dir.or_else(|| Self::random_valid_move(state, rng))
    }

    fn random_valid_move<R: RandomSource>(
        state: &SnakeGameState<R>,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        let current_direction = state.direction();
        let safe_directions: Vec<Direction> = Self::get_valid_directions(current_direction)
            .into_iter()
            .filter(|&dir| Self::safe_next_position(state, dir).is_some())
            .collect();

        if safe_directions.is_empty() {
            Some(current_direction)
        } else {
            let idx = rng.next_index(safe_directions.len());
            Some(safe_directions[idx])
        }
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn find_nearest_food(from: Point, food: &[Point]) -> Option<Point> {
        food.iter()
            .min_by_key(|item| from.manhattan_distance(**item))
            .copied()
    }

    fn safe_next_position<R: RandomSource>(state: &SnakeGameState<R>, direction: Direction) -> Option<Point> {
        let snake = state.snake();
        let next = state.settings().field_size().step(snake.head(), direction)?;
        let grows = state.food().contains(&next);
        (!snake.would_bite(next, grows)).then_some(next)
    }
}
